use crate::model::Amount;

/// Normalize a backend amount into a finite number.
///
/// Strings keep only their digits and dots before parsing, so currency
/// symbols, labels like "Outstanding", thousands separators and signs are
/// dropped. Anything unreadable, including non-numeric JSON, becomes `0.0`. Numbers pass through when
/// finite.
pub fn parse_money(value: Option<&Amount>) -> f64 {
    match value {
        Some(Amount::Number(n)) if n.is_finite() => *n,
        Some(Amount::Number(_)) => 0.0,
        Some(Amount::Text(s)) => parse_money_str(s),
        Some(Amount::Other(_)) | None => 0.0,
    }
}

/// String half of [`parse_money`].
pub fn parse_money_str(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let prefix = leading_decimal(&kept);
    match prefix.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Longest prefix shaped like `digits[.digits]`, mirroring how a lenient
/// float parser stops at the second dot.
fn leading_decimal(s: &str) -> &str {
    let mut seen_dot = false;
    let mut seen_digit = false;
    let mut end = 0;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    if seen_digit {
        &s[..end]
    } else {
        ""
    }
}

/// Coerce a derived figure to something displayable.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
