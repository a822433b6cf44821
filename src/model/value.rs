use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A monetary amount as the backend sends it: either a JSON number or a
/// display string such as `"$250 Outstanding"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    /// Booleans, objects and the like. Reads as zero.
    Other(Value),
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

/// A date field that may hold an ISO string or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DateLike {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
    /// Any other JSON shape; never resolves to a date.
    Other(Value),
}

impl DateLike {
    /// Resolve to a naive timestamp. `None` when the value cannot be read
    /// as a date.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DateLike::Millis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc()),
            DateLike::FractionalMillis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(ms.trunc() as i64).map(|dt| dt.naive_utc())
            }
            DateLike::Text(s) => parse_date_text(s),
            DateLike::FractionalMillis(_) | DateLike::Other(_) => None,
        }
    }

    /// Empty strings count as "not set" when choosing between fallback fields.
    pub fn is_blank(&self) -> bool {
        matches!(self, DateLike::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        DateLike::Text(value.to_string())
    }
}

fn parse_date_text(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Pick the first date source that is actually set. A blank primary field
/// falls through to the secondary one; an unparseable non-blank one does not.
pub fn first_set<'a>(
    primary: Option<&'a DateLike>,
    secondary: Option<&'a DateLike>,
) -> Option<&'a DateLike> {
    primary.filter(|d| !d.is_blank()).or(secondary)
}

/// Identifier that the backend may send as a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
            RecordId::Other(v) => write!(f, "{v}"),
        }
    }
}

/// A loosely typed flag such as `isMember` or `deletedAt`, kept as the raw
/// JSON value and read for truthiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Flag(pub Value);

impl Flag {
    /// `null`, `false`, zero and blank strings are unset; anything else is set.
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Strictly the JSON literal `true`.
    pub fn is_true(&self) -> bool {
        self.0 == Value::Bool(true)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(Value::Bool(value))
    }
}

impl From<&str> for Flag {
    fn from(value: &str) -> Self {
        Flag(Value::String(value.to_string()))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_shapes() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        assert_eq!(
            DateLike::from("2025-01-15").to_datetime(),
            day.and_hms_opt(0, 0, 0)
        );
        assert_eq!(
            DateLike::from("2025-01-15T10:30:00.000Z").to_datetime(),
            day.and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            DateLike::from("2025-01-15 10:30:00").to_datetime(),
            day.and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            DateLike::Millis(1_736_899_200_000).to_datetime(),
            day.and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(DateLike::from("not a date").to_datetime(), None);
        assert_eq!(DateLike::from("").to_datetime(), None);
        assert_eq!(DateLike::from("2025-13-40").to_datetime(), None);
    }

    #[test]
    fn blank_primary_falls_back() {
        let blank = DateLike::from("  ");
        let due = DateLike::from("2025-02-01");
        assert_eq!(first_set(Some(&blank), Some(&due)), Some(&due));

        let bad = DateLike::from("garbage");
        assert_eq!(first_set(Some(&bad), Some(&due)), Some(&bad));
    }

    #[test]
    fn tolerates_unexpected_json_shapes() {
        let dates: Vec<Option<DateLike>> =
            serde_json::from_str(r#"[1736899200000.0, true, {"$date": 1}, null]"#).unwrap();
        assert_eq!(
            dates[0].as_ref().and_then(DateLike::to_datetime),
            NaiveDate::from_ymd_opt(2025, 1, 15).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(dates[1].as_ref().and_then(DateLike::to_datetime), None);
        assert_eq!(dates[2].as_ref().and_then(DateLike::to_datetime), None);
        assert_eq!(dates[3], None);

        let amounts: Vec<Amount> = serde_json::from_str(r#"[12.5, "$3", false]"#).unwrap();
        assert_eq!(amounts[2], Amount::Other(Value::Bool(false)));

        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "org-1", 7.5]"#).unwrap();
        assert_eq!(ids[2].to_string(), "7.5");
    }

    #[test]
    fn flag_truthiness() {
        let flags: Vec<Flag> =
            serde_json::from_str(r#"[null, false, 0, "", " ", true, 1738713600000, "2025-02-05"]"#)
                .unwrap();
        let truthy: Vec<bool> = flags.iter().map(Flag::is_truthy).collect();
        assert_eq!(truthy, [false, false, false, false, false, true, true, true]);

        assert!(Flag::from(true).is_true());
        assert!(!Flag::from("true").is_true());
    }
}
