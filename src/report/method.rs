use serde::Serialize;

/// How a payment method is shown on the dashboard and in exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodDisplay {
    Cash,
    Online,
    Other(String),
    Unknown,
}

impl MethodDisplay {
    pub fn label(&self) -> &str {
        match self {
            MethodDisplay::Cash => "Cash",
            MethodDisplay::Online => "Online Payment",
            MethodDisplay::Other(raw) => raw,
            MethodDisplay::Unknown => "Unknown",
        }
    }
}

/// Raw method strings (after normalization) that mean cash handed to an admin.
const CASH_MARKERS: &[&str] = &[
    "cash",
    "cash to admin",
    "cash admin",
    "paid to admin",
    "admin cash",
    "offline",
];

/// Raw method strings (after normalization) that are settled online.
const ONLINE_METHODS: &[&str] = &[
    "online",
    "online payment",
    "card",
    "credit card",
    "debit card",
    "stripe",
    "paypal",
    "bank transfer",
    "direct debit",
    "apple pay",
    "google pay",
];

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify a free-form method string. Unlisted methods pass through as-is.
pub fn classify_method(method: Option<&str>) -> MethodDisplay {
    let Some(raw) = method.map(str::trim).filter(|m| !m.is_empty()) else {
        return MethodDisplay::Unknown;
    };

    let key = normalize(raw);
    if CASH_MARKERS.contains(&key.as_str()) {
        MethodDisplay::Cash
    } else if ONLINE_METHODS.contains(&key.as_str()) {
        MethodDisplay::Online
    } else {
        MethodDisplay::Other(raw.to_string())
    }
}

/// Display label for a raw method string.
pub fn payment_method_display(method: Option<&str>) -> String {
    classify_method(method).label().to_string()
}

/// One slice of the method-mix breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCount {
    pub label: String,
    pub value: usize,
}

/// Count methods in first-seen order. An empty input yields the single
/// `"No payments"` placeholder so charts always have something to draw.
pub fn method_mix<'a, I>(methods: I) -> Vec<MethodCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut mix: Vec<MethodCount> = Vec::new();

    for method in methods {
        let label = payment_method_display(method);
        match mix.iter_mut().find(|m| m.label == label) {
            Some(entry) => entry.value += 1,
            None => mix.push(MethodCount { label, value: 1 }),
        }
    }

    if mix.is_empty() {
        mix.push(MethodCount {
            label: "No payments".to_string(),
            value: 0,
        });
    }

    mix
}
