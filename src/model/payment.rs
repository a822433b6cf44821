use serde::{Deserialize, Serialize};

use super::value::{first_set, Amount, DateLike, RecordId};

/// A member payment as recorded by the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "organization_id", default)]
    pub organization_id: Option<RecordId>,
    #[serde(default)]
    pub member_id: Option<RecordId>,
    /// Member display name
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date: Option<DateLike>,
    #[serde(default)]
    pub created_at: Option<DateLike>,
    #[serde(default)]
    pub invoice_id: Option<RecordId>,
    #[serde(default)]
    pub screenshot: Option<String>,
}

impl Payment {
    /// Only settled payments count towards totals.
    pub fn is_settled(&self) -> bool {
        matches!(self.status.as_deref(), Some("Completed") | Some("Paid"))
    }

    pub fn report_date(&self) -> Option<&DateLike> {
        first_set(self.date.as_ref(), self.created_at.as_ref())
    }
}
