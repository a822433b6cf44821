use serde::{Deserialize, Serialize};

use super::value::{first_set, Amount, DateLike, RecordId};

/// A subscription invoice issued to a member.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "organization_id", default)]
    pub organization_id: Option<RecordId>,
    #[serde(default)]
    pub member_id: Option<RecordId>,
    #[serde(default)]
    pub member_name: Option<String>,
    /// Often a display string like `"$250 Outstanding"`
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due: Option<DateLike>,
    #[serde(default)]
    pub created_at: Option<DateLike>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status.as_deref() == Some("Paid")
    }

    /// Creation date when known, otherwise the due date.
    pub fn report_date(&self) -> Option<&DateLike> {
        first_set(self.created_at.as_ref(), self.due.as_ref())
    }
}
