use serde::{Deserialize, Serialize};

use super::value::{first_set, Amount, DateLike, Flag, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "organization_id", default)]
    pub organization_id: Option<RecordId>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub is_member: Option<Flag>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub date: Option<DateLike>,
    #[serde(default)]
    pub created_at: Option<DateLike>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Donation {
    pub fn is_member(&self) -> bool {
        self.is_member.as_ref().is_some_and(Flag::is_truthy)
    }

    pub fn report_date(&self) -> Option<&DateLike> {
        first_set(self.date.as_ref(), self.created_at.as_ref())
    }
}
