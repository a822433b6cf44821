use serde::{Deserialize, Serialize};

use super::value::{first_set, Amount, DateLike, Flag, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(alias = "_id", default)]
    pub id: Option<RecordId>,
    #[serde(rename = "organization_id", default)]
    pub organization_id: Option<RecordId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub date: Option<DateLike>,
    #[serde(default)]
    pub created_at: Option<DateLike>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Flag>,
    #[serde(default)]
    pub is_deleted: Option<Flag>,
}

impl Expense {
    /// Soft-deleted: a truthy `deletedAt`, or `isDeleted` set to `true`.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.as_ref().is_some_and(Flag::is_truthy)
            || self.is_deleted.as_ref().is_some_and(Flag::is_true)
    }

    pub fn report_date(&self) -> Option<&DateLike> {
        first_set(self.created_at.as_ref(), self.date.as_ref())
    }
}
