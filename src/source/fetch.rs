use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use ureq::Agent;

use crate::config::ApiSettings;
use crate::error::{ReportError, Result};
use crate::model::{Donation, Expense, Invoice, Member, Payment};

use super::{decode_records, save_collection};

/// Backend collections mirrored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Payments,
    Donations,
    Invoices,
    Expenses,
    Members,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Payments,
        Collection::Donations,
        Collection::Invoices,
        Collection::Expenses,
        Collection::Members,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Payments => "payments",
            Collection::Donations => "donations",
            Collection::Invoices => "invoices",
            Collection::Expenses => "expenses",
            Collection::Members => "members",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pull the records array out of a response body. The backend answers with
/// either a bare array or `{ "data": [...] }`.
fn extract_records<T: DeserializeOwned>(collection: Collection, body: &str) -> Result<Vec<T>> {
    let fetch_error = |reason: String| ReportError::Fetch {
        collection: collection.to_string(),
        reason,
    };

    let mut json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| fetch_error(e.to_string()))?;

    let records = if json.get("data").is_some() {
        json["data"].take()
    } else {
        json
    };

    match records {
        serde_json::Value::Array(values) => Ok(decode_records(collection, values)),
        _ => Err(fetch_error("response is not a list of records".to_string())),
    }
}

fn fetch_one<T: DeserializeOwned + Serialize>(
    agent: &Agent,
    api: &ApiSettings,
    base_url: &str,
    collection: Collection,
    data_dir: &Path,
) -> Result<usize> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), collection.name());
    let fetch_error = |reason: String| ReportError::Fetch {
        collection: collection.to_string(),
        reason,
    };

    let mut request = agent.get(&url);
    if let Some(token) = &api.token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }

    let mut response = request.call().map_err(|e| fetch_error(e.to_string()))?;
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| fetch_error(e.to_string()))?;

    let records: Vec<T> = extract_records(collection, &body)?;
    save_collection(data_dir, collection, &records)?;

    tracing::info!(%collection, count = records.len(), "refreshed snapshot");
    Ok(records.len())
}

/// Refresh every snapshot from the backend. Stops at the first collection
/// that fails; its existing snapshot is left as it was.
pub fn fetch_all(api: &ApiSettings, data_dir: &Path) -> Result<Vec<(Collection, usize)>> {
    let base_url = api.base_url.as_deref().ok_or(ReportError::NoApiConfigured)?;

    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(api.timeout_secs)))
        .build()
        .into();

    let mut counts = Vec::with_capacity(Collection::ALL.len());
    for collection in Collection::ALL {
        let count = match collection {
            Collection::Payments => {
                fetch_one::<Payment>(&agent, api, base_url, collection, data_dir)?
            }
            Collection::Donations => {
                fetch_one::<Donation>(&agent, api, base_url, collection, data_dir)?
            }
            Collection::Invoices => {
                fetch_one::<Invoice>(&agent, api, base_url, collection, data_dir)?
            }
            Collection::Expenses => {
                fetch_one::<Expense>(&agent, api, base_url, collection, data_dir)?
            }
            Collection::Members => {
                fetch_one::<Member>(&agent, api, base_url, collection, data_dir)?
            }
        };
        counts.push((collection, count));
    }

    Ok(counts)
}
