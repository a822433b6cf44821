//! Where report inputs come from: JSON snapshots on disk, refreshed from the
//! membership backend by [`fetch`].

mod fetch;

pub use fetch::{fetch_all, Collection};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::model::Sources;

/// Read one snapshot. A missing file is an empty collection.
pub fn load_collection<T: DeserializeOwned>(
    data_dir: &Path,
    collection: Collection,
) -> Result<Vec<T>> {
    let path = data_dir.join(collection.file_name());
    if !path.exists() {
        tracing::debug!(path = %path.display(), "snapshot missing, treating as empty");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| ReportError::SnapshotParse { path, source: e })?;
    Ok(decode_records(collection, values))
}

/// Decode records one at a time so a single unreadable record is skipped
/// instead of failing the whole collection.
pub(crate) fn decode_records<T: DeserializeOwned>(
    collection: Collection,
    values: Vec<serde_json::Value>,
) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(%collection, index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect()
}

/// Load all five snapshots.
pub fn load_sources(data_dir: &Path) -> Result<Sources> {
    Ok(Sources {
        payments: load_collection(data_dir, Collection::Payments)?,
        donations: load_collection(data_dir, Collection::Donations)?,
        invoices: load_collection(data_dir, Collection::Invoices)?,
        expenses: load_collection(data_dir, Collection::Expenses)?,
        members: load_collection(data_dir, Collection::Members)?,
    })
}

/// Write one snapshot as pretty JSON.
pub fn save_collection<T: Serialize>(
    data_dir: &Path,
    collection: Collection,
    records: &[T],
) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(records)?;
    fs::write(data_dir.join(collection.file_name()), content)?;
    Ok(())
}

/// Create empty snapshot files for every collection that has none yet.
pub fn init_snapshots(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    for collection in Collection::ALL {
        let path = data_dir.join(collection.file_name());
        if !path.exists() {
            fs::write(path, "[]\n")?;
        }
    }
    Ok(())
}
