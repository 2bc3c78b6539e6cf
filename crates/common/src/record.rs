//! Adoption listing records and the JSON record file

use crate::{RabbitRagError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One adoptable animal as scraped from its detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub name: String,

    /// Breed, e.g. "Holland Lop"
    #[serde(rename = "type")]
    pub pet_type: String,

    pub age: String,

    pub gender: String,

    pub description: String,

    /// Detail page URL (record identity)
    pub detail_url: String,
}

/// Load records from a JSON array file.
///
/// Every record must carry its `detail_url` identity.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let data = std::fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&data)?;
    if let Some(i) = records.iter().position(|r| r.detail_url.trim().is_empty()) {
        return Err(RabbitRagError::invalid_record(format!(
            "record {} in {} has no detail_url",
            i,
            path.display()
        )));
    }
    info!("Loaded {} entries from {}", records.len(), path.display());
    Ok(records)
}

/// Save records as pretty-printed UTF-8 JSON
pub fn save_records(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(records)?;
    std::fs::write(path, data)?;
    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}
