use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

/// Cached metadata for a hosted repository
///
/// Field names on the wire follow the GitHub REST API so the record can be
/// returned to HTTP callers and persisted without a second mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Composite key `owner/name`, the store's primary key
    #[serde(default)]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub clone_url: String,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    pub created_at: DateTime<Utc>,
}

/// Build the composite store key for an owner/name pair
pub fn repository_id(owner: &str, name: &str) -> String {
    format!("{}/{}", owner, name)
}

/// Reject empty owner or repository names before any I/O happens
pub fn ensure_coordinates(owner: &str, name: &str) -> Result<()> {
    if owner.is_empty() || name.is_empty() {
        return Err(ExplorerError::empty_coordinates());
    }
    Ok(())
}
