use chrono::{DateTime, Utc};
use serde::Deserialize;

/// GitHub repository as returned by `GET /repos/{owner}/{repo}`
///
/// Only the fields the explorer keeps are modelled; the rest of the
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub full_name: String,
    pub description: Option<String>,
    pub clone_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    pub created_at: DateTime<Utc>,
}
