use explorer_core::ExplorerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A status that is neither 200 nor an HTTP error (e.g. 204)
    #[error("Failed to fetch repository details")]
    UnexpectedStatus(u16),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl GitHubError {
    /// Translate into the core error for a lookup of `owner/name`.
    ///
    /// Only a 404 counts as a confirmed absence. A non-error status other
    /// than 200 is a fetch failure; everything else becomes an upstream
    /// failure carrying this error's text as the cause.
    pub fn into_explorer(self, owner: &str, name: &str) -> ExplorerError {
        match self {
            GitHubError::InvalidInput(msg) => ExplorerError::InvalidArgument(msg),
            GitHubError::Api { status: 404, .. } => ExplorerError::not_found(owner, name),
            GitHubError::UnexpectedStatus(status) => ExplorerError::FetchFailed { status },
            other => ExplorerError::upstream(owner, name, other.to_string()),
        }
    }
}
