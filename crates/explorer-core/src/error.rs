use thiserror::Error;

/// Message reported when a lookup is attempted without an owner or name
pub const EMPTY_COORDINATES_MESSAGE: &str = "Owner and repository name must not be null or empty";

/// Common errors for repository lookups
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Repository '{owner}/{name}' not found")]
    RepositoryNotFound { owner: String, name: String },

    /// Any remote failure other than a confirmed 404.
    ///
    /// The message deliberately matches `RepositoryNotFound`; callers have
    /// always observed this text. The underlying problem lives in `cause`.
    #[error("Repository '{owner}/{name}' not found")]
    UpstreamFailure {
        owner: String,
        name: String,
        cause: String,
    },

    /// The remote answered, but not with the repository (e.g. 204)
    #[error("Failed to fetch repository details")]
    FetchFailed { status: u16 },

    #[error("Store error: {0}")]
    Store(String),
}

impl ExplorerError {
    pub fn empty_coordinates() -> Self {
        ExplorerError::InvalidArgument(EMPTY_COORDINATES_MESSAGE.to_string())
    }

    pub fn not_found(owner: &str, name: &str) -> Self {
        ExplorerError::RepositoryNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub fn upstream(owner: &str, name: &str, cause: impl Into<String>) -> Self {
        ExplorerError::UpstreamFailure {
            owner: owner.to_string(),
            name: name.to_string(),
            cause: cause.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ExplorerError::RepositoryNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
