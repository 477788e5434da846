use explorer_core::ExplorerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid persisted repository {id}: {message}")]
    InvalidData { id: String, message: String },

    #[error("database connection lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for ExplorerError {
    fn from(err: StoreError) -> Self {
        ExplorerError::Store(err.to_string())
    }
}
