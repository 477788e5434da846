pub mod error;
pub mod models;
pub mod service;
pub mod traits;

pub use error::{ExplorerError, Result};
pub use models::*;
pub use service::LookupService;
pub use traits::{RepositoryFetcher, RepositoryStore};
