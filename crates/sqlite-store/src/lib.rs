//! SQLite storage for cached repositories
//!
//! One table keyed by the composite `owner/name` id, schema versioned via
//! `PRAGMA user_version`.

pub mod error;
pub mod schema;
mod store;

pub use error::{Result, StoreError};
pub use store::SqliteRepositoryStore;
