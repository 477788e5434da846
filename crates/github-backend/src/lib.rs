pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;


pub use client::{GitHubClient, DEFAULT_API_URL};
pub use error::{GitHubError, Result};
pub use models::*;

// Re-export explorer-core types for convenience
pub use explorer_core::{ExplorerError, RepositoryFetcher};
