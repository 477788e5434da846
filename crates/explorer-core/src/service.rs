//! Cache-aside lookup of repository metadata.
//!
//! The store is consulted first; only a miss reaches the remote fetcher, and
//! only a successful fetch is written back.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::{ExplorerError, Result};
use crate::models::{ensure_coordinates, repository_id, Repository};
use crate::traits::{RepositoryFetcher, RepositoryStore};

/// Read-through service over a store and a remote fetcher
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn RepositoryStore>,
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl LookupService {
    pub fn new(store: Arc<dyn RepositoryStore>, fetcher: Arc<dyn RepositoryFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Access the underlying store (used by health checks)
    pub fn store(&self) -> &dyn RepositoryStore {
        self.store.as_ref()
    }

    /// Return repository details, fetching and persisting them on a miss
    pub fn get_repository_details(&self, owner: &str, name: &str) -> Result<Repository> {
        ensure_coordinates(owner, name)?;

        let id = repository_id(owner, name);
        if let Some(cached) = self.store.find_by_id(&id)? {
            debug!(%id, "store hit");
            return Ok(cached);
        }

        debug!(%id, "store miss");
        self.fetch_and_save(owner, name, id)
    }

    fn fetch_and_save(&self, owner: &str, name: &str, id: String) -> Result<Repository> {
        let mut repository = match self.fetcher.fetch(owner, name) {
            Ok(repository) => repository,
            Err(err @ ExplorerError::RepositoryNotFound { .. }) => {
                warn!(%owner, %name, "repository not found upstream");
                return Err(err);
            }
            Err(ExplorerError::UpstreamFailure { cause, .. }) => {
                error!(%owner, %name, %cause, "error fetching repository details");
                return Err(ExplorerError::upstream(owner, name, cause));
            }
            Err(ExplorerError::FetchFailed { status }) => {
                error!(%owner, %name, status, "unexpected response fetching repository details");
                return Err(ExplorerError::FetchFailed { status });
            }
            Err(err @ ExplorerError::InvalidArgument(_)) => {
                warn!(%owner, %name, error = %err, "remote rejected lookup arguments");
                return Err(err);
            }
            Err(other) => {
                error!(%owner, %name, error = %other, "error fetching repository details");
                return Err(ExplorerError::upstream(owner, name, other.to_string()));
            }
        };

        repository.id = id;
        self.store.save(&repository)?;
        info!(id = %repository.id, full_name = %repository.full_name, "repository cached");
        Ok(repository)
    }
}
