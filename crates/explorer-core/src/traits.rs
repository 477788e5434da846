use crate::error::Result;
use crate::models::Repository;

/// Persistent store holding previously fetched repositories
///
/// Implementations are keyed by `Repository::id` and are expected to make
/// each individual read or write atomic. No cross-call locking is assumed.
pub trait RepositoryStore: Send + Sync {
    /// Look up a repository by its composite `owner/name` key
    fn find_by_id(&self, id: &str) -> Result<Option<Repository>>;

    /// Persist a repository, replacing any row with the same id
    fn save(&self, repository: &Repository) -> Result<Repository>;

    /// Check that the store is reachable.
    /// Default implementation always succeeds.
    fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Remote source of repository metadata
pub trait RepositoryFetcher: Send + Sync {
    /// Fetch a repository from the remote API.
    ///
    /// Returns `ExplorerError::RepositoryNotFound` when the remote confirms
    /// the repository does not exist and `ExplorerError::UpstreamFailure`
    /// for everything else that goes wrong. The returned record's `id` is
    /// left for the caller to assign.
    fn fetch(&self, owner: &str, name: &str) -> Result<Repository>;
}
