//! Implementation of explorer-core traits for GitHubClient

use explorer_core::{Repository, RepositoryFetcher, Result};

use crate::client::GitHubClient;
use crate::convert::github_repo_to_core;

impl RepositoryFetcher for GitHubClient {
    fn fetch(&self, owner: &str, name: &str) -> Result<Repository> {
        self.get_repo(owner, name)
            .map(github_repo_to_core)
            .map_err(|e| e.into_explorer(owner, name))
    }
}
