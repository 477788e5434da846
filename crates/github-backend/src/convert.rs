//! Model conversions from GitHub types to explorer-core types

use explorer_core::Repository;

use crate::models::GitHubRepo;

/// Convert a GitHub repository payload to a core Repository.
///
/// The `id` is left empty; the lookup service assigns the composite key.
pub fn github_repo_to_core(repo: GitHubRepo) -> Repository {
    Repository {
        id: String::new(),
        full_name: repo.full_name,
        description: repo.description,
        clone_url: repo.clone_url,
        stars: repo.stargazers_count,
        created_at: repo.created_at,
    }
}
