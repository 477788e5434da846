use explorer_core::error::EMPTY_COORDINATES_MESSAGE;
use tracing::{debug, info};
use ureq::Agent;

use crate::error::{GitHubError, Result};
use crate::models::*;

/// Public GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub REST API client
///
/// Requests are unauthenticated and use the transport's default headers
/// and timeouts. Each call is a single attempt.
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    /// Create a new GitHub client targeting api.github.com
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL for this client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL of a single repository
    fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        )
    }

    /// Check response status and return error if it is not a 200
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if status == 200 {
            return Ok(response);
        }

        if status < 400 {
            return Err(GitHubError::UnexpectedStatus(status));
        }

        // Detect rate limiting: 403 with x-ratelimit-remaining: 0
        if status == 403 {
            if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
                if remaining.to_str().unwrap_or("") == "0" {
                    return Err(GitHubError::RateLimited);
                }
            }
        }

        // Try to read error body
        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // Try to parse as GitHub error response
        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        Err(GitHubError::Api { status, message })
    }

    // ==================== Repository Operations ====================

    /// Get a specific repository
    pub fn get_repo(&self, owner: &str, repo: &str) -> Result<GitHubRepo> {
        if owner.is_empty() || repo.is_empty() {
            return Err(GitHubError::InvalidInput(
                EMPTY_COORDINATES_MESSAGE.to_string(),
            ));
        }

        info!(%owner, %repo, "fetching repository details from GitHub API");
        let url = self.repo_url(owner, repo);

        let response = self.agent.get(&url).call().map_err(GitHubError::Http)?;

        let mut response = self.check_response(response)?;
        let body = response.body_mut().read_to_string()?;
        let repo: GitHubRepo = serde_json::from_str(&body)?;
        debug!(full_name = %repo.full_name, "GitHub API returned repository");
        Ok(repo)
    }
}
