//! Router tests against a real listener, an in-memory store and a wiremock GitHub

#[cfg(test)]
mod tests {
    use crate::http::{create_router, AppState};
    use explorer_core::{LookupService, RepositoryStore};
    use github_backend::GitHubClient;
    use sqlite_store::SqliteRepositoryStore;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Helper to create a mock GitHub repository response
    fn mock_github_repo(full_name: &str, stars: u64) -> serde_json::Value {
        serde_json::json!({
            "id": 1296269,
            "full_name": full_name,
            "description": "This your first repo!",
            "clone_url": format!("https://github.com/{}.git", full_name),
            "stargazers_count": stars,
            "created_at": "2011-01-26T19:01:12Z"
        })
    }

    /// Start the router on an ephemeral port; returns its base URL and the store
    async fn spawn_app(github_url: &str) -> (String, Arc<SqliteRepositoryStore>) {
        let store = Arc::new(SqliteRepositoryStore::open_in_memory().unwrap());
        let client = Arc::new(GitHubClient::with_base_url(github_url));
        let state = AppState::new(LookupService::new(store.clone(), client));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(Arc::new(state)))
                .await
                .unwrap();
        });

        (format!("http://{}", addr), store)
    }

    /// Issue a blocking GET off the async workers; returns (status, body)
    async fn http_get(url: String) -> (u16, String) {
        tokio::task::spawn_blocking(move || {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .into();
            let mut response = agent.get(&url).call().unwrap();
            let status = response.status().as_u16();
            let body = response.body_mut().read_to_string().unwrap();
            (status, body)
        })
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_miss_fetches_persists_and_returns() {
        let github = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_github_repo("octocat/Hello-World", 42)),
            )
            .expect(1)
            .mount(&github)
            .await;

        let (base, store) = spawn_app(&github.uri()).await;
        let (status, body) = http_get(format!("{base}/repositories/octocat/Hello-World")).await;

        assert_eq!(status, 200);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["id"], "octocat/Hello-World");
        assert_eq!(json["full_name"], "octocat/Hello-World");
        assert_eq!(json["stargazers_count"], 42);
        assert_eq!(json["clone_url"], "https://github.com/octocat/Hello-World.git");

        let cached = store.find_by_id("octocat/Hello-World").unwrap().unwrap();
        assert_eq!(cached.stars, 42);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_second_request_is_served_from_store() {
        let github = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_github_repo("octocat/Hello-World", 42)),
            )
            .expect(1)
            .mount(&github)
            .await;

        let (base, _store) = spawn_app(&github.uri()).await;
        let url = format!("{base}/repositories/octocat/Hello-World");

        let (first_status, first_body) = http_get(url.clone()).await;
        let (second_status, second_body) = http_get(url).await;

        assert_eq!(first_status, 200);
        assert_eq!(second_status, 200);
        assert_eq!(first_body, second_body);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remote_not_found_returns_empty_404() {
        let github = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/nonexistent-owner/nonexistent-repo"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found"
            })))
            .mount(&github)
            .await;

        let (base, store) = spawn_app(&github.uri()).await;
        let (status, body) =
            http_get(format!("{base}/repositories/nonexistent-owner/nonexistent-repo")).await;

        assert_eq!(status, 404);
        assert!(body.is_empty());
        assert_eq!(
            store.find_by_id("nonexistent-owner/nonexistent-repo").unwrap(),
            None
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upstream_failure_returns_server_error() {
        let github = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/prpundge/testRepository"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&github)
            .await;

        let (base, store) = spawn_app(&github.uri()).await;
        let (status, body) =
            http_get(format!("{base}/repositories/prpundge/testRepository")).await;

        assert_eq!(status, 500);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Repository 'prpundge/testRepository' not found");
        assert_eq!(store.find_by_id("prpundge/testRepository").unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_no_content_from_github_reports_fetch_failure() {
        let github = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&github)
            .await;

        let (base, store) = spawn_app(&github.uri()).await;
        let (status, body) = http_get(format!("{base}/repositories/octocat/Hello-World")).await;

        assert_eq!(status, 500);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Failed to fetch repository details");
        assert_eq!(store.find_by_id("octocat/Hello-World").unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_health_reports_store_up() {
        let github = MockServer::start().await;
        let (base, _store) = spawn_app(&github.uri()).await;

        let (status, body) = http_get(format!("{base}/actuator/health")).await;

        assert_eq!(status, 200);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "UP");
        assert_eq!(json["components"]["store"]["status"], "UP");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_route_is_404() {
        let github = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&github)
            .await;

        let (base, _store) = spawn_app(&github.uri()).await;
        let (status, _) = http_get(format!("{base}/repositories/octocat")).await;

        assert_eq!(status, 404);
    }
}
