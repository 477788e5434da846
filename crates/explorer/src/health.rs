use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::http::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub components: HealthComponents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
    pub store: ComponentHealth,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentHealth {
    fn up() -> Self {
        Self {
            status: HealthStatus::Up,
            detail: None,
        }
    }

    fn down(detail: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Down,
            detail: Some(detail.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

async fn check_store(state: &AppState) -> ComponentHealth {
    let lookup = state.lookup.clone();
    match tokio::task::spawn_blocking(move || lookup.store().ping()).await {
        Ok(Ok(())) => ComponentHealth::up(),
        Ok(Err(e)) => ComponentHealth::down(e.to_string()),
        Err(e) => ComponentHealth::down(format!("store check task failed: {e}")),
    }
}

/// `GET /actuator/health`. Returns 200 when every component is up, 503 otherwise.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = check_store(&state).await;
    let status = store.status;
    let body = HealthResponse {
        status,
        components: HealthComponents { store },
    };

    let http_status = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(body))
}
