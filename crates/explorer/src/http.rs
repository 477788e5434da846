//! HTTP surface.
//!
//! Lookups are blocking (SQLite plus a synchronous GitHub client), so each
//! request hands its lookup to the runtime's blocking pool.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use explorer_core::{ExplorerError, LookupService, Repository};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::health::health_handler;

/// State shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: LookupService,
}

impl AppState {
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/repositories/{owner}/{repository_name}",
            get(get_repository_details),
        )
        .route("/actuator/health", get(health_handler))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Failure of a request handler
#[derive(Debug)]
pub enum ApiError {
    Lookup(ExplorerError),
    /// The blocking task panicked or was cancelled
    Internal(String),
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        ApiError::Lookup(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Lookup(ExplorerError::RepositoryNotFound { .. }) => {
                return StatusCode::NOT_FOUND.into_response();
            }
            ApiError::Lookup(err @ ExplorerError::InvalidArgument(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Lookup(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /repositories/{owner}/{repository_name}`
async fn get_repository_details(
    State(state): State<Arc<AppState>>,
    Path((owner, repository_name)): Path<(String, String)>,
) -> Result<Json<Repository>, ApiError> {
    info!(%owner, %repository_name, "getting repository details");

    let lookup = state.lookup.clone();
    let (task_owner, task_name) = (owner.clone(), repository_name.clone());
    let result = tokio::task::spawn_blocking(move || {
        lookup.get_repository_details(&task_owner, &task_name)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "lookup task failed");
        ApiError::Internal(format!("lookup task failed: {e}"))
    })?;

    match result {
        Ok(repository) => {
            info!(full_name = %repository.full_name, "repository found");
            Ok(Json(repository))
        }
        Err(err) => {
            if err.is_not_found() {
                warn!(%owner, %repository_name, "repository not found");
            }
            Err(err.into())
        }
    }
}
