//! Route handlers for the contribution endpoints
//!
//! Every core error becomes a 503: failures are presumed to be upstream and
//! transient, never the client's fault. An empty username is a 404 and never
//! reaches the core.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::domain::errors::ActivityError;
use crate::services::RequestCoordinator;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub coordinator: RequestCoordinator,
}

impl AppState {
    pub const fn new(coordinator: RequestCoordinator) -> Self {
        Self { coordinator }
    }
}

/// Error responses produced by the handlers
#[derive(Debug)]
pub enum ApiError {
    /// Empty or missing username
    NotFound,
    /// Anything the core surfaced
    Unavailable(ActivityError),
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        Self::Unavailable(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

/// `GET /contribs/{username}`
pub async fn get_contribs(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let username = require_username(&username)?;
    info!(url = %format!("/contribs/{username}"), "Request");

    let days = state
        .coordinator
        .get_days(username)
        .await
        .map_err(log_failure)?;

    let response = json_response(&days).map_err(log_failure)?;
    info!("Request successful");
    Ok(response)
}

/// `GET /summary/{username}`
pub async fn get_summary(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let username = require_username(&username)?;
    info!(url = %format!("/summary/{username}"), "Request");

    let summary = state
        .coordinator
        .get_summary(username)
        .await
        .map_err(log_failure)?;

    let response = json_response(&summary).map_err(log_failure)?;
    info!("Request successful");
    Ok(response)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    let entries = state.coordinator.cache().len().await;
    axum::Json(json!({ "status": "ok", "cache_entries": entries })).into_response()
}

/// The path parameter is used verbatim as the cache and remote key.
fn require_username(raw: &str) -> Result<&str, ApiError> {
    if raw.is_empty() {
        error!("Empty username");
        return Err(ApiError::NotFound);
    }
    Ok(raw)
}

fn log_failure(err: ActivityError) -> ActivityError {
    error!(error = %err, "Error getting contributions");
    err
}

/// Serialize up front so encoding failures map to 503 like any other
fn json_response<T: Serialize>(value: &T) -> Result<Response, ActivityError> {
    let bytes = serde_json::to_vec(value)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}
