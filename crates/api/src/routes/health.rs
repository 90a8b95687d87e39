//! Liveness and database reachability.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    /// `up` or `down`.
    pub database: &'static str,
    /// Crate version of the running server.
    pub version: &'static str,
}

impl HealthResponse {
    fn new(database_up: bool) -> Self {
        Self {
            status: if database_up { "healthy" } else { "degraded" },
            database: if database_up { "up" } else { "down" },
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.database == "up" {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_up = state
        .db
        .ping()
        .await
        .inspect_err(|e| warn!(error = %e, "Database ping failed"))
        .is_ok();

    let response = HealthResponse::new(database_up);
    (response.status_code(), Json(response))
}

/// `GET /health`, served without authentication.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
