//! HTTP API for accounting dimensions and expense entries.
//!
//! Everything is served under `/api/v1`. Apart from `/health`, each route
//! needs a bearer token and runs behind [`middleware::auth_middleware`].

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderName;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use claimdesk_shared::JwtService;
use claimdesk_shared::config::ExpenseConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Access token verification.
    pub jwt_service: Arc<JwtService>,
    /// Expense report settings.
    pub expense: Arc<ExpenseConfig>,
}

impl AppState {
    /// Bundles the pool, token service and expense settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService, expense: ExpenseConfig) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            expense: Arc::new(expense),
        }
    }
}

/// Builds the full application router.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
