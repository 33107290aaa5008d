//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - The session gate authentication middleware
//! - Request extractors
//! - Error-to-response mapping

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::{sync::Arc, time::Duration};

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use txlog_shared::TokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Token service for issuing and verifying session tokens.
    pub token_service: Arc<TokenService>,
}

impl AppState {
    /// Creates the state from a connection pool and a token service.
    #[must_use]
    pub fn new(db: DatabaseConnection, token_service: TokenService) -> Self {
        Self {
            db: Arc::new(db),
            token_service: Arc::new(token_service),
        }
    }
}

/// Creates the main application router.
///
/// Every route passes through the session gate; register, login and the
/// health check are the only paths it lets through without a token.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::session_gate,
        ))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
