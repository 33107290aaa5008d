//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod auth;
pub mod health;
pub mod transactions;

/// Creates the API router with all routes.
///
/// Authentication is applied to the whole router by the session gate;
/// see [`crate::middleware::auth`] for the public paths it lets through.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(transactions::routes())
}
