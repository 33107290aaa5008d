//! Router test helpers backed by an in-memory database.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;
use txlog_shared::{JwtConfig, TokenService};

use crate::{AppState, create_router};

/// Builds the full router over a fresh, migrated in-memory database.
pub async fn test_app() -> (Router, AppState) {
    test_app_with_timeout(Duration::from_secs(30)).await
}

/// Like [`test_app`] with a custom per-request timeout.
pub async fn test_app_with_timeout(request_timeout: Duration) -> (Router, AppState) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    txlog_db::migrate(&db).await.expect("Failed to run migrations");

    let token_service = TokenService::new(JwtConfig {
        secret: "router-test-secret".to_string(),
        token_ttl: chrono::Duration::hours(1),
    });
    let state = AppState::new(db, token_service);

    (create_router(state.clone(), request_timeout), state)
}

/// Sends a request and returns the status with the decoded body.
///
/// Non-JSON bodies come back as a JSON string.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Builds a JSON request, optionally carrying a bearer token.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Registers a user with a fixed password and returns their token.
pub async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "email": email, "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");

    body["token"].as_str().unwrap().to_string()
}
