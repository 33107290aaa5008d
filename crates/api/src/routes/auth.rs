//! Authentication routes for registration and login.

use axum::{Json, Router, extract::State, routing::post};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::ApiJson};
use txlog_db::{UserRepository, entities::users};
use txlog_shared::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
    types::UserId,
};

/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "/api/auth/register";
/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(REGISTER_PATH, post(register))
        .route(LOGIN_PATH, post(login))
}

/// POST /api/auth/register - Register a new user and return a token.
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = user_repo
        .register(&payload.email, &payload.password)
        .await?;

    issue_session(&state, user).map(Json)
}

/// POST /api/auth/login - Authenticate user and return a token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = user_repo
        .authenticate(&payload.email, &payload.password)
        .await
        .inspect_err(|_| info!("Failed login attempt"))?;

    info!(user_id = %user.id, "User logged in successfully");
    issue_session(&state, user).map(Json)
}

fn issue_session(state: &AppState, user: users::Model) -> Result<AuthResponse, ApiError> {
    let user_id = UserId::from(user.id);
    let token = state.token_service.issue(&user_id, &user.email)?;

    Ok(AuthResponse {
        token,
        user: UserInfo {
            id: user_id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        },
    })
}

#[cfg(test)]
mod integration_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{json_request, send, test_app};

    #[tokio::test]
    async fn test_register_returns_token_and_user() {
        let (app, state) = test_app().await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/register",
                None,
                &json!({ "email": "a@x.com", "password": "password123" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert!(!token.is_empty());
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"].get("password").is_none());

        let claims = state.token_service.verify(token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(body["user"]["id"], claims.sub.as_str());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (app, _) = test_app().await;
        let payload = json!({ "email": "a@x.com", "password": "password123" });

        let (first, _) = send(&app, json_request("POST", "/api/auth/register", None, &payload)).await;
        let (second, body) =
            send(&app, json_request("POST", "/api/auth/register", None, &payload)).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "DUPLICATE");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let (app, _) = test_app().await;

        for payload in [
            json!({ "email": "not-an-email", "password": "password123" }),
            json!({ "email": "a@x.com", "password": "short" }),
            json!({ "email": "a@x.com" }),
        ] {
            let (status, body) =
                send(&app, json_request("POST", "/api/auth/register", None, &payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert_eq!(body["error"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let (app, _) = test_app().await;
        let payload = json!({ "email": "a@x.com", "password": "password123" });
        send(&app, json_request("POST", "/api/auth/register", None, &payload)).await;

        let (status, body) = send(&app, json_request("POST", "/api/auth/login", None, &payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["user"]["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (app, _) = test_app().await;
        send(
            &app,
            json_request(
                "POST",
                "/api/auth/register",
                None,
                &json!({ "email": "a@x.com", "password": "password123" }),
            ),
        )
        .await;

        let (wrong_status, wrong_body) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                &json!({ "email": "a@x.com", "password": "wrong-password" }),
            ),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                &json!({ "email": "nobody@x.com", "password": "password123" }),
            ),
        )
        .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
    }
}
