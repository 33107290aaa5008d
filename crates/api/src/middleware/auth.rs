//! Session gate: bearer-token authentication for every non-public route.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use txlog_shared::{AppError, Claims, TokenError, TokenService, types::UserId};

use crate::{AppState, error::ApiError, routes};

/// Paths reachable without a token.
const PUBLIC_PATHS: [&str; 3] = [
    routes::auth::REGISTER_PATH,
    routes::auth::LOGIN_PATH,
    routes::health::HEALTH_PATH,
];

/// Reasons the gate turns a request away.
#[derive(Debug, Error)]
pub enum GateError {
    /// No token was presented.
    #[error("authorization token is required")]
    MissingCredential,

    /// A token was presented but did not verify.
    #[error("invalid token: {0}")]
    InvalidCredential(#[from] TokenError),
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MissingCredential => Self(AppError::Unauthorized(
                "Authorization header with Bearer token is required".into(),
            )),
            GateError::InvalidCredential(e) => e.into(),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Returns the token carried by an Authorization header value.
///
/// The `Bearer ` prefix is optional and case-sensitive; without it the
/// whole value is taken as the token.
pub fn extract_bearer_token(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header).trim()
}

/// Resolves the claims for a request's headers.
///
/// # Errors
///
/// Returns `GateError::MissingCredential` when there is no usable token and
/// `GateError::InvalidCredential` when the token does not verify.
pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> Result<Claims, GateError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(GateError::MissingCredential);
    };
    let header = value
        .to_str()
        .map_err(|_| TokenError::Malformed("authorization header is not valid text".into()))?;

    let token = extract_bearer_token(header);
    if token.is_empty() {
        return Err(GateError::MissingCredential);
    }

    Ok(tokens.verify(token)?)
}

/// Authentication middleware applied to the whole router.
///
/// This middleware:
/// 1. Lets public paths (register, login, health) through untouched
/// 2. Verifies the bearer token with the token service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    match authenticate(&state.token_service, request.headers()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, path = %request.uri().path(), "request rejected by session gate");
            e.into_response()
        }
    }
}

/// Extractor for the authenticated identity.
///
/// Use this in handlers to get the caller's user ID:
///
/// ```ignore
/// async fn handler(user: AuthUser) -> impl IntoResponse {
///     let user_id = user.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = GateError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(GateError::MissingCredential)
    }
}
