//! Error-to-response mapping for handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use txlog_core::ledger::LedgerError;
use txlog_db::{TransactionError, UserError};
use txlog_shared::{AppError, TokenError};

/// Message returned for any credential failure at login.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Handler error: an [`AppError`] that renders itself as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error: self.0.error_code(),
            message: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self(match err {
            UserError::DuplicateEmail => AppError::Duplicate("Email already registered".into()),
            UserError::Invalid(e) => AppError::Validation(e.to_string()),
            UserError::InvalidCredentials | UserError::NotFound => {
                AppError::Unauthorized(INVALID_CREDENTIALS.into())
            }
            UserError::Hashing(e) => AppError::Internal(e.to_string()),
            UserError::Database(e) => AppError::Database(e.to_string()),
        })
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Validation(e) => e.into(),
            TransactionError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self(match err {
            TokenError::Encoding(_) => AppError::Internal(err.to_string()),
            TokenError::Expired => AppError::Unauthorized("Token has expired".into()),
            TokenError::SignatureInvalid | TokenError::Malformed(_) => {
                AppError::Unauthorized("Invalid or malformed token".into())
            }
        })
    }
}
