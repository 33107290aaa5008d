//! Transaction routes: create, list and sample generation.
//!
//! All routes act on the ledger of the authenticated caller only.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::auth::AuthUser};
use txlog_core::ledger::{AMOUNT_SCALE, CreateTransactionInput, sample_count};
use txlog_db::{TransactionRepository, entities::transactions};
use txlog_shared::{
    AppError,
    types::{PageRequest, PageResponse},
};

/// Creates the transaction router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/api/transactions/generatesample", post(generate_sample))
}

/// Transaction as returned by the API.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// When the transaction occurred.
    pub timestamp: DateTime<Utc>,
    /// Sending account identifier.
    pub sender_account: String,
    /// Receiving account identifier.
    pub receiver_account: String,
    /// Amount, serialized as a string with 2 decimal places.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Transaction type.
    pub transaction_type: String,
    /// Status (always "Completed").
    pub status: String,
    /// Owning user ID.
    pub user_id: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        let mut amount = model.amount.round_dp(AMOUNT_SCALE);
        amount.rescale(AMOUNT_SCALE);

        Self {
            id: model.id,
            timestamp: model.timestamp,
            sender_account: model.sender_account,
            receiver_account: model.receiver_account,
            amount,
            currency: model.currency,
            transaction_type: model.transaction_type,
            status: model.status,
            user_id: model.user_id,
        }
    }
}

/// Query parameters for listing.
///
/// Kept as raw strings: unparsable values fall back to defaults.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page number (1-indexed).
    pub page: Option<String>,
    /// Items per page.
    pub page_size: Option<String>,
}

/// Query parameters for sample generation.
#[derive(Debug, Deserialize)]
pub struct SampleQuery {
    /// Number of transactions to generate.
    pub count: Option<String>,
}

/// GET /api/transactions - List the caller's transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<TransactionResponse>>, ApiError> {
    let page = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref());
    let repo = TransactionRepository::new((*state.db).clone());

    let (items, total) = repo.list(user.user_id(), page).await?;
    let data = items.into_iter().map(TransactionResponse::from).collect();

    Ok(Json(PageResponse::new(data, page, total)))
}

/// POST /api/transactions - Record a transaction for the caller.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateTransactionInput>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let repo = TransactionRepository::new((*state.db).clone());

    let model = repo.create(user.user_id(), payload).await?;

    Ok((StatusCode::CREATED, Json(model.into())))
}

/// POST /api/transactions/generatesample - Generate a synthetic ledger.
async fn generate_sample(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SampleQuery>,
) -> Result<(StatusCode, String), ApiError> {
    let requested = query
        .count
        .as_deref()
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| AppError::Validation(format!("count must be an integer, got {raw:?}")))
        })
        .transpose()?;
    let count = sample_count(requested)?;

    let repo = TransactionRepository::new((*state.db).clone());
    let written = repo.generate_sample(user.user_id(), count).await?;

    Ok((
        StatusCode::CREATED,
        format!("Successfully generated {written} transactions"),
    ))
}
