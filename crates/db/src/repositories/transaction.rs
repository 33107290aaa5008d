//! Transaction repository: the per-user ledger.
//!
//! Every operation is scoped to one owning user. Rows are immutable once
//! written; the only removal path is the cascade from deleting their user.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use txlog_core::ledger::{self, CreateTransactionInput, LedgerError, NewTransaction};
use txlog_shared::types::{PageRequest, UserId};

use crate::entities::transactions;

/// Rows per multi-row INSERT inside a batch.
const INSERT_CHUNK_SIZE: usize = 25;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Input broke a ledger rule; nothing was written.
    #[error(transparent)]
    Validation(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Transaction repository for ledger operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and records a transaction for a user, stamped now.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::Validation` if the input breaks a ledger
    /// rule, in which case nothing is persisted.
    pub async fn create(
        &self,
        user_id: &UserId,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let now = Utc::now();
        let new = ledger::validate_transaction(input, now)?;

        let model = to_active_model(user_id, new, now).insert(&self.db).await?;

        tracing::info!(
            user_id = %user_id,
            transaction_id = %model.id,
            amount = %model.amount,
            currency = %model.currency,
            "transaction created"
        );
        Ok(model)
    }

    /// Lists one page of a user's transactions, newest first.
    ///
    /// Ties on `timestamp` are broken by `id` descending so that pages are
    /// stable. Returns the page together with the user's total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), DbErr> {
        let total = self.count_for_user(user_id).await?;

        let items = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.as_str()))
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Counts all transactions owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_for_user(&self, user_id: &UserId) -> Result<u64, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.as_str()))
            .count(&self.db)
            .await
    }

    /// Inserts already validated transactions for a user, all or nothing.
    ///
    /// The rows are written inside a single database transaction; any
    /// failure rolls the whole batch back. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::Database` if any insert or the commit fails.
    pub async fn insert_batch(
        &self,
        user_id: &UserId,
        rows: Vec<NewTransaction>,
    ) -> Result<u64, TransactionError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;

        match insert_chunks(&txn, user_id, rows).await {
            Ok(written) => {
                txn.commit().await?;
                Ok(written)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "batch rollback failed");
                }
                Err(e.into())
            }
        }
    }

    /// Generates and atomically stores `count` synthetic transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if generation or the batch insert fails; in that
    /// case no rows are left behind.
    pub async fn generate_sample(
        &self,
        user_id: &UserId,
        count: usize,
    ) -> Result<u64, TransactionError> {
        let rows = {
            let mut rng = rand::rng();
            ledger::generate_sample(&mut rng, count, Utc::now())?
        };

        let written = self.insert_batch(user_id, rows).await?;
        tracing::info!(user_id = %user_id, count = written, "sample transactions generated");
        Ok(written)
    }
}

async fn insert_chunks(
    txn: &DatabaseTransaction,
    user_id: &UserId,
    rows: Vec<NewTransaction>,
) -> Result<u64, DbErr> {
    let now = Utc::now();
    let models: Vec<transactions::ActiveModel> = rows
        .into_iter()
        .map(|row| to_active_model(user_id, row, now))
        .collect();

    let mut written = 0;
    for chunk in models.chunks(INSERT_CHUNK_SIZE) {
        written += transactions::Entity::insert_many(chunk.to_vec())
            .exec_without_returning(txn)
            .await?;
    }
    Ok(written)
}

fn to_active_model(
    user_id: &UserId,
    row: NewTransaction,
    created_at: DateTime<Utc>,
) -> transactions::ActiveModel {
    transactions::ActiveModel {
        id: Set(row.id.into_inner()),
        timestamp: Set(row.timestamp),
        sender_account: Set(row.sender_account),
        receiver_account: Set(row.receiver_account),
        amount: Set(row.amount),
        currency: Set(row.currency.to_string()),
        transaction_type: Set(row.transaction_type.to_string()),
        status: Set(row.status.to_string()),
        created_at: Set(Some(created_at)),
        user_id: Set(user_id.as_str().to_string()),
    }
}
