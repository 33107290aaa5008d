//! Transaction ledger logic.
//!
//! This module implements:
//! - Domain types for transactions (currency, type, status)
//! - Business rule validation for new transactions
//! - Synthetic sample generation
//! - Error types for ledger operations

pub mod error;
pub mod sample;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use sample::{DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT, generate_sample, sample_count};
pub use types::{
    CreateTransactionInput, Currency, NewTransaction, TransactionStatus, TransactionType,
};
pub use validation::{AMOUNT_SCALE, max_amount, normalize_amount, validate_transaction};
