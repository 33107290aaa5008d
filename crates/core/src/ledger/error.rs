//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating ledger input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Sender account is empty or blank.
    #[error("sender_account is required")]
    EmptySender,

    /// Receiver account is empty or blank.
    #[error("receiver_account is required")]
    EmptyReceiver,

    /// Amount is zero or negative after rounding to cents.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// Amount does not fit the stored precision.
    #[error("amount exceeds the maximum of {max}")]
    AmountTooLarge {
        /// Largest storable amount.
        max: Decimal,
    },

    /// Currency is not one of the supported codes.
    #[error("unsupported currency: {0:?} (expected USD, EUR or GBP)")]
    UnknownCurrency(String),

    /// Transaction type is not one of the supported names.
    #[error("unsupported transaction_type: {0:?} (expected Transfer, Deposit or Withdrawal)")]
    UnknownTransactionType(String),

    /// Requested sample size is out of range.
    #[error("count must be between 1 and {max}, got {count}")]
    InvalidSampleCount {
        /// Requested count.
        count: i64,
        /// Largest accepted count.
        max: usize,
    },
}
