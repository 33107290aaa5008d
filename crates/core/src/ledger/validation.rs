//! Business rule validation for ledger operations.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use txlog_shared::types::TransactionId;

use super::error::LedgerError;
use super::types::{
    CreateTransactionInput, Currency, NewTransaction, TransactionStatus, TransactionType,
};

/// Decimal places kept for amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest amount the store accepts (`DECIMAL(15,2)`).
#[must_use]
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999, AMOUNT_SCALE)
}

/// Rounds an amount to cents and checks it is positive and storable.
///
/// Midpoints round away from zero, so `0.005` becomes `0.01`.
///
/// # Errors
///
/// Returns `LedgerError::NonPositiveAmount` if the rounded amount is not
/// above zero, `LedgerError::AmountTooLarge` if it exceeds [`max_amount`].
pub fn normalize_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);

    if rounded <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    let max = max_amount();
    if rounded > max {
        return Err(LedgerError::AmountTooLarge { max });
    }

    rounded.rescale(AMOUNT_SCALE);
    Ok(rounded)
}

/// Validates caller input and builds a transaction stamped with `timestamp`.
///
/// Account identifiers are trimmed; a fresh ID is minted and the status is
/// fixed to `Completed`.
///
/// # Errors
///
/// Returns the first rule the input breaks, checked in field order.
pub fn validate_transaction(
    input: CreateTransactionInput,
    timestamp: DateTime<Utc>,
) -> Result<NewTransaction, LedgerError> {
    let sender_account = input.sender_account.trim();
    if sender_account.is_empty() {
        return Err(LedgerError::EmptySender);
    }

    let receiver_account = input.receiver_account.trim();
    if receiver_account.is_empty() {
        return Err(LedgerError::EmptyReceiver);
    }

    let amount = normalize_amount(input.amount)?;
    let currency: Currency = input.currency.parse()?;
    let transaction_type: TransactionType = input.transaction_type.parse()?;

    Ok(NewTransaction {
        id: TransactionId::new(),
        timestamp,
        sender_account: sender_account.to_string(),
        receiver_account: receiver_account.to_string(),
        amount,
        currency,
        transaction_type,
        status: TransactionStatus::Completed,
    })
}
