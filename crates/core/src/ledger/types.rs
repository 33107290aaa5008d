//! Ledger domain types for transaction creation and validation.
//!
//! Enumerated fields are stored as their exact string names (`"USD"`,
//! `"Transfer"`, `"Completed"`); parsing is case-sensitive.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use txlog_shared::types::TransactionId;

use super::error::LedgerError;

/// Currency code of a transaction amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US dollar.
    #[serde(rename = "USD")]
    Usd,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
    /// Pound sterling.
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Eur, Self::Gbp];

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| LedgerError::UnknownCurrency(s.to_string()))
    }
}

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Movement between two accounts.
    Transfer,
    /// Money paid in.
    Deposit,
    /// Money paid out.
    Withdrawal,
}

impl TransactionType {
    /// All supported transaction types.
    pub const ALL: [Self; 3] = [Self::Transfer, Self::Deposit, Self::Withdrawal];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "Transfer",
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LedgerError::UnknownTransactionType(s.to_string()))
    }
}

/// Transaction status.
///
/// Every recorded transaction is complete; there is no approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Recorded and final.
    Completed,
}

impl TransactionStatus {
    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied input for creating a transaction.
///
/// Enumerated fields arrive as raw strings so that unknown values surface
/// as ledger validation errors instead of body-parsing failures.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionInput {
    /// Sending account identifier.
    pub sender_account: String,
    /// Receiving account identifier.
    pub receiver_account: String,
    /// Amount, accepted as a JSON number or string.
    pub amount: Decimal,
    /// Currency code (`USD`, `EUR` or `GBP`).
    pub currency: String,
    /// Transaction type (`Transfer`, `Deposit` or `Withdrawal`).
    pub transaction_type: String,
}

/// A validated transaction ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Freshly minted identifier.
    pub id: TransactionId,
    /// When the transaction occurred.
    pub timestamp: DateTime<Utc>,
    /// Sending account identifier (trimmed, non-empty).
    pub sender_account: String,
    /// Receiving account identifier (trimmed, non-empty).
    pub receiver_account: String,
    /// Positive amount with exactly 2 decimal places.
    pub amount: Decimal,
    /// Currency code.
    pub currency: Currency,
    /// Transaction type.
    pub transaction_type: TransactionType,
    /// Always `Completed`.
    pub status: TransactionStatus,
}
