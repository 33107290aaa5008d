//! Property-based tests for transaction validation rules.

use chrono::Utc;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::sample::generate_sample;
use super::types::CreateTransactionInput;
use super::validation::validate_transaction;

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a zero or negative amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy for a non-blank account identifier.
fn account() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,24}"
}

/// Strategy for a whitespace-only account identifier.
fn blank() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

fn currency() -> impl Strategy<Value = String> {
    prop_oneof![Just("USD"), Just("EUR"), Just("GBP")].prop_map(str::to_string)
}

fn transaction_type() -> impl Strategy<Value = String> {
    prop_oneof![Just("Transfer"), Just("Deposit"), Just("Withdrawal")].prop_map(str::to_string)
}

fn make_input(
    sender: String,
    receiver: String,
    amount: Decimal,
    currency: String,
    transaction_type: String,
) -> CreateTransactionInput {
    CreateTransactionInput {
        sender_account: sender,
        receiver_account: receiver,
        amount,
        currency,
        transaction_type,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any well-formed input is accepted and its amount preserved to the cent.
    #[test]
    fn prop_valid_input_accepted(
        sender in account(),
        receiver in account(),
        amount in positive_amount(),
        currency in currency(),
        tx_type in transaction_type(),
    ) {
        let tx = validate_transaction(
            make_input(sender.clone(), receiver.clone(), amount, currency.clone(), tx_type.clone()),
            Utc::now(),
        ).unwrap();

        prop_assert_eq!(tx.amount, amount);
        prop_assert_eq!(tx.amount.scale(), 2);
        prop_assert!(tx.amount > Decimal::ZERO);
        prop_assert_eq!(tx.sender_account, sender);
        prop_assert_eq!(tx.receiver_account, receiver);
        prop_assert_eq!(tx.currency.to_string(), currency);
        prop_assert_eq!(tx.transaction_type.to_string(), tx_type);
        prop_assert_eq!(tx.status.as_str(), "Completed");
    }

    /// Zero and negative amounts are always rejected.
    #[test]
    fn prop_non_positive_amount_rejected(
        sender in account(),
        receiver in account(),
        amount in non_positive_amount(),
        currency in currency(),
        tx_type in transaction_type(),
    ) {
        let result = validate_transaction(
            make_input(sender, receiver, amount, currency, tx_type),
            Utc::now(),
        );
        prop_assert_eq!(result, Err(LedgerError::NonPositiveAmount));
    }

    /// A blank sender is rejected whatever else the input holds.
    #[test]
    fn prop_blank_sender_rejected(
        sender in blank(),
        receiver in account(),
        amount in positive_amount(),
        currency in currency(),
        tx_type in transaction_type(),
    ) {
        let result = validate_transaction(
            make_input(sender, receiver, amount, currency, tx_type),
            Utc::now(),
        );
        prop_assert_eq!(result, Err(LedgerError::EmptySender));
    }

    /// A blank receiver is rejected whatever else the input holds.
    #[test]
    fn prop_blank_receiver_rejected(
        sender in account(),
        receiver in blank(),
        amount in positive_amount(),
        currency in currency(),
        tx_type in transaction_type(),
    ) {
        let result = validate_transaction(
            make_input(sender, receiver, amount, currency, tx_type),
            Utc::now(),
        );
        prop_assert_eq!(result, Err(LedgerError::EmptyReceiver));
    }

    /// Generated samples always pass validation, for any seed and size.
    #[test]
    fn prop_sample_always_valid(seed in any::<u64>(), count in 0usize..200) {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = generate_sample(&mut rng, count, Utc::now()).unwrap();

        prop_assert_eq!(rows.len(), count);
        for row in rows {
            prop_assert!(row.amount > Decimal::ZERO);
            prop_assert!(!row.sender_account.is_empty());
            prop_assert!(!row.receiver_account.is_empty());
        }
    }
}
