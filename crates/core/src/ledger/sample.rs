//! Synthetic transaction generator for demo and test ledgers.
//!
//! Every generated row goes through [`validate_transaction`], so samples
//! obey exactly the same rules as user-created transactions.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{CreateTransactionInput, Currency, NewTransaction, TransactionType};
use super::validation::{AMOUNT_SCALE, validate_transaction};

/// Sample size used when the caller gives none.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;
/// Largest sample generated in one request.
pub const MAX_SAMPLE_COUNT: usize = 1_000;

/// Length of generated account identifiers.
const ACCOUNT_DIGITS: usize = 12;
/// Samples are backdated by up to this many whole days.
const MAX_BACKDATE_DAYS: i64 = 365;
/// Amount bounds in cents (0.01 ..= 9999.99).
const MIN_CENTS: i64 = 1;
const MAX_CENTS: i64 = 999_999;

/// Resolves a requested sample size.
///
/// `None` means [`DEFAULT_SAMPLE_COUNT`].
///
/// # Errors
///
/// Returns `LedgerError::InvalidSampleCount` outside `1..=MAX_SAMPLE_COUNT`.
pub fn sample_count(requested: Option<i64>) -> Result<usize, LedgerError> {
    let Some(count) = requested else {
        return Ok(DEFAULT_SAMPLE_COUNT);
    };

    usize::try_from(count)
        .ok()
        .filter(|n| (1..=MAX_SAMPLE_COUNT).contains(n))
        .ok_or(LedgerError::InvalidSampleCount {
            count,
            max: MAX_SAMPLE_COUNT,
        })
}

/// Generates `count` validated synthetic transactions relative to `now`.
///
/// # Errors
///
/// Returns a `LedgerError` only if a generated row fails validation, which
/// would mean the generator bounds are wrong.
pub fn generate_sample<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<NewTransaction>, LedgerError> {
    (0..count)
        .map(|_| {
            let days_back = rng.random_range(0..MAX_BACKDATE_DAYS);
            let input = sample_input(rng);
            validate_transaction(input, now - Duration::days(days_back))
        })
        .collect()
}

fn sample_input<R: Rng + ?Sized>(rng: &mut R) -> CreateTransactionInput {
    let currency = Currency::ALL.choose(rng).copied().unwrap_or(Currency::Usd);
    let transaction_type = TransactionType::ALL
        .choose(rng)
        .copied()
        .unwrap_or(TransactionType::Transfer);

    CreateTransactionInput {
        sender_account: account_number(rng),
        receiver_account: account_number(rng),
        amount: Decimal::new(rng.random_range(MIN_CENTS..=MAX_CENTS), AMOUNT_SCALE),
        currency: currency.to_string(),
        transaction_type: transaction_type.to_string(),
    }
}

fn account_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ACCOUNT_DIGITS)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[rstest]
    #[case(None, Ok(100))]
    #[case(Some(1), Ok(1))]
    #[case(Some(1_000), Ok(1_000))]
    #[case(Some(0), Err(LedgerError::InvalidSampleCount { count: 0, max: 1_000 }))]
    #[case(Some(-5), Err(LedgerError::InvalidSampleCount { count: -5, max: 1_000 }))]
    #[case(Some(1_001), Err(LedgerError::InvalidSampleCount { count: 1_001, max: 1_000 }))]
    fn test_sample_count(#[case] requested: Option<i64>, #[case] expected: Result<usize, LedgerError>) {
        assert_eq!(sample_count(requested), expected);
    }

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = generate_sample(&mut rng, 100, Utc::now()).unwrap();
        assert_eq!(rows.len(), 100);
    }

    #[test]
    fn test_generated_rows_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();
        let rows = generate_sample(&mut rng, 500, now).unwrap();

        for row in &rows {
            assert_eq!(row.sender_account.len(), 12);
            assert!(row.sender_account.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(row.receiver_account.len(), 12);
            assert!(row.amount >= dec!(0.01) && row.amount <= dec!(9999.99));
            assert_eq!(row.amount.scale(), 2);
            assert!(row.timestamp <= now);
            assert!(row.timestamp > now - Duration::days(365));
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let rows = generate_sample(&mut rng, 1_000, Utc::now()).unwrap();
        let ids: HashSet<_> = rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), rows.len());
    }

    #[test]
    fn test_picks_cover_every_enum_value() {
        let mut rng = StdRng::seed_from_u64(99);
        let rows = generate_sample(&mut rng, 300, Utc::now()).unwrap();

        let currencies: HashSet<_> = rows.iter().map(|r| r.currency).collect();
        let types: HashSet<_> = rows.iter().map(|r| r.transaction_type).collect();
        assert_eq!(currencies.len(), Currency::ALL.len());
        assert_eq!(types.len(), TransactionType::ALL.len());
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_sample(&mut rng, 0, Utc::now()).unwrap().is_empty());
    }
}
