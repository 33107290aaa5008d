//! Demo ledger seeder for Txlog development and testing.
//!
//! Creates (or reuses) a demo user and fills their ledger with synthetic
//! transactions.
//!
//! Environment:
//! - `DATABASE_URL` (required)
//! - `SEED_EMAIL` (default `demo@txlog.dev`)
//! - `SEED_PASSWORD` (default `password123`, used only when creating the user)
//! - `SEED_COUNT` (default 100, at most 1000)
//! - `SEED_RESET=1` deletes the demo user and their ledger first
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, bail};
use txlog_core::ledger::sample_count;
use txlog_db::{TransactionRepository, UserRepository};
use txlog_shared::types::UserId;

const DEFAULT_EMAIL: &str = "demo@txlog.dev";
const DEFAULT_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let email = std::env::var("SEED_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.to_string());
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());
    let requested = match std::env::var("SEED_COUNT") {
        Ok(raw) => Some(raw.trim().parse::<i64>().context("SEED_COUNT must be an integer")?),
        Err(_) => None,
    };
    let count = sample_count(requested)?;
    let reset = std::env::var("SEED_RESET").is_ok_and(|v| v == "1" || v == "true");

    println!("Connecting to database...");
    let db = txlog_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    txlog_db::migrate(&db).await.context("Failed to run migrations")?;

    let users = UserRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);

    if reset {
        if let Some(existing) = users.find_by_email(&email).await? {
            users.delete(&UserId::from(existing.id)).await?;
            println!("  Removed existing demo user and their ledger");
        }
    }

    println!("Seeding demo user {email}...");
    let user = match users.find_by_email(&email).await? {
        Some(user) => {
            println!("  Demo user already exists, reusing it");
            user
        }
        None => users.register(&email, &password).await?,
    };
    let user_id = UserId::from(user.id);

    println!("Seeding {count} transactions...");
    let written = transactions.generate_sample(&user_id, count).await?;
    if usize::try_from(written).ok() != Some(count) {
        bail!("expected {count} rows, wrote {written}");
    }

    let total = transactions.count_for_user(&user_id).await?;
    println!("Seeding complete! {email} now has {total} transactions.");
    Ok(())
}
