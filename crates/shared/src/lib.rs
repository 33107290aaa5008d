//! Shared types, errors, and configuration for Txlog.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for users and transactions
//! - Pagination types for list endpoints
//! - Session token claims and the token service that signs them
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod auth_tests;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtConfig, TokenError, TokenService};
