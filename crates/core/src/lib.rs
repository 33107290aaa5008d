//! Core business logic for Txlog.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and generators live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and credential shape checks
//! - `ledger` - Transaction domain types, validation and sample generation

pub mod auth;
pub mod ledger;
