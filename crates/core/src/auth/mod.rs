//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Registration credential checks

mod credentials;
mod password;

pub use credentials::{
    CredentialError, MIN_PASSWORD_LEN, validate_email, validate_password_policy,
    validate_registration,
};
pub use password::{PasswordError, hash_password, verify_password};
