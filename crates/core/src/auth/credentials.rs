//! Shape checks for registration credentials.

use garde::Validate;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration input that fails shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Email is missing or not of the form `local@domain`.
    #[error("email must be a valid address")]
    InvalidEmail,

    /// Password is shorter than [`MIN_PASSWORD_LEN`].
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Email address checked with garde's `email` rule.
#[derive(Validate)]
struct EmailAddress<'a>(#[garde(email)] &'a str);

/// Validates an email address.
///
/// Requires a `local@domain` address whose local part uses the usual
/// address characters and whose domain is a valid host name.
///
/// # Errors
///
/// Returns `CredentialError::InvalidEmail` for anything else.
pub fn validate_email(email: &str) -> Result<(), CredentialError> {
    EmailAddress(email)
        .validate()
        .map_err(|_| CredentialError::InvalidEmail)
}

/// Validates a password against the length policy.
///
/// Length counts characters, not bytes.
///
/// # Errors
///
/// Returns `CredentialError::PasswordTooShort` below [`MIN_PASSWORD_LEN`].
pub fn validate_password_policy(password: &str) -> Result<(), CredentialError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}

/// Validates a full registration request.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_registration(email: &str, password: &str) -> Result<(), CredentialError> {
    validate_email(email)?;
    validate_password_policy(password)
}
