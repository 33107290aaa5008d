//! Session token issuance and verification.
//!
//! Tokens are compact HS256 JWTs carrying [`Claims`]. The signing secret is
//! handed in once at construction and never changes afterwards.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;

use crate::auth::Claims;
use crate::types::UserId;

/// Token service configuration.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            token_ttl: Duration::hours(24),
        }
    }
}

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// The MAC does not verify under the current secret.
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// The token expiry is not in the future.
    #[error("token has expired")]
    Expired,

    /// The token is not a well-formed signed token.
    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Issues and verifies signed, time-limited session tokens.
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a new token service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is enforced without clock skew tolerance.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a token for a user with the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, user_id: &UserId, email: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(user_id, email, self.config.token_ttl)
    }

    /// Issues a token with an explicit lifetime.
    ///
    /// A negative `ttl` yields a token that is already expired.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails or the expiry falls
    /// outside the representable time range.
    pub fn issue_with_ttl(
        &self,
        user_id: &UserId,
        email: &str,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding(format!("token lifetime {ttl} is out of range")))?;
        let claims = Claims::new(user_id.clone(), email, issued_at, expires_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies a token and returns its claims.
    ///
    /// The signature is checked before the expiry, so a token signed under a
    /// different secret reports `SignatureInvalid` even when it has also expired.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::SignatureInvalid` if the MAC does not match.
    /// Returns `TokenError::Expired` if `exp` is not after the current time.
    /// Returns `TokenError::Malformed` for anything that is not a decodable token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Returns the configured token lifetime in seconds.
    #[must_use]
    pub fn token_ttl_secs(&self) -> i64 {
        self.config.token_ttl.num_seconds()
    }
}
