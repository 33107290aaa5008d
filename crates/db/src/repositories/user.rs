//! User directory: user records keyed by email.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use txlog_core::auth::{
    CredentialError, PasswordError, hash_password, validate_registration, verify_password,
};
use txlog_shared::types::UserId;

use crate::entities::users;

/// Error types for user directory operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// The email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// Registration input has the wrong shape.
    #[error(transparent)]
    Invalid(#[from] CredentialError),

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No user with the given key.
    #[error("user not found")]
    NotFound,

    /// Password hashing or verification failed for a system reason.
    #[error("password hashing failed: {0}")]
    Hashing(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Gets a user by email, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if no user has this email.
    pub async fn get_by_email(&self, email: &str) -> Result<users::Model, UserError> {
        self.find_by_email(email).await?.ok_or(UserError::NotFound)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.as_str()).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a user with an already hashed password.
    ///
    /// The unique index on `email` is the final word on duplicates, so a
    /// concurrent registration that slips past any pre-check still fails
    /// cleanly here.
    ///
    /// # Errors
    ///
    /// Returns `UserError::DuplicateEmail` on a uniqueness violation.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<users::Model, UserError> {
        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(email.to_string()),
            password: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail,
            _ => UserError::Database(e),
        })
    }

    /// Registers a new user from a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns `UserError::Invalid` for a malformed email or short password,
    /// `UserError::DuplicateEmail` if the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<users::Model, UserError> {
        let email = email.trim();
        validate_registration(email, password)?;

        if self.email_exists(email).await? {
            return Err(UserError::DuplicateEmail);
        }

        let password_hash = hash_blocking(password.to_string()).await?;
        let user = self.create(email, &password_hash).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Checks an email and password pair.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidCredentials` for an unknown email or a
    /// wrong password alike.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<users::Model, UserError> {
        let user = match self.get_by_email(email.trim()).await {
            Ok(user) => user,
            Err(UserError::NotFound) => {
                tracing::debug!("login attempt for unknown email");
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        match verify_blocking(password.to_string(), user.password.clone()).await {
            Ok(()) => Ok(user),
            Err(PasswordError::Mismatch) => {
                tracing::debug!(user_id = %user.id, "login attempt with wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(e) => Err(UserError::Hashing(e)),
        }
    }

    /// Deletes a user and, by cascade, all of their transactions.
    ///
    /// Returns whether a user was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: &UserId) -> Result<bool, DbErr> {
        let result = users::Entity::delete_by_id(id.as_str()).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

/// Runs Argon2 hashing on the blocking pool.
async fn hash_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(e.to_string()))?
}

/// Runs Argon2 verification on the blocking pool.
async fn verify_blocking(password: String, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::VerifyError(e.to_string()))?
}
