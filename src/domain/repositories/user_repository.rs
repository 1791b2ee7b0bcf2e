//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already registered
    /// (case-insensitive unique index). Returns [`AppError::Internal`] on
    /// other database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by email, compared case-insensitively.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Replaces the stored password hash and bumps `updated_at`.
    ///
    /// Returns `Ok(false)` when no user matched. Used only by the
    /// administrative rotation path, never by request handlers.
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<bool, AppError>;
}
