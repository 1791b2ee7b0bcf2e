//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened links.
///
/// Ownership-scoped mutations (`update`, `delete`) match on `id AND owner`
/// jointly, so a wrong owner is indistinguishable from a missing row.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the short code already exists.
    /// The unique index is the authoritative collision guard; callers retry
    /// generated codes on this error.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code. Read-only; never touches click state.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments the click count and refreshes `clicks_at`.
    ///
    /// Single-statement update: concurrent clicks on the same code are all
    /// counted. Returns `Ok(false)` when the code is unknown.
    async fn record_click(&self, code: &str) -> Result<bool, AppError>;

    /// Lists links owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<Link>, AppError>;

    /// Partially updates a link scoped by `id` and `owner`.
    ///
    /// Only fields present in [`LinkPatch`] are modified. Returns `Ok(None)`
    /// when no row matched (missing or not owned by the caller).
    async fn update(&self, id: i64, owner: i64, patch: LinkPatch)
    -> Result<Option<Link>, AppError>;

    /// Deletes a link scoped by `id` and `owner`.
    ///
    /// Returns whether a row was actually removed.
    async fn delete(&self, id: i64, owner: i64) -> Result<bool, AppError>;

    /// Cheap connectivity probe for health reporting.
    async fn ping(&self) -> Result<(), AppError>;
}
