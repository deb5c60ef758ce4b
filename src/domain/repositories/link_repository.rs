//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage handle for links.
///
/// Implementations must enforce uniqueness of `short` on insert: that check is
/// the authoritative one, any lookup done beforehand is only a fast path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - Process-local map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short id is already taken.
    /// Returns [`AppError::StorageFailure`] on any other storage error.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on storage errors.
    async fn find_by_short(&self, short: &str) -> Result<Option<Link>, AppError>;

    /// Returns true if a link with this short id exists.
    async fn exists(&self, short: &str) -> Result<bool, AppError> {
        Ok(self.find_by_short(short).await?.is_some())
    }

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the storage backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
