//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// The mapping store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Stores a new short link with `hits = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Unavailable`] if the database cannot be reached.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Looks up the original URL stored for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if not found
    async fn find_original_url(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Atomically increments the hit counter of a short code.
    ///
    /// Returns `Ok(false)` if no link has that code.
    async fn increment_hits(&self, short_code: &str) -> Result<bool, AppError>;

    /// Fetches the full record for a short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Lists links, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums the hit counters of all links.
    async fn total_hits(&self) -> Result<i64, AppError>;
}
