//! Repository trait for short link storage and resolution.

use crate::domain::entities::{Link, NewClick, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Outcome of resolving an incoming path against the registry.
///
/// `Expired` and `NotFound` are normal resolution outcomes, not faults.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The code matched a live link; one click was recorded.
    Redirect(Link),
    /// The code matched a link whose validity window has elapsed.
    /// No click was recorded.
    Expired,
    /// No link carries this code.
    NotFound,
}

/// Repository interface for the link registry.
///
/// Implementations must make `insert_batch` and `resolve` atomic with
/// respect to concurrent calls: uniqueness checking and insertion are one
/// operation, as are the expiry check and the click append.
///
/// # Implementations
///
/// - [`crate::infrastructure::registry::MemoryRegistry`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a batch of links, all-or-nothing.
    ///
    /// Entries without a code are assigned a generated one, retried until it
    /// collides with neither the registry nor a code already claimed by the
    /// batch. Entries with a code are checked for uniqueness the same way.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] naming the offending code if a
    /// user-supplied code already exists; nothing is inserted.
    /// Returns [`AppError::Internal`] if code generation exhausts its
    /// collision-retry budget.
    async fn insert_batch(&self, batch: Vec<NewLink>) -> Result<Vec<Link>, AppError>;

    /// Resolves a short code at time `now`.
    ///
    /// A live match records exactly one click (built from `click` with
    /// `now` as its timestamp) before returning
    /// [`Resolution::Redirect`]. An expired match records nothing.
    async fn resolve(
        &self,
        code: &str,
        now: DateTime<Utc>,
        click: NewClick,
    ) -> Result<Resolution, AppError>;

    /// Finds a link by its short code, live or expired.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, live and expired, in creation order.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Counts links in the registry.
    async fn count(&self) -> Result<u64, AppError>;
}
