//! Repository trait for click statistics.

use crate::domain::entities::{Click, Link};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Aggregated statistics for a single link.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub total: u64,
}

/// Detailed statistics with individual click records.
///
/// `total` counts every click on the link; `items` is the page selected by
/// the query filter.
#[derive(Debug, Clone)]
pub struct DetailedStats {
    pub link: Link,
    pub total: u64,
    pub items: Vec<Click>,
}

/// Filter criteria for statistics queries.
///
/// Supports pagination and an optional date range on click timestamps.
#[derive(Debug, Clone)]
pub struct StatsFilter {
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub offset: usize,
    pub limit: usize,
}

impl StatsFilter {
    /// Creates a new filter with pagination parameters.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            from_date: None,
            to_date: None,
            offset,
            limit,
        }
    }

    /// Adds date range filtering to the query.
    pub fn with_date_range(
        mut self,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }
}

/// Repository interface for statistics queries over the registry.
///
/// Read-only: click recording happens inside
/// [`crate::domain::repositories::LinkRepository::resolve`].
///
/// # Implementations
///
/// - [`crate::infrastructure::registry::MemoryRegistry`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Retrieves detailed statistics for a specific short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(DetailedStats))` if the link exists (live or expired)
    /// - `Ok(None)` if the code is unknown
    async fn get_stats_by_code(
        &self,
        code: &str,
        filter: StatsFilter,
    ) -> Result<Option<DetailedStats>, AppError>;

    /// Retrieves aggregated statistics for every link, in creation order,
    /// paginated by the filter's offset/limit.
    async fn get_all_stats(&self, filter: StatsFilter) -> Result<Vec<LinkStats>, AppError>;

    /// Counts the total number of links in the registry.
    async fn count_all_links(&self) -> Result<u64, AppError>;
}
