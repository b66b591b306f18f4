//! Click statistics service.

use std::sync::Arc;

use crate::domain::repositories::{DetailedStats, LinkStats, StatsFilter, StatsRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for retrieving click statistics.
///
/// Exposes aggregated per-link totals and detailed click histories over the
/// full registry, live and expired links alike.
pub struct StatsService<R: StatsRepository> {
    repository: Arc<R>,
}

impl<R: StatsRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves detailed statistics for a specific short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_detailed_stats(
        &self,
        code: &str,
        filter: StatsFilter,
    ) -> Result<DetailedStats, AppError> {
        self.repository
            .get_stats_by_code(code, filter)
            .await?
            .ok_or_else(|| AppError::not_found("Statistics not found", json!({ "code": code })))
    }

    /// Retrieves aggregated statistics for every link, in creation order.
    pub async fn get_all_stats(&self, filter: StatsFilter) -> Result<Vec<LinkStats>, AppError> {
        self.repository.get_all_stats(filter).await
    }

    /// Counts the total number of links in the registry.
    ///
    /// Used for pagination metadata.
    pub async fn count_all_links(&self) -> Result<u64, AppError> {
        self.repository.count_all_links().await
    }
}
