//! DTOs for aggregated link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Paginated list of link statistics, in creation order.
#[derive(Debug, Serialize)]
pub struct StatsListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkStatsItem>,
}

/// Aggregated statistics for a single link.
///
/// Expired links stay listed; `expired` distinguishes them.
#[derive(Debug, Serialize)]
pub struct LinkStatsItem {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expired: bool,
    pub total: u64,
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}
