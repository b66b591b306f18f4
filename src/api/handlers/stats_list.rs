//! Handler for aggregated link statistics.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::pagination::StatsQueryParams;
use crate::api::dto::stats_list::{LinkStatsItem, PaginationMeta, StatsListResponse};
use crate::domain::repositories::StatsFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves aggregated statistics for all links.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
/// - `from` (optional): Start date for click counting (RFC3339)
/// - `to` (optional): End date for click counting (RFC3339)
///
/// # Response
///
/// Paginated list of every link, live and expired, in creation order, each
/// with its total click count (within the date range if one is given).
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn stats_list_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = params.pagination.page.unwrap_or(1);
    let page_size = params.pagination.page_size.unwrap_or(25);

    let filter = StatsFilter::new(offset, limit)
        .with_date_range(params.date_filter.from, params.date_filter.to);

    let (all_stats, total_items) = tokio::try_join!(
        state.stats_service.get_all_stats(filter),
        state.stats_service.count_all_links()
    )?;

    let now = Utc::now();
    let items = all_stats
        .into_iter()
        .map(|stat| LinkStatsItem {
            short_url: state.link_service.get_short_url(&state.base_url, &stat.code),
            code: stat.code,
            long_url: stat.long_url,
            created_at: stat.created_at,
            expires_at: stat.expires_at,
            expired: now > stat.expires_at,
            total: stat.total,
        })
        .collect();

    let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;

    Ok(Json(StatsListResponse {
        pagination: PaginationMeta {
            page,
            page_size,
            total_items,
            total_pages,
        },
        items,
    }))
}
