//! Handler for detailed link statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::clicks::ClickInfo;
use crate::api::dto::pagination::StatsQueryParams;
use crate::api::dto::stats::StatsResponse;
use crate::api::dto::stats_list::PaginationMeta;
use crate::domain::repositories::StatsFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves detailed statistics for a specific short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
/// - `from` (optional): Start of click date range (RFC3339)
/// - `to` (optional): End of click date range (RFC3339)
///
/// # Response
///
/// Link metadata, total click count, and the selected page of click
/// records in chronological order. Expired links are included.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = params.pagination.page.unwrap_or(1);
    let page_size = params.pagination.page_size.unwrap_or(25);

    let filter = StatsFilter::new(offset, limit)
        .with_date_range(params.date_filter.from, params.date_filter.to);

    let detailed = state.stats_service.get_detailed_stats(&code, filter).await?;

    let total_pages = (detailed.total as f64 / page_size as f64).ceil() as u32;

    let expired = detailed.link.is_expired_at(Utc::now());

    Ok(Json(StatsResponse {
        pagination: PaginationMeta {
            page,
            page_size,
            total_items: detailed.total,
            total_pages,
        },
        code: detailed.link.code,
        long_url: detailed.link.long_url,
        created_at: detailed.link.created_at,
        expires_at: detailed.link.expires_at,
        expired,
        total: detailed.total,
        items: detailed
            .items
            .into_iter()
            .map(|click| ClickInfo {
                clicked_at: click.clicked_at,
                source: click.source,
                user_agent: click.user_agent,
            })
            .collect(),
    }))
}
