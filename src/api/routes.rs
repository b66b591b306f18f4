//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler, stats_list_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// API routes.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create shortened URLs (batch, all-or-nothing)
/// - `GET  /stats`         - Aggregated click statistics (paginated)
/// - `GET  /stats/{code}`  - Detailed statistics for a specific link
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats", get(stats_list_handler))
        .route("/stats/{code}", get(stats_handler))
}
