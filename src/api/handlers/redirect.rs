//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde_json::json;

use crate::domain::entities::NewClick;
use crate::domain::repositories::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Build the click record from the `Referer` and `User-Agent` headers
///    (missing referrer is attributed to direct traffic)
/// 2. Resolve the code against the registry at the current time; a live
///    match records the click atomically with the lookup
/// 3. Return 307 Temporary Redirect to the original URL
///
/// Codes match exactly and case-sensitively. Every successful resolution
/// counts as a new click.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link's validity window has elapsed; expired
/// links record no clicks.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let click = NewClick::new(
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    match state.link_service.resolve(&code, Utc::now(), click).await? {
        Resolution::Redirect(link) => Ok(Redirect::temporary(&link.long_url)),
        Resolution::Expired => Err(AppError::gone(
            "Short link has expired",
            json!({ "code": code }),
        )),
        Resolution::NotFound => Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        )),
    }
}
