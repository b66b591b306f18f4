//! Handler for the batch shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortLinkInfo, ShortenRequest, ShortenResponse};
use crate::application::services::ShortenCommand;
use crate::error::AppError;
use crate::state::AppState;

/// Creates shortened URLs for one or more long URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Semantics
///
/// All-or-nothing: if any entry has a malformed URL, an invalid custom code,
/// or a custom code that is already taken, the whole batch is rejected and
/// the registry is left unchanged.
///
/// # Request Body
///
/// ```json
/// {
///   "urls": [
///     {
///       "url": "https://example.com",
///       "validity_minutes": 30,      // optional
///       "custom_code": "my-link"     // optional
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request on validation failure and 409 Conflict when a
/// custom code already exists, naming the offending code.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let commands = payload
        .urls
        .into_iter()
        .map(|item| ShortenCommand {
            url: item.url,
            validity_minutes: item.validity_minutes,
            custom_code: item.custom_code,
        })
        .collect();

    let links = state.link_service.create_batch(commands).await?;

    let items = links
        .into_iter()
        .map(|link| ShortLinkInfo {
            short_url: state.link_service.get_short_url(&state.base_url, &link.code),
            code: link.code,
            long_url: link.long_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
        })
        .collect();

    Ok(Json(ShortenResponse { items }))
}
