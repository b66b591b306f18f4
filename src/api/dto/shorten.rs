//! DTOs for the batch shortening endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request to shorten one or more URLs.
///
/// The batch is processed all-or-nothing: if any entry fails validation or
/// collides on a custom code, no link is created.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "At least one URL is required"))]
    #[validate(nested)]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UrlItem {
    /// The original URL to shorten (must be a valid absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Validity window in minutes (default: service-configured, 30 minutes).
    #[validate(range(min = 1, message = "Validity must be at least 1 minute"))]
    pub validity_minutes: Option<u32>,

    /// Optional custom short code (validated for length and characters).
    #[validate(length(min = 4, max = 32))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,
}

/// Response containing every created link, in request order.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub items: Vec<ShortLinkInfo>,
}

/// A created short link as returned to the client.
#[derive(Debug, Serialize)]
pub struct ShortLinkInfo {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
