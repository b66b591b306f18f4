//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Individual click event information.
///
/// `source` is the referrer, or `"Direct"` for referrer-less traffic.
/// The user agent is omitted from JSON when absent.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub clicked_at: DateTime<Utc>,

    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}
