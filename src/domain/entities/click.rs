//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// Fallback referrer source recorded when the client sends no Referer header.
pub const DIRECT_SOURCE: &str = "Direct";

/// A click event recorded when a shortened link is resolved.
///
/// Captures when the redirect happened and where the visitor came from.
/// `source` is never empty: requests without a referrer are attributed to
/// [`DIRECT_SOURCE`].
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub clicked_at: DateTime<Utc>,
    pub source: String,
    pub user_agent: Option<String>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(clicked_at: DateTime<Utc>, source: String, user_agent: Option<String>) -> Self {
        Self {
            clicked_at,
            source,
            user_agent,
        }
    }
}

/// Input data for recording a new click event.
///
/// `referer` is the raw header value; [`NewClick::source`] applies the
/// direct-traffic fallback. The timestamp is supplied by the resolver so the
/// click and the resolution share one notion of "now".
#[derive(Debug, Clone)]
pub struct NewClick {
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

impl NewClick {
    pub fn new(referer: Option<&str>, user_agent: Option<&str>) -> Self {
        Self {
            referer: referer.map(|s| s.to_string()),
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }

    /// Resolves the referrer source, falling back to [`DIRECT_SOURCE`] when
    /// the referrer is missing or empty.
    pub fn source(&self) -> String {
        match self.referer.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => DIRECT_SOURCE.to_string(),
        }
    }
}
