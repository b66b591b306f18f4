//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with metadata.
///
/// Represents the mapping between a short code and a long URL, together with
/// its validity window and the number of clicks recorded so far. `created_at`
/// and `expires_at` are immutable after creation; only `click_count` advances.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        click_count: u64,
    ) -> Self {
        Self {
            code,
            long_url,
            created_at,
            expires_at,
            click_count,
        }
    }

    /// Returns true if the link's validity window has elapsed at `now`.
    ///
    /// The comparison is strict: a resolution at exactly `expires_at` still
    /// counts as live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Input data for creating a new link.
///
/// `code` is `None` when the registry should generate one. Timestamps are
/// computed by the caller so that `expires_at == created_at + validity`
/// holds exactly.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: Option<String>,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewLink {
    /// Builds a draft whose validity window starts at `created_at` and lasts
    /// `validity_minutes`.
    pub fn with_validity(
        code: Option<String>,
        long_url: String,
        created_at: DateTime<Utc>,
        validity_minutes: u32,
    ) -> Self {
        Self {
            code,
            long_url,
            created_at,
            expires_at: created_at + chrono::Duration::minutes(i64::from(validity_minutes)),
        }
    }
}
