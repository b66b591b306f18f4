//! Link creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewClick, NewLink};
use crate::domain::repositories::{LinkRepository, Resolution};
use crate::error::AppError;
use crate::utils::code_generator::validate_custom_code;
use crate::utils::url_normalizer::normalize_url;

/// A single entry of a batch shortening request, as seen by the service.
#[derive(Debug, Clone)]
pub struct ShortenCommand {
    pub url: String,
    /// Validity window in minutes; the service default applies when absent.
    pub validity_minutes: Option<u32>,
    pub custom_code: Option<String>,
}

/// Service for creating and resolving shortened links.
///
/// Validates and normalizes every URL in a batch before the registry is
/// touched, computes validity windows, and delegates the atomic
/// check-and-insert to the repository.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    default_validity_minutes: u32,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, default_validity_minutes: u32) -> Self {
        Self {
            link_repository,
            default_validity_minutes,
        }
    }

    /// Creates short links for a batch of requests, all-or-nothing.
    ///
    /// Every URL is validated and normalized up front; any failure rejects
    /// the entire batch before the registry is touched. Custom-code
    /// uniqueness (against the registry and within the batch) is enforced by
    /// the repository inside a single critical section.
    ///
    /// On success the created links are returned in request order and the
    /// registry has grown by exactly `requests.len()` entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL, an invalid
    /// custom code, or a zero validity window.
    /// Returns [`AppError::Conflict`] if a custom code is already taken.
    pub async fn create_batch(&self, requests: Vec<ShortenCommand>) -> Result<Vec<Link>, AppError> {
        let created_at = Utc::now();

        let mut drafts = Vec::with_capacity(requests.len());
        for request in &requests {
            if let Some(code) = &request.custom_code {
                validate_custom_code(code)?;
            }

            let validity = request
                .validity_minutes
                .unwrap_or(self.default_validity_minutes);
            if validity == 0 {
                return Err(AppError::bad_request(
                    "Validity must be a positive number of minutes",
                    json!({ "url": request.url }),
                ));
            }

            let normalized_url = normalize_url(&request.url).map_err(|e| {
                AppError::bad_request(
                    "Invalid URL format",
                    json!({ "url": request.url, "reason": e.to_string() }),
                )
            })?;

            drafts.push(NewLink::with_validity(
                request.custom_code.clone(),
                normalized_url,
                created_at,
                validity,
            ));
        }

        let links = self.link_repository.insert_batch(drafts).await?;
        tracing::info!(count = links.len(), "created short links");
        Ok(links)
    }

    /// Resolves a short code at time `now`, recording a click on success.
    pub async fn resolve(
        &self,
        code: &str,
        now: DateTime<Utc>,
        click: NewClick,
    ) -> Result<Resolution, AppError> {
        let resolution = self.link_repository.resolve(code, now, click).await?;
        tracing::debug!(code, outcome = resolution_kind(&resolution), "resolved short code");
        Ok(resolution)
    }

    /// Lists every link, live and expired, in creation order.
    pub async fn list(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Constructs the full short URL for a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

fn resolution_kind(resolution: &Resolution) -> &'static str {
    match resolution {
        Resolution::Redirect(_) => "redirect",
        Resolution::Expired => "expired",
        Resolution::NotFound => "not_found",
    }
}
