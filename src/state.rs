//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::infrastructure::registry::MemoryRegistry;

/// Application state shared across handlers.
///
/// The registry is constructed once at startup and dropped at shutdown;
/// both services hold handles to the same instance.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<MemoryRegistry>>,
    pub stats_service: Arc<StatsService<MemoryRegistry>>,
    /// Public base used when rendering short URLs.
    pub base_url: String,
}

impl AppState {
    /// Creates the application state around a shared registry.
    pub fn new(registry: Arc<MemoryRegistry>, default_validity_minutes: u32, base_url: String) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(registry.clone(), default_validity_minutes)),
            stats_service: Arc::new(StatsService::new(registry)),
            base_url,
        }
    }
}
