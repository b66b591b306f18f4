#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::sync::Arc;

use link_registry::domain::entities::NewLink;
use link_registry::domain::repositories::LinkRepository;
use link_registry::infrastructure::registry::MemoryRegistry;
use link_registry::state::AppState;
use link_registry::utils::code_generator::RandomCodeGenerator;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Builds application state over a fresh in-memory registry.
///
/// The registry handle is returned alongside so tests can seed links
/// directly, including ones with timestamps in the past.
pub fn create_test_state() -> (AppState, Arc<MemoryRegistry>) {
    let registry = Arc::new(MemoryRegistry::new(Arc::new(
        RandomCodeGenerator::default(),
    )));

    let state = AppState::new(registry.clone(), 30, TEST_BASE_URL.to_string());

    (state, registry)
}

pub async fn create_test_link(registry: &MemoryRegistry, code: &str, url: &str) {
    registry
        .insert_batch(vec![NewLink::with_validity(
            Some(code.to_string()),
            url.to_string(),
            Utc::now(),
            30,
        )])
        .await
        .unwrap();
}

pub async fn create_expired_link(registry: &MemoryRegistry, code: &str, url: &str) {
    registry
        .insert_batch(vec![NewLink::with_validity(
            Some(code.to_string()),
            url.to_string(),
            Utc::now() - Duration::hours(1),
            1,
        )])
        .await
        .unwrap();
}
