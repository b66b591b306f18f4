//! # Link Registry
//!
//! An in-memory URL shortener service with click statistics, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - The in-memory registry
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Batch shortening with all-or-nothing semantics
//! - Custom short codes with uniqueness enforcement
//! - Per-link validity windows; expired links answer 410 Gone
//! - Synchronous click tracking with referrer attribution
//! - Aggregated and per-link click statistics
//!
//! Links live only as long as the process: there is no persistence, and the
//! registry is discarded at shutdown.
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional configuration
//! export LISTEN="0.0.0.0:3000"
//! export BASE_URL="http://localhost:3000"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, ShortenCommand, StatsService};
    pub use crate::domain::entities::{Click, Link, NewClick, NewLink};
    pub use crate::domain::repositories::{LinkRepository, Resolution, StatsRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::registry::MemoryRegistry;
    pub use crate::state::AppState;
}
