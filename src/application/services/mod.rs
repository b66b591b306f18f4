//! Application services orchestrating domain logic.

pub mod link_service;
pub mod stats_service;

pub use link_service::{LinkService, ShortenCommand};
pub use stats_service::StatsService;
