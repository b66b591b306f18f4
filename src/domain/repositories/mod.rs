//! Repository trait definitions for the domain layer.
//!
//! Traits define the registry's contract; the concrete in-memory
//! implementation lives in `crate::infrastructure::registry`. Mock
//! implementations are auto-generated via `mockall` for testing.

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::{LinkRepository, Resolution};
pub use stats_repository::{DetailedStats, LinkStats, StatsFilter, StatsRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
