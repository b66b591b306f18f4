//! Infrastructure layer: concrete implementations of the domain contracts.

pub mod registry;
