//! Core business entities.

mod click;
mod link;

pub use click::{Click, DIRECT_SOURCE, NewClick};
pub use link::{Link, NewLink};
