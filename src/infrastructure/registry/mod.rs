//! Registry storage backends.
//!
//! The only backend is the in-memory registry: state lives for the life of
//! the process and is dropped at shutdown.

mod memory;

pub use memory::MemoryRegistry;
