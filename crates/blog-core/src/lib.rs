//! Blog Core Library
//!
//! Domain error type, the post store port, and the in-memory store.

// Re-export pure types from blog-types
pub use blog_types::*;

pub mod error;
pub mod memory;
pub mod ports;
pub mod seed;

pub use error::{BlogError, Result};
pub use memory::MemoryPostStore;
pub use ports::PostStore;
