//! Blog Types - Pure type definitions shared by the store and the HTTP layers
//!
//! This crate contains only plain data types and their validation rules,
//! with no async runtime or storage dependencies.

pub mod api;
pub mod post;

pub use api::*;
pub use post::*;
