//! Storage layer
//!
//! Posts are persisted in an embedded SQLite file.

pub mod db;

pub use db::SqlitePostStore;
