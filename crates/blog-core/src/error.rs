//! Error types for the blog backend

use blog_types::{PostId, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogError>;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl BlogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlogError::PostNotFound(_))
    }
}
