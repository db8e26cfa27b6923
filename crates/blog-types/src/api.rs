//! JSON request and response bodies
//!
//! The HTTP layer talks in these types only; stores never see them.

use crate::post::{NewPost, Post, PostId, PostPatch, ValidationError};
use serde::{Deserialize, Serialize};

/// Body of `POST /posts`
///
/// Fields are optional so a missing field becomes a validation error
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = ValidationError;

    fn try_from(req: CreatePostRequest) -> Result<Self, Self::Error> {
        let title = req.title.ok_or(ValidationError::MissingField("title"))?;
        let content = req.content.ok_or(ValidationError::MissingField("content"))?;
        Ok(NewPost::new(title, content))
    }
}

/// Body of `PUT /posts/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        PostPatch {
            title: req.title,
            content: req.content,
        }
    }
}

/// Serialized post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
        }
    }
}

/// Confirmation body, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned by every failing API call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
