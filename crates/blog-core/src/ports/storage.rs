//! Storage trait for post persistence

use crate::Result;
use async_trait::async_trait;
use blog_types::{NewPost, Post, PostId, PostPatch};

/// Post store
///
/// Implementations own their records and the id sequence. Ids are assigned
/// on creation, increase monotonically and are never reused.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Validate and store a new post, returning it with its assigned id
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    /// All posts in insertion order
    async fn list_posts(&self) -> Result<Vec<Post>>;

    async fn get_post(&self, id: PostId) -> Result<Post>;

    /// Replace only the fields present in `patch`
    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post>;

    async fn delete_post(&self, id: PostId) -> Result<()>;

    async fn count_posts(&self) -> Result<usize>;
}
