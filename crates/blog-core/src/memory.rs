//! In-memory post store
//!
//! Posts live in insertion order and are lost when the process exits.

use crate::error::{BlogError, Result};
use crate::ports::PostStore;
use async_trait::async_trait;
use blog_types::{NewPost, Post, PostId, PostPatch};
use tokio::sync::RwLock;
use tracing::debug;

/// Post store backed by a `Vec`, guarded by a single async lock
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

struct Inner {
    posts: Vec<Post>,
    next_id: PostId,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn position(&self, id: PostId) -> Result<usize> {
        self.posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(BlogError::PostNotFound(id))
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create_post(&self, post: NewPost) -> Result<Post> {
        post.validate()?;

        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let post = post.into_post(id);
        inner.posts.push(post.clone());
        debug!("Stored post {} in memory", id);

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn get_post(&self, id: PostId) -> Result<Post> {
        let inner = self.inner.read().await;
        let idx = inner.position(id)?;
        Ok(inner.posts[idx].clone())
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id)?;
        patch.validate()?;

        let post = &mut inner.posts[idx];
        patch.apply_to(post);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id)?;
        inner.posts.remove(idx);
        debug!("Removed post {} from memory", id);
        Ok(())
    }

    async fn count_posts(&self) -> Result<usize> {
        Ok(self.inner.read().await.posts.len())
    }
}
