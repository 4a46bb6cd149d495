use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;
use crate::posts::domain::{NewPost, Post, UpdatePostInput};

/// Storage abstraction for posts. Implementations keep insertion order.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Vec<Post>;
    async fn get(&self, id: u64) -> Option<Post>;
    async fn create(&self, input: NewPost) -> Post;
    async fn update(&self, id: u64, input: UpdatePostInput) -> Result<Post, ServiceError>;
    async fn delete(&self, id: u64) -> bool;
    async fn len(&self) -> usize;
}

struct Inner {
    posts: Vec<Post>,
    next_id: u64,
}

/// In-memory post collection guarded by a single lock.
///
/// Ids come from a monotonic counter, so an id retired by a delete is never
/// handed out again.
#[derive(Clone)]
pub struct PostStore {
    inner: Arc<RwLock<Inner>>,
}

impl PostStore {
    pub fn new() -> Arc<Self> {
        Self::with_posts(Vec::new())
    }

    /// Build a store from existing posts. The counter starts past the highest id.
    pub fn with_posts(posts: Vec<Post>) -> Arc<Self> {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Arc::new(Self { inner: Arc::new(RwLock::new(Inner { posts, next_id })) })
    }

    /// The five posts the service starts with.
    pub fn seeded() -> Arc<Self> {
        let titles = ["First", "Second", "Third", "Fourth", "Fifth"];
        let posts = titles
            .iter()
            .zip(1u64..)
            .map(|(ordinal, id)| Post {
                id,
                title: format!("{} post", ordinal),
                content: format!("This is the {} post.", ordinal.to_lowercase()),
            })
            .collect();
        Self::with_posts(posts)
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn list(&self) -> Vec<Post> {
        self.inner.read().await.posts.clone()
    }

    async fn get(&self, id: u64) -> Option<Post> {
        let inner = self.inner.read().await;
        inner.posts.iter().find(|p| p.id == id).cloned()
    }

    async fn create(&self, input: NewPost) -> Post {
        let mut inner = self.inner.write().await;
        let post = Post { id: inner.next_id, title: input.title, content: input.content };
        inner.next_id += 1;
        inner.posts.push(post.clone());
        debug!(post_id = post.id, "post appended");
        post
    }

    async fn update(&self, id: u64, input: UpdatePostInput) -> Result<Post, ServiceError> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        input.apply(existing);
        debug!(post_id = id, "post overwritten");
        Ok(existing.clone())
    }

    async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.posts.iter().position(|p| p.id == id) {
            Some(idx) => {
                inner.posts.remove(idx);
                debug!(post_id = id, "post removed");
                true
            }
            None => false,
        }
    }

    async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }
}
