use std::sync::Arc;

use service::posts::{PostRepository, PostService, PostStore};

/// Shared handler state. Cloned per request; the store itself is behind `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub posts: PostService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { posts: PostService::new(repo) }
    }

    /// State backed by the in-memory store with its five seed posts.
    pub fn seeded() -> Self {
        Self::new(PostStore::seeded())
    }
}
