//! Blog posts: domain types, in-memory repository and the service on top.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{CreatePostInput, ListQuery, Post, SearchQuery, UpdatePostInput};
pub use repository::{PostRepository, PostStore};
pub use service::PostService;
