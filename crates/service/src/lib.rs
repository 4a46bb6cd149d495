//! Service layer for the blog post API.
//! - Keeps business rules (validation, sorting, search) out of HTTP handlers.
//! - Storage sits behind the `PostRepository` trait.

pub mod errors;
pub mod posts;
