use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use service::errors::ServiceError;
use service::posts::{CreatePostInput, ListQuery, Post, SearchQuery, UpdatePostInput};

use crate::errors::ApiError;
use crate::metrics;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct CreatedPost {
    pub post: Post,
}

/// `GET /api/posts?sort=title|content&direction=asc|desc`
pub async fn list_posts(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(query) = query?;
    let posts = state.posts.list(&query).await?;
    metrics::record_op("list");
    Ok(Json(posts))
}

/// `GET /api/posts/search?title=..&content=..`
pub async fn search_posts(
    State(state): State<ServerState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(query) = query?;
    let posts = state.posts.search(&query).await?;
    metrics::record_op("search");
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<ServerState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Post>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.posts.get(id).await?))
}

pub async fn create_post(
    State(state): State<ServerState>,
    body: Result<Json<CreatePostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedPost>), ApiError> {
    let Json(input) = body.map_err(|_| ServiceError::invalid("Invalid post"))?;
    let post = state.posts.create(input).await?;
    metrics::record_op("create");
    metrics::set_post_count(state.posts.count().await);
    Ok((StatusCode::CREATED, Json(CreatedPost { post })))
}

/// Unknown ids are reported before the body is looked at.
pub async fn update_post(
    State(state): State<ServerState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdatePostInput>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Path(id) = path?;
    if !state.posts.exists(id).await {
        return Err(ServiceError::not_found(id).into());
    }
    let Json(input) = body?;
    let post = state.posts.update(id, input).await?;
    metrics::record_op("update");
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ServerState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    state.posts.delete(id).await?;
    metrics::record_op("delete");
    metrics::set_post_count(state.posts.count().await);
    Ok(Json(json!({
        "message": format!("Post with id {id} has been deleted successfully.")
    })))
}
