use axum::{
    routing::get,
    Json, Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::types::Health;

use crate::errors::ApiError;
use crate::metrics;
use crate::state::ServerState;

pub mod posts;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

async fn not_found() -> ApiError {
    ApiError::NotFound("route not found".into())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Build the full application router: post CRUD, health and metrics.
pub fn build_router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/search", get(posts::search_posts))
        .route(
            "/api/posts/:id",
            get(posts::get_post).put(posts::update_post).delete(posts::delete_post),
        );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .merge(api)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
