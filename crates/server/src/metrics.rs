use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static POST_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_api_post_operations_total",
        "Post operations that completed successfully",
        &["op"]
    )
    .expect("register post_operations_total")
});

pub static POSTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("blog_api_posts", "Posts currently held in memory")
        .expect("register posts gauge")
});

pub fn record_op(op: &str) {
    POST_OPERATIONS_TOTAL.with_label_values(&[op]).inc();
}

pub fn set_post_count(count: usize) {
    POSTS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
