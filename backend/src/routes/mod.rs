mod health;
/// Image upload and copy handlers
pub mod images;
/// Keyed object upload handler
pub mod objects;

use axum::{
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};

/// Response body of every upload endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Public URL of the stored object
    pub url: String,
}

/// Creates the router with all handler routes
pub fn handler() -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .route("/v1/images", post(images::upload_image))
        .route("/v1/images/copy", post(images::copy_image))
        .route("/v1/objects/{*key}", put(objects::upload_object))
}

/// `Content-Type` of the request, empty when absent or not valid UTF-8
fn request_content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
