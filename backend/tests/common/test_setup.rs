use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{server, types::Environment, types::UploadSettings};
use object_uploader::{
    testing::{MemoryConnector, StaticFetcher},
    ObjectUploader, UploadConfig,
};
use tower::ServiceExt;

/// Source URL served by the test fetcher
pub const SOURCE_IMAGE_URL: &str = "https://cdn.example.com/cat.png";
/// Payload served at [`SOURCE_IMAGE_URL`]
pub const SOURCE_IMAGE_BYTES: &[u8] = b"not really a png";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Upload target used by the test router
pub fn test_upload_config() -> UploadConfig {
    UploadConfig::new("imgs", "https://minio.example.com:9000/", "ak", "sk")
}

/// Router wired to in-memory collaborators
pub struct TestSetup {
    pub router: Router,
    pub connector: MemoryConnector,
    pub uploader: Arc<ObjectUploader>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_settings(UploadSettings::new(Some(test_upload_config())))
    }

    pub fn with_settings(settings: UploadSettings) -> Self {
        setup_test_env();

        let connector = MemoryConnector::new();
        let fetcher = StaticFetcher::new().with_object(
            SOURCE_IMAGE_URL,
            SOURCE_IMAGE_BYTES.into(),
            "image/png",
        );
        let uploader = Arc::new(ObjectUploader::new(connector.clone(), fetcher));

        let router = server::router(&Environment::Development, uploader.clone(), settings);

        Self {
            router,
            connector,
            uploader,
        }
    }

    pub async fn send_raw_request(
        &self,
        method: &str,
        route: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Response {
        let mut builder = Request::builder().uri(route).method(method);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_post_request(&self, route: &str, payload: serde_json::Value) -> Response {
        self.send_raw_request(
            "POST",
            route,
            Some("application/json"),
            payload.to_string().into_bytes(),
        )
        .await
    }

    pub async fn send_get_request(&self, route: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }
}
