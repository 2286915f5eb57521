//! Fetching source objects over HTTP for copy uploads

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use crate::{UploaderError, UploaderResult};

/// Downloaded payload and its declared content type
#[derive(Debug, Clone)]
pub struct FetchedObject {
    /// Response body
    pub data: Bytes,
    /// Value of the `Content-Type` header, empty when absent
    pub content_type: String,
}

/// Retrieves the bytes behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads `url`
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::Fetch` if the URL is unreachable or answers with a non-2xx status
    async fn fetch(&self, url: &str) -> UploaderResult<FetchedObject>;
}

/// [`Fetcher`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::ClientInit` if the HTTP client cannot be built
    pub fn new(timeout: Duration) -> UploaderResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploaderError::ClientInit(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> UploaderResult<FetchedObject> {
        debug!("Fetching source object: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UploaderError::Fetch(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Source object {url} answered with HTTP {status}");
            return Err(UploaderError::Fetch(format!("GET {url} returned HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| UploaderError::Fetch(format!("Failed to read body of {url}: {e}")))?;

        debug!(
            "Fetched {} bytes ({content_type}) from {url}",
            data.len()
        );

        Ok(FetchedObject { data, content_type })
    }
}
