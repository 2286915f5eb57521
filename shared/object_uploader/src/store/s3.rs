use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{
        retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Credentials, Region,
    },
    primitives::ByteStream,
    Client,
};
use bytes::Bytes;
use tracing::{debug, error};
use url::Url;

use super::{ObjectStore, StoreConnector};
use crate::{ResolvedEndpoint, UploaderError, UploaderResult};

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);
const CREDENTIALS_PROVIDER_NAME: &str = "object-uploader";

/// Builds `aws-sdk-s3` clients for S3-compatible endpoints
///
/// Clients use path-style addressing (required by MinIO and LocalStack), static credentials and
/// no SDK retries, so a failed put surfaces to the caller immediately.
#[derive(Debug, Clone)]
pub struct S3Connector {
    region: String,
    operation_timeout: Duration,
}

impl S3Connector {
    /// Creates a connector signing requests for `region`
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Overrides the per-operation timeout (defaults to 30 seconds)
    #[must_use]
    pub const fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }
}

impl Default for S3Connector {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl StoreConnector for S3Connector {
    fn connect(&self, endpoint: &ResolvedEndpoint) -> UploaderResult<Arc<dyn ObjectStore>> {
        let endpoint_url = endpoint.endpoint_url();
        Url::parse(&endpoint_url).map_err(|e| {
            UploaderError::ClientInit(format!("Invalid endpoint {endpoint_url}: {e}"))
        })?;

        let credentials = Credentials::new(
            endpoint.access_key.clone(),
            endpoint.secret_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(self.operation_timeout)
            .build();

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .endpoint_url(&endpoint_url)
            .credentials_provider(credentials)
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeout_config)
            .build();

        debug!("Built S3 client for {endpoint_url}");

        Ok(Arc::new(S3Store {
            client: Client::from_conf(config),
        }))
    }
}

struct S3Store {
    client: Client,
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> UploaderResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to put object {bucket}/{key}: {e}");
                UploaderError::from(e)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UploadConfig;

    #[tokio::test]
    async fn test_connect_accepts_host_with_port() {
        let endpoint = UploadConfig::new("imgs", "https://minio.example.com:9000/", "ak", "sk")
            .resolve();
        assert!(S3Connector::default().connect(&endpoint).is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_host() {
        let endpoint = UploadConfig::new("imgs", "http://bad host:port", "ak", "sk").resolve();
        let result = S3Connector::new("eu-west-1")
            .with_operation_timeout(Duration::from_secs(1))
            .connect(&endpoint);
        assert!(matches!(result, Err(UploaderError::ClientInit(_))));
    }
}
