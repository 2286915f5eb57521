//! Object store abstraction
//!
//! [`StoreConnector`] builds a client for one resolved endpoint, [`ObjectStore`] performs the
//! put. The uploader only talks to these traits so any S3-compatible backend can sit behind it.

mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{ResolvedEndpoint, UploaderResult};

pub use s3::S3Connector;

/// A client bound to one endpoint and credential pair
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes the full payload to `bucket`/`key` in a single request
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::Upload` if the store rejects or never receives the object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> UploaderResult<()>;
}

/// Builds store clients
pub trait StoreConnector: Send + Sync {
    /// Creates a client for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::ClientInit` if the endpoint or credentials are unusable
    fn connect(&self, endpoint: &ResolvedEndpoint) -> UploaderResult<Arc<dyn ObjectStore>>;
}
