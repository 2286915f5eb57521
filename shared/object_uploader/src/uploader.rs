//! Config-versioned store client cache and upload operations

use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;
use tracing::{debug, info, instrument};

use crate::{
    fetch::Fetcher,
    key::{image_key, DEFAULT_IMAGE_CONTENT_TYPE},
    store::{ObjectStore, StoreConnector},
    UploadConfig, UploaderError, UploaderResult,
};

/// A store client together with the config it was built from
///
/// Both halves are always replaced together.
struct BoundClient {
    config: UploadConfig,
    store: Arc<dyn ObjectStore>,
}

/// Uploads objects through a lazily built, config-keyed store client
///
/// At most one client is cached. Calls with the config the client was built from reuse it;
/// any field change builds a new client and replaces the cached one. Share it behind an `Arc`.
pub struct ObjectUploader {
    connector: Box<dyn StoreConnector>,
    fetcher: Box<dyn Fetcher>,
    bound: RwLock<Option<BoundClient>>,
}

impl ObjectUploader {
    /// Creates an uploader with no client bound yet
    #[must_use]
    pub fn new(
        connector: impl StoreConnector + 'static,
        fetcher: impl Fetcher + 'static,
    ) -> Self {
        Self {
            connector: Box::new(connector),
            fetcher: Box::new(fetcher),
            bound: RwLock::new(None),
        }
    }

    /// Uploads an image under a content-derived key and returns its public URL
    ///
    /// A blank `content_type` is stored as `image/jpeg`.
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::InvalidConfig` for an incomplete config,
    /// `UploaderError::ClientInit` if no client can be built and
    /// `UploaderError::Upload` if the put fails
    pub async fn upload_image(
        &self,
        config: &UploadConfig,
        data: Bytes,
        content_type: &str,
    ) -> UploaderResult<String> {
        let content_type = if content_type.trim().is_empty() {
            DEFAULT_IMAGE_CONTENT_TYPE
        } else {
            content_type
        };

        let key = image_key(&data, content_type);
        self.upload_object(config, &key, data, content_type).await
    }

    /// Uploads `data` under `key` and returns `{scheme}://{host}/{bucket}/{key}`
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::InvalidConfig` for an incomplete config,
    /// `UploaderError::InvalidInput` for an empty key,
    /// `UploaderError::ClientInit` if no client can be built and
    /// `UploaderError::Upload` if the put fails
    #[instrument(skip(self, config, data), fields(bucket = %config.bucket, size = data.len()))]
    pub async fn upload_object(
        &self,
        config: &UploadConfig,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> UploaderResult<String> {
        config.validate()?;
        if key.trim().is_empty() {
            return Err(UploaderError::InvalidInput(
                "object key must not be empty".to_string(),
            ));
        }

        let store = self.ensure_client(config)?;
        store
            .put_object(&config.bucket, key, data, content_type)
            .await?;

        let url = config.public_url(key);
        debug!("Uploaded object: {url}");
        Ok(url)
    }

    /// Downloads `source_url` and stores it as an image
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::Fetch` if the source cannot be downloaded, otherwise the errors of
    /// [`Self::upload_image`]
    pub async fn copy_image(
        &self,
        config: &UploadConfig,
        source_url: &str,
    ) -> UploaderResult<String> {
        config.validate()?;

        let fetched = self.fetcher.fetch(source_url).await?;
        self.upload_image(config, fetched.data, &fetched.content_type)
            .await
    }

    /// Returns the client bound to `config`, building and installing one on mismatch
    ///
    /// Matching configs only take the read lock. On mismatch the write lock is held across the
    /// re-check and the construction, so concurrent callers never build duplicate clients and
    /// the cached config always describes the cached client.
    fn ensure_client(&self, config: &UploadConfig) -> UploaderResult<Arc<dyn ObjectStore>> {
        {
            let bound = self.bound.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(bound) = bound.as_ref().filter(|b| b.config == *config) {
                debug!("Reusing store client for bucket {}", config.bucket);
                return Ok(Arc::clone(&bound.store));
            }
        }

        let mut bound = self.bound.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = bound.as_ref().filter(|b| b.config == *config) {
            return Ok(Arc::clone(&current.store));
        }

        let store = self.connector.connect(&config.resolve())?;
        info!(
            bucket = %config.bucket,
            host = %config.host(),
            secure = config.is_secure(),
            "Initialized object store client"
        );

        *bound = Some(BoundClient {
            config: config.clone(),
            store: Arc::clone(&store),
        });

        Ok(store)
    }

    /// Config the cached client was built from, if any
    #[must_use]
    pub fn current_config(&self) -> Option<UploadConfig> {
        self.bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|bound| bound.config.clone())
    }
}
