//! In-memory collaborators for tests

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    FetchedObject, Fetcher, ObjectStore, ResolvedEndpoint, StoreConnector, UploaderError,
    UploaderResult,
};

/// An object written to a [`MemoryConnector`] store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Host of the client that wrote the object
    pub host: String,
    /// Access key of the client that wrote the object
    pub access_key: String,
    /// Target bucket
    pub bucket: String,
    /// Object key
    pub key: String,
    /// Payload
    pub data: Bytes,
    /// Content type sent with the put
    pub content_type: String,
}

#[derive(Default)]
struct MemoryBackend {
    connections: Mutex<Vec<ResolvedEndpoint>>,
    objects: Mutex<Vec<StoredObject>>,
    fail_connects: AtomicBool,
    fail_puts: AtomicBool,
}

/// [`StoreConnector`] whose clients write into shared memory
///
/// Clones share the same recorded connections and objects.
#[derive(Clone, Default)]
pub struct MemoryConnector {
    backend: Arc<MemoryBackend>,
}

impl MemoryConnector {
    /// Creates a connector with nothing recorded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clients built so far
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections().len()
    }

    /// Endpoints clients were built for, in order
    #[must_use]
    pub fn connections(&self) -> Vec<ResolvedEndpoint> {
        self.backend
            .connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Objects written so far, in order
    #[must_use]
    pub fn objects(&self) -> Vec<StoredObject> {
        self.backend
            .objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes subsequent `connect` calls fail
    pub fn set_fail_connects(&self, fail: bool) {
        self.backend.fail_connects.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent puts fail
    pub fn set_fail_puts(&self, fail: bool) {
        self.backend.fail_puts.store(fail, Ordering::SeqCst);
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self, endpoint: &ResolvedEndpoint) -> UploaderResult<Arc<dyn ObjectStore>> {
        if self.backend.fail_connects.load(Ordering::SeqCst) {
            return Err(UploaderError::ClientInit(format!(
                "refusing to connect to {}",
                endpoint.host
            )));
        }

        self.backend
            .connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(endpoint.clone());

        Ok(Arc::new(MemoryStore {
            endpoint: endpoint.clone(),
            backend: Arc::clone(&self.backend),
        }))
    }
}

struct MemoryStore {
    endpoint: ResolvedEndpoint,
    backend: Arc<MemoryBackend>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> UploaderResult<()> {
        if self.backend.fail_puts.load(Ordering::SeqCst) {
            return Err(UploaderError::Upload(format!(
                "NoSuchBucket: {bucket} on {}",
                self.endpoint.host
            )));
        }

        self.backend
            .objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredObject {
                host: self.endpoint.host.clone(),
                access_key: self.endpoint.access_key.clone(),
                bucket: bucket.to_string(),
                key: key.to_string(),
                data,
                content_type: content_type.to_string(),
            });

        Ok(())
    }
}

/// [`Fetcher`] serving a fixed set of URLs
#[derive(Clone, Default)]
pub struct StaticFetcher {
    objects: HashMap<String, FetchedObject>,
}

impl StaticFetcher {
    /// Creates a fetcher that knows no URLs
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `data` with `content_type` at `url`
    #[must_use]
    pub fn with_object(mut self, url: &str, data: Bytes, content_type: &str) -> Self {
        self.objects.insert(
            url.to_string(),
            FetchedObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> UploaderResult<FetchedObject> {
        self.objects
            .get(url)
            .cloned()
            .ok_or_else(|| UploaderError::Fetch(format!("GET {url} returned HTTP 404 Not Found")))
    }
}
