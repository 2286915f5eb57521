//! Uploads to S3-compatible object stores
//!
//! The [`ObjectUploader`] keeps a single store client bound to the most recently used
//! [`UploadConfig`] and only rebuilds it when the configuration changes. Uploads return the
//! public URL of the stored object.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod config;
mod error;
pub mod fetch;
pub mod key;
pub mod store;
mod uploader;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{clean_endpoint, ResolvedEndpoint, UploadConfig};
pub use error::{UploaderError, UploaderResult};
pub use fetch::{FetchedObject, Fetcher, HttpFetcher};
pub use store::{ObjectStore, S3Connector, StoreConnector};
pub use uploader::ObjectUploader;
