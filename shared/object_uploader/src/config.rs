//! Upload configuration and endpoint handling

use std::fmt;

use serde::Deserialize;

use crate::{UploaderError, UploaderResult};

const HTTPS_PREFIX: &str = "https://";
const HTTP_PREFIX: &str = "http://";

/// Connection settings for an S3-compatible bucket
///
/// Two configs are the same store target only if every field matches.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UploadConfig {
    /// Bucket name
    pub bucket: String,
    /// Store host, optionally prefixed with `http://` or `https://`
    pub endpoint: String,
    /// Access key id
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
}

impl UploadConfig {
    /// Creates a new upload configuration
    #[must_use]
    pub fn new(
        bucket: impl Into<String>,
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Checks that every field is usable
    ///
    /// # Errors
    ///
    /// Returns `UploaderError::InvalidConfig` naming the first blank field
    pub fn validate(&self) -> UploaderResult<()> {
        let fields = [
            ("bucket", self.bucket.as_str()),
            ("endpoint", self.endpoint.as_str()),
            ("access_key", self.access_key.as_str()),
            ("secret_key", self.secret_key.as_str()),
        ];

        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(UploaderError::InvalidConfig(format!("{name} must not be empty")));
        }

        if self.host().is_empty() {
            return Err(UploaderError::InvalidConfig(format!(
                "endpoint has no host: {}",
                self.endpoint
            )));
        }

        Ok(())
    }

    /// Whether the store is reached over TLS
    ///
    /// Only an explicit `https://` prefix on the raw endpoint selects TLS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.endpoint.starts_with(HTTPS_PREFIX)
    }

    /// URL scheme matching [`Self::is_secure`]
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.is_secure() {
            "https"
        } else {
            "http"
        }
    }

    /// Endpoint host without scheme or trailing slashes
    #[must_use]
    pub fn host(&self) -> String {
        clean_endpoint(&self.endpoint)
    }

    /// Public URL of `key` inside this bucket
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}://{}/{}/{}",
            self.scheme(),
            self.host(),
            self.bucket,
            key
        )
    }

    /// Endpoint and credentials a store client is built from
    #[must_use]
    pub fn resolve(&self) -> ResolvedEndpoint {
        ResolvedEndpoint {
            host: self.host(),
            secure: self.is_secure(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
        }
    }
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Cleaned endpoint plus static credentials
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Bare host, e.g. `minio.example.com:9000`
    pub host: String,
    /// Use TLS when talking to the host
    pub secure: bool,
    /// Access key id
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
}

impl ResolvedEndpoint {
    /// Full endpoint URL handed to the store SDK
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.host)
    }
}

impl fmt::Debug for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedEndpoint")
            .field("host", &self.host)
            .field("secure", &self.secure)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Strips `http://`/`https://` prefixes and trailing slashes from an endpoint
///
/// Prefixes are stripped until none remain, so the result is stable under repeated calls.
#[must_use]
pub fn clean_endpoint(endpoint: &str) -> String {
    let mut host = endpoint;
    loop {
        if let Some(rest) = host.strip_prefix(HTTPS_PREFIX) {
            host = rest;
        } else if let Some(rest) = host.strip_prefix(HTTP_PREFIX) {
            host = rest;
        } else {
            break;
        }
    }
    host.trim_end_matches('/').to_string()
}
