//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use object_uploader::UploadConfig;
use tracing::Level;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;
const DEFAULT_REGION: &str = "us-east-1";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Upload target read from `UPLOAD_BUCKET`, `UPLOAD_ENDPOINT`, `UPLOAD_ACCESS_KEY` and
    /// `UPLOAD_SECRET_KEY`
    ///
    /// Production and staging return `None` unless all four are set. Development falls back to
    /// `LocalStack` defaults for anything missing.
    #[must_use]
    pub fn upload_config(&self) -> Option<UploadConfig> {
        let bucket = non_empty_var("UPLOAD_BUCKET");
        let endpoint = non_empty_var("UPLOAD_ENDPOINT");
        let access_key = non_empty_var("UPLOAD_ACCESS_KEY");
        let secret_key = non_empty_var("UPLOAD_SECRET_KEY");

        match self {
            Self::Production | Self::Staging => Some(UploadConfig::new(
                bucket?,
                endpoint?,
                access_key?,
                secret_key?,
            )),
            Self::Development => Some(UploadConfig::new(
                bucket.unwrap_or_else(|| "uploads".to_string()),
                endpoint.unwrap_or_else(|| "http://localhost:4566".to_string()),
                access_key.unwrap_or_else(|| "test".to_string()),
                secret_key.unwrap_or_else(|| "test".to_string()),
            )),
        }
    }

    /// Region used to sign store requests (`UPLOAD_REGION`, defaults to `us-east-1`)
    #[must_use]
    pub fn s3_region(&self) -> String {
        non_empty_var("UPLOAD_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Largest accepted request body in bytes (`MAX_UPLOAD_BYTES`, defaults to 15 MiB)
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Timeout for a single put against the store
    #[must_use]
    pub const fn storage_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }

    /// Timeout for downloading a copy source
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(15)
    }

    /// Timeout for a whole HTTP request
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(60)
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|val| !val.trim().is_empty())
}
