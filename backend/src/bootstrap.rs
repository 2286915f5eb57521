use anyhow::Context;
use object_uploader::{HttpFetcher, ObjectUploader, S3Connector};
use tracing::info;

use crate::types::{Environment, UploadSettings};

/// Builds the uploader shared by all handlers
///
/// No store client is created here; the first upload binds one.
///
/// # Errors
///
/// Returns an error if the HTTP client used for copy sources cannot be built
pub fn build_uploader(environment: &Environment) -> anyhow::Result<ObjectUploader> {
    let connector = S3Connector::new(environment.s3_region())
        .with_operation_timeout(environment.storage_timeout());
    let fetcher =
        HttpFetcher::new(environment.fetch_timeout()).context("failed to init source fetcher")?;

    Ok(ObjectUploader::new(connector, fetcher))
}

/// Resolves and validates the upload target
///
/// # Errors
///
/// Returns an error if the target is missing or incomplete, so the service never starts
/// without a usable upload configuration
pub fn upload_settings(environment: &Environment) -> anyhow::Result<UploadSettings> {
    let config = environment.upload_config().context(
        "UPLOAD_BUCKET, UPLOAD_ENDPOINT, UPLOAD_ACCESS_KEY and UPLOAD_SECRET_KEY must be set",
    )?;
    config.validate().context("failed to init upload config")?;

    info!(
        bucket = %config.bucket,
        host = %config.host(),
        secure = config.is_secure(),
        "Upload target configured"
    );

    Ok(UploadSettings::new(Some(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_production_without_upload_vars_fails_fast() {
        for var in [
            "UPLOAD_BUCKET",
            "UPLOAD_ENDPOINT",
            "UPLOAD_ACCESS_KEY",
            "UPLOAD_SECRET_KEY",
        ] {
            env::remove_var(var);
        }

        let err = upload_settings(&Environment::Production).unwrap_err();
        assert!(err.to_string().contains("UPLOAD_BUCKET"));
    }

    #[test]
    #[serial]
    fn test_development_settings_resolve() {
        env::remove_var("UPLOAD_BUCKET");
        env::set_var("UPLOAD_ENDPOINT", "https:///");

        // A scheme with no host is rejected at startup
        assert!(upload_settings(&Environment::Development).is_err());

        env::remove_var("UPLOAD_ENDPOINT");
        let settings = upload_settings(&Environment::Development).unwrap();
        assert_eq!(settings.config().unwrap().bucket, "uploads");
    }
}
