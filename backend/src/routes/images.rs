use std::sync::Arc;

use axum::{body::Bytes, http::HeaderMap, Extension, Json};
use object_uploader::ObjectUploader;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;
use validator::{Validate, ValidationError};

use super::{request_content_type, UploadResponse};
use crate::types::{AppError, UploadSettings, ValidatedJson};

/// Request body of the copy endpoint
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CopyImageRequest {
    /// URL of the image to copy into the bucket
    #[validate(custom(function = "validate_source_url", message = "invalid_source_url"))]
    pub source_url: String,
}

/// Accepts absolute `http` and `https` URLs only
fn validate_source_url(source_url: &str) -> Result<(), ValidationError> {
    match Url::parse(source_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::new("invalid_source_url")
            .with_message("invalid_source_url".into())),
    }
}

/// Stores the request body as an image under a content-derived key
///
/// The `Content-Type` header selects the file extension; without one the image is stored as
/// `image/jpeg`. Uploading the same bytes twice yields the same URL.
///
/// # Errors
///
/// - `empty_payload` - the body is empty
/// - `storage_not_configured` - no upload target is configured
/// - `upstream_error` - the object store rejected the put
#[instrument(skip(uploader, settings, headers, body), fields(size = body.len()))]
pub async fn upload_image(
    Extension(uploader): Extension<Arc<ObjectUploader>>,
    Extension(settings): Extension<UploadSettings>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    if body.is_empty() {
        return Err(AppError::validation("empty_payload"));
    }

    let config = settings.config()?;
    let url = uploader
        .upload_image(config, body, request_content_type(&headers))
        .await?;

    tracing::info!("Uploaded image: {url}");

    Ok(Json(UploadResponse { url }))
}

/// Downloads `source_url` and stores it as an image
///
/// # Errors
///
/// - `invalid_source_url` - `source_url` is not a URL
/// - `fetch_failed` - the source could not be downloaded
/// - `storage_not_configured` / `upstream_error` - as for [`upload_image`]
#[instrument(skip(uploader, settings, payload))]
pub async fn copy_image(
    Extension(uploader): Extension<Arc<ObjectUploader>>,
    Extension(settings): Extension<UploadSettings>,
    ValidatedJson(payload): ValidatedJson<CopyImageRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    let config = settings.config()?;
    let url = uploader.copy_image(config, &payload.source_url).await?;

    tracing::info!("Copied {} to {url}", payload.source_url);

    Ok(Json(UploadResponse { url }))
}
