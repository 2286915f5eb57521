use std::sync::Arc;

use axum::{body::Bytes, extract::Path, http::HeaderMap, Extension, Json};
use object_uploader::ObjectUploader;
use tracing::instrument;

use super::{request_content_type, UploadResponse};
use crate::types::{AppError, UploadSettings};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Stores the request body under the key given in the path
///
/// # Errors
///
/// - `invalid_object_key` - the key is blank
/// - `storage_not_configured` - no upload target is configured
/// - `upstream_error` - the object store rejected the put
#[instrument(skip(uploader, settings, headers, body), fields(size = body.len()))]
pub async fn upload_object(
    Extension(uploader): Extension<Arc<ObjectUploader>>,
    Extension(settings): Extension<UploadSettings>,
    Path(key): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    if key.trim().is_empty() {
        return Err(AppError::validation("invalid_object_key"));
    }

    let content_type = match request_content_type(&headers) {
        "" => DEFAULT_CONTENT_TYPE,
        content_type => content_type,
    };

    let config = settings.config()?;
    let url = uploader
        .upload_object(config, &key, body, content_type)
        .await?;

    tracing::info!("Uploaded object: {url}");

    Ok(Json(UploadResponse { url }))
}
