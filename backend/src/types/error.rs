//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use object_uploader::UploaderError;
use serde::Serialize;

/// API error response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// Bad request for a failed validation rule, keyed by its error code
    #[must_use]
    pub fn validation(code: &str) -> Self {
        let (code, message) = match code {
            "invalid_source_url" => (
                "invalid_source_url",
                "Source URL must be a valid http(s) URL",
            ),
            "empty_payload" => ("empty_payload", "Request body must not be empty"),
            "invalid_object_key" => ("invalid_object_key", "Object key must not be empty"),
            _ => ("validation_error", "Request validation failed"),
        };
        Self::new(StatusCode::BAD_REQUEST, code, message, false)
    }

    /// Uploads are requested but no upload target is configured
    #[must_use]
    pub const fn storage_not_configured() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_not_configured",
            "Upload storage is not configured",
            false,
        )
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert uploader errors to application errors
impl From<UploaderError> for AppError {
    #[allow(clippy::cognitive_complexity)]
    fn from(err: UploaderError) -> Self {
        match &err {
            UploaderError::InvalidConfig(msg) => {
                tracing::error!("Upload configuration error: {msg}");
                Self::storage_not_configured()
            }
            UploaderError::InvalidInput(msg) => {
                tracing::warn!("Invalid input: {msg}");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_input",
                    "Invalid input provided",
                    false,
                )
            }
            UploaderError::ClientInit(msg) => {
                tracing::error!("Storage client error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    false,
                )
            }
            UploaderError::Upload(msg) => {
                tracing::error!("Object store upload error: {msg}");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "Object storage temporarily unavailable",
                    true,
                )
            }
            UploaderError::Fetch(msg) => {
                tracing::warn!("Source fetch error: {msg}");
                Self::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "fetch_failed",
                    "Source URL could not be fetched",
                    false,
                )
            }
        }
    }
}
