//! Error types for upload operations

use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::put_object::PutObjectError,
};
use thiserror::Error;

/// Result type for upload operations
pub type UploaderResult<T> = Result<T, UploaderError>;

/// Errors that can occur while uploading objects
#[derive(Error, Debug)]
pub enum UploaderError {
    /// Upload configuration is missing or incomplete
    #[error("Invalid upload configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input provided by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store client could not be constructed for the given endpoint
    #[error("Failed to initialize storage client: {0}")]
    ClientInit(String),

    /// Put-object failed (network, auth, missing bucket, ...)
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Source object could not be fetched
    #[error("Failed to fetch source object: {0}")]
    Fetch(String),
}

impl From<SdkError<PutObjectError>> for UploaderError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::Upload(DisplayErrorContext(&error).to_string())
    }
}
