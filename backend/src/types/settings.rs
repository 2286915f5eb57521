use object_uploader::UploadConfig;

use crate::types::AppError;

/// Upload target shared with the handlers
#[derive(Debug, Clone, Default)]
pub struct UploadSettings {
    config: Option<UploadConfig>,
}

impl UploadSettings {
    /// Wraps the configured upload target, if any
    #[must_use]
    pub const fn new(config: Option<UploadConfig>) -> Self {
        Self { config }
    }

    /// The configured upload target
    ///
    /// # Errors
    ///
    /// Returns a `storage_not_configured` error when no target is set
    pub fn config(&self) -> Result<&UploadConfig, AppError> {
        self.config
            .as_ref()
            .ok_or_else(AppError::storage_not_configured)
    }
}
