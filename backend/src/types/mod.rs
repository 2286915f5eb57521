mod environment;
mod error;
mod extractors;
mod settings;

pub use environment::Environment;
pub use error::AppError;
pub use extractors::ValidatedJson;
pub use settings::UploadSettings;
