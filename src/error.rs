use thiserror::Error;

use crate::core::UploadError;
use crate::models::QueryError;
use crate::services::DealBookError;

/// Top-level error for the command-line front end
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    DealBook(#[from] DealBookError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),
}
