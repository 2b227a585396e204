use derive_more::From;
use thiserror::Error;

use crate::{config::ConfigError, recording::RecordingError};

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Recording(RecordingError),

    #[error("Failed to serialize report: {0}")]
    Serialize(serde_json::Error),
}
