use thiserror::Error;

use crate::cleanup::{CleanupError, ParseOperationError};
use crate::history::HistoryError;
use crate::version::ReleaseError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Operation(#[from] ParseOperationError),

    #[error(transparent)]
    Cleanup(#[from] CleanupError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error(transparent)]
    Release(#[from] ReleaseError),
}

pub type Result<T> = std::result::Result<T, Error>;
