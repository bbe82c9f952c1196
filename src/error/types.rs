use thiserror::Error;

use crate::layout::{GridError, PlacementError};
use crate::logging::LoggingError;

/// Unified result type for the bento grid crate.
pub type Result<T> = std::result::Result<T, BentoError>;

/// Errors surfaced by the bento grid engine and its drivers.
#[derive(Debug, Error)]
pub enum BentoError {
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
