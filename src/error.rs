// Error types for the host metrics and container engine seams

use std::time::Duration;
use thiserror::Error;

/// Failure reading one OS metric. Collectors absorb these into zero-value fields.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Failure talking to the container engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine connect failed: {0}")]
    Connect(String),
    #[error("engine call timed out after {0:?}")]
    Timeout(Duration),
    #[error("engine request failed: {0}")]
    Request(String),
    #[error("engine response decode failed: {0}")]
    Decode(String),
}

impl EngineError {
    /// True for failures caused by an elapsed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, EngineError::Timeout(_))
    }
}
