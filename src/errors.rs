use thiserror::Error;

/// Error type that captures common tracker failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Advice request failed: {0}")]
    Advice(String),
    #[error("an advice request is already in flight")]
    AdviceBusy,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
