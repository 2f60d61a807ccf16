//! Domain errors for the tracker notifier.

use thiserror::Error;

/// Domain-level errors that can occur while polling and notifying.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Timed out after {0} ms: {1}")]
    Timeout(u64, String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Decode(err.to_string())
    }
}
