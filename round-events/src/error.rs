//! Error types for round events

use thiserror::Error;

/// Round event error
#[derive(Debug, Error)]
pub enum Error {
    /// Notifier refused or failed a delivery
    #[error("Notify error: {0}")]
    Notify(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
