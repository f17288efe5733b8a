//! Error types for settlement engine

use round_core::PlayerId;
use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug)]
pub enum Error {
    /// Round data error
    #[error("Round error: {0}")]
    Round(#[from] round_core::Error),

    /// Handicap derivation error
    #[error("Handicap error: {0}")]
    Handicap(#[from] handicap_engine::Error),

    /// A scorecard is missing holes or has not been accepted
    #[error("Incomplete round: {player} (missing holes {missing_holes:?}, accepted: {accepted})")]
    IncompleteRound {
        /// Card owner
        player: PlayerId,
        /// Holes in play without strokes
        missing_holes: Vec<u8>,
        /// Whether the card was signed
        accepted: bool,
    },

    /// Another settlement for the same round is running
    #[error("Settlement already in progress for round {0}")]
    SettlementInProgress(uuid::Uuid),

    /// Payment store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Metrics registration error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
