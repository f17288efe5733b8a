//! Error types for handicap engine

use thiserror::Error;

/// Handicap engine error
#[derive(Debug, Error)]
pub enum Error {
    /// Round or tee data error
    #[error("Round error: {0}")]
    Round(#[from] round_core::Error),

    /// Player has no scorecard or tee in the round
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
