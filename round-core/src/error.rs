//! Error types for rounds, tees and scorecards

use thiserror::Error;

/// Result type for round operations
pub type Result<T> = std::result::Result<T, Error>;

/// Round errors
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed tee data (hole count, stroke indexes)
    #[error("Invalid tee '{tee}': {reason}")]
    InvalidTee {
        /// Tee name
        tee: String,
        /// What is wrong with it
        reason: String,
    },

    /// Tee name not present in the course snapshot
    #[error("Unknown tee: {0}")]
    UnknownTee(String),

    /// Course snapshot carries no tees at all
    #[error("Course snapshot has no tees")]
    NoTees,

    /// Hole count / nine selector combination not supported
    #[error("Invalid hole count: {0}")]
    InvalidHoleCount(String),

    /// Hole number outside the holes in play
    #[error("Hole {hole} is not in play for this round")]
    HoleNotInPlay {
        /// Hole number
        hole: u8,
    },

    /// Round already closed
    #[error("Round {0} is closed")]
    RoundClosed(String),

    /// Attempted status regression
    #[error("Invalid status transition: {from} -> {to}")]
    StatusRegression {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Scorecard accepted, no further edits allowed
    #[error("Scorecard for {0} already accepted")]
    ScorecardAccepted(String),

    /// Player has not joined the round
    #[error("Player {0} has not joined the round")]
    PlayerNotInRound(String),

    /// Round cannot close yet
    #[error("Round cannot close: {0}")]
    NotReadyToClose(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
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

impl Error {
    /// Convenience constructor for tee validation failures
    pub fn invalid_tee(tee: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidTee {
            tee: tee.into(),
            reason: reason.into(),
        }
    }
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
