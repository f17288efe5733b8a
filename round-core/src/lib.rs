//! Round Core
//!
//! Data model for informal wagered golf rounds: tees and course snapshots,
//! rounds and their lifecycle, per-player scorecards and bet configuration.
//!
//! # Invariants
//!
//! - A tee's stroke indexes are a permutation of 1..=18
//! - Strokes are unset until recorded and non-negative once set
//! - Round status never regresses (open → active → closed)
//! - Accepted scorecards are frozen
//! - Course and bet data are snapshotted when the round is created

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod bets;
pub mod config;
pub mod error;
pub mod payment;
pub mod round;
pub mod scorecard;
pub mod tee;
pub mod types;

// Re-exports
pub use bets::{BetCategory, BetConfig};
pub use config::Config;
pub use error::{Error, Result};
pub use payment::{Payment, PaymentItem, Transfer};
pub use round::{PlayerTee, Round};
pub use scorecard::{HandicapBasis, HoleEntry, Scorecard};
pub use tee::{CourseSnapshot, HoleRank, Tee, TeeHole, TeeSet};
pub use types::{Gender, HolesPlayed, NineType, PlayerId, RoundStatus};
