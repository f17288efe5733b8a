//! Settlement Engine
//!
//! Turns a finished round into who-pays-whom.
//!
//! # Architecture
//!
//! A settlement run for one round:
//!
//! 1. **Guard**: claim the round so no other run interleaves its writes
//! 2. **Wagering**: generate every gross payment from the net scores
//! 3. **Netting**: collapse payments into a short list of transfers
//! 4. **Storage**: replace the round's payment set wholesale
//! 5. **Notification**: queue a settlement event for the group
//!
//! Steps 2 and 3 are pure; identical inputs give identical payments and
//! transfers.
//!
//! # Example
//!
//! ```no_run
//! use settlement::{Config, SettlementEngine};
//! # async fn run(round: round_core::Round, cards: Vec<round_core::Scorecard>) -> settlement::Result<()> {
//! let engine = SettlementEngine::in_memory(Config::default())?;
//! let settlement = engine.run_settlement(&round, &cards).await?;
//! println!("{} payments, {} transfers",
//!          settlement.payments.len(), settlement.transfers.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod guard;
pub mod metrics;
pub mod netting;
pub mod store;
pub mod types;
pub mod wagering;

// Re-exports
pub use config::{Config, NotificationConfig};
pub use engine::SettlementEngine;
pub use error::{Error, Result};
pub use export::RoundExport;
pub use guard::{SettlementGuard, SettlementPermit};
pub use netting::{compute_settlement, net_positions, net_transfers};
pub use store::{InMemoryPaymentStore, PaymentStore};
pub use types::*;
pub use wagering::settle;
