//! Plain-text rendering of round events

use crate::event::{EventEnvelope, RoundEvent};
use round_core::Transfer;
use std::fmt::Write;

/// Renders events as short group-chat messages
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    heading: Option<String>,
    currency_symbol: String,
}

impl Default for NotificationBuilder {
    fn default() -> Self {
        Self {
            heading: None,
            currency_symbol: "$".to_string(),
        }
    }
}

impl NotificationBuilder {
    /// Create builder with no heading and `$` amounts
    pub fn new() -> Self {
        Self::default()
    }

    /// First line of every message
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Prefix for amounts
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// One line per transfer, or a single line when nobody owes anything
    pub fn transfer_lines(&self, transfers: &[Transfer]) -> Vec<String> {
        if transfers.is_empty() {
            return vec!["All square".to_string()];
        }
        transfers
            .iter()
            .map(|t| {
                format!(
                    "{} pays {} {}{}",
                    t.from,
                    t.to,
                    self.currency_symbol,
                    t.amount.normalize()
                )
            })
            .collect()
    }

    /// Render an event
    pub fn render(&self, envelope: &EventEnvelope) -> String {
        let mut text = String::new();
        if let Some(heading) = &self.heading {
            let _ = writeln!(text, "{heading}");
        }

        match &envelope.event {
            RoundEvent::ScoreRecorded { player, hole } => {
                let _ = write!(text, "{player} recorded hole {hole}");
            }
            RoundEvent::ScorecardAccepted { player } => {
                let _ = write!(text, "{player} signed their card");
            }
            RoundEvent::RoundClosed => {
                let _ = write!(text, "Round {} closed", envelope.round_id);
            }
            RoundEvent::SettlementCompleted {
                payment_count,
                transfers,
            } => {
                let _ = write!(
                    text,
                    "Round {} settled: {} payments, {} transfers",
                    envelope.round_id,
                    payment_count,
                    transfers.len()
                );
                for line in self.transfer_lines(transfers) {
                    let _ = write!(text, "\n{line}");
                }
            }
        }

        text
    }
}
