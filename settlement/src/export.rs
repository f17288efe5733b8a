//! Round export document
//!
//! Version 1 JSON: the round, its scorecards and, once settled, the payments
//! and transfers.

use crate::{types::RoundSettlement, Error, Result};
use chrono::{DateTime, Utc};
use round_core::{Payment, Round, Scorecard, Transfer};
use serde::{Deserialize, Serialize};

/// Current document version
pub const EXPORT_VERSION: u32 = 1;

/// Portable snapshot of a round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundExport {
    /// Document version
    pub version: u32,

    /// When the document was written
    pub exported_at: DateTime<Utc>,

    /// Round
    pub round: Round,

    /// Scorecards
    pub scorecards: Vec<Scorecard>,

    /// Gross payments
    #[serde(default)]
    pub payments: Vec<Payment>,

    /// Netted transfers
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

impl RoundExport {
    /// Export a round that has not been settled
    pub fn new(round: Round, scorecards: Vec<Scorecard>) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            round,
            scorecards,
            payments: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Attach a settlement's payments and transfers
    pub fn with_settlement(mut self, settlement: &RoundSettlement) -> Self {
        self.payments = settlement.payments.clone();
        self.transfers = settlement.transfers.clone();
        self
    }

    /// Parse a document, rejecting unknown versions
    pub fn from_json(json: &str) -> Result<Self> {
        let export: RoundExport = serde_json::from_str(json)?;
        if export.version != EXPORT_VERSION {
            return Err(Error::Other(format!(
                "unsupported export version {} (expected {})",
                export.version, EXPORT_VERSION
            )));
        }
        Ok(export)
    }

    /// Pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        netting::compute_settlement,
        test_support::{accepted_card, sample_round},
        wagering::settle,
    };
    use round_core::BetConfig;

    #[test]
    fn test_export_keeps_settlement() {
        let round = sample_round(&["a", "b"], BetConfig::default());
        let mut strokes = vec![4u32; 18];
        strokes[0] = 3;
        let cards = vec![
            accepted_card(&round, "a", &strokes),
            accepted_card(&round, "b", &[4u32; 18]),
        ];
        let payments = settle(&round, &cards, round.bets()).unwrap();
        let settlement = compute_settlement(round.id, payments, Utc::now());

        let export = RoundExport::new(round.clone(), cards).with_settlement(&settlement);
        let json = export.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["exportedAt"].is_string());

        let parsed = RoundExport::from_json(&json).unwrap();
        assert_eq!(parsed.round.id, round.id);
        assert_eq!(parsed.payments, settlement.payments);
        assert_eq!(parsed.transfers, settlement.transfers);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let round = sample_round(&["a"], BetConfig::default());
        let mut export = RoundExport::new(round, vec![]);
        export.version = 2;
        let json = export.to_json_pretty().unwrap();

        assert!(matches!(RoundExport::from_json(&json), Err(Error::Other(_))));
    }
}
