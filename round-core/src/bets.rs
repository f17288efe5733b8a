//! Bet configuration
//!
//! Stored and exchanged as a flat `name -> amount` mapping. Names that match
//! a [`BetCategory`] are monetized; every other name is a penalty category
//! that is recorded on scorecards for display and never produces a payment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Monetized bet category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BetCategory {
    /// Lowest net on a single hole
    HoleWinner,
    /// Lowest net over a nine
    Medal,
    /// Lowest net over the full 18
    Match,
    /// Par saved from a bunker
    SandyPar,
    /// One under par
    Birdie,
    /// Two under par
    Eagle,
    /// Three or more under par
    Albatross,
    /// Holed from off the green (no putts)
    HoleOut,
    /// Par after a water hazard
    WetPar,
    /// Par-3 tee shot finishing on the green
    OhYes,
}

impl BetCategory {
    /// Every category, in configuration order
    pub const ALL: [BetCategory; 10] = [
        BetCategory::HoleWinner,
        BetCategory::Medal,
        BetCategory::Match,
        BetCategory::SandyPar,
        BetCategory::Birdie,
        BetCategory::Eagle,
        BetCategory::Albatross,
        BetCategory::HoleOut,
        BetCategory::WetPar,
        BetCategory::OhYes,
    ];

    /// Configuration key
    pub fn key(&self) -> &'static str {
        match self {
            BetCategory::HoleWinner => "holeWinner",
            BetCategory::Medal => "medal",
            BetCategory::Match => "match",
            BetCategory::SandyPar => "sandyPar",
            BetCategory::Birdie => "birdie",
            BetCategory::Eagle => "eagle",
            BetCategory::Albatross => "albatross",
            BetCategory::HoleOut => "holeOut",
            BetCategory::WetPar => "wetPar",
            BetCategory::OhYes => "ohYes",
        }
    }

    /// Parse from configuration key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl fmt::Display for BetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Amount per bet category plus display-only penalty categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Decimal>", into = "BTreeMap<String, Decimal>")]
pub struct BetConfig {
    amounts: BTreeMap<BetCategory, Decimal>,
    penalties: BTreeMap<String, Decimal>,
}

impl BetConfig {
    /// Empty configuration: every category disabled
    pub fn empty() -> Self {
        Self {
            amounts: BTreeMap::new(),
            penalties: BTreeMap::new(),
        }
    }

    /// Split a flat mapping into monetized and penalty categories
    pub fn from_flat(flat: BTreeMap<String, Decimal>) -> Self {
        let mut config = Self::empty();
        for (name, amount) in flat {
            match BetCategory::from_key(&name) {
                Some(category) => {
                    config.amounts.insert(category, amount);
                }
                None => {
                    config.penalties.insert(name, amount);
                }
            }
        }
        config
    }

    /// Set a category amount
    pub fn with_amount(mut self, category: BetCategory, amount: Decimal) -> Self {
        self.amounts.insert(category, amount);
        self
    }

    /// Record a penalty category
    pub fn with_penalty(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.penalties.insert(name.into(), amount);
        self
    }

    /// Amount for a category, `None` when absent or not positive (disabled)
    pub fn amount(&self, category: BetCategory) -> Option<Decimal> {
        self.amounts
            .get(&category)
            .copied()
            .filter(|amount| *amount > Decimal::ZERO)
    }

    /// Penalty category names
    pub fn penalty_categories(&self) -> impl Iterator<Item = &str> {
        self.penalties.keys().map(String::as_str)
    }

    /// Whether a name is a recorded penalty category
    pub fn is_penalty(&self, name: &str) -> bool {
        self.penalties.contains_key(name)
    }

    /// Flat `name -> amount` mapping
    pub fn to_flat(&self) -> BTreeMap<String, Decimal> {
        self.amounts
            .iter()
            .map(|(category, amount)| (category.key().to_string(), *amount))
            .chain(
                self.penalties
                    .iter()
                    .map(|(name, amount)| (name.clone(), *amount)),
            )
            .collect()
    }
}

impl Default for BetConfig {
    fn default() -> Self {
        Self::empty()
            .with_amount(BetCategory::HoleWinner, Decimal::from(30))
            .with_amount(BetCategory::Medal, Decimal::from(120))
            .with_amount(BetCategory::Match, Decimal::from(120))
            .with_amount(BetCategory::SandyPar, Decimal::from(20))
            .with_amount(BetCategory::Birdie, Decimal::from(30))
            .with_amount(BetCategory::Eagle, Decimal::from(50))
            .with_amount(BetCategory::Albatross, Decimal::from(80))
            .with_amount(BetCategory::HoleOut, Decimal::from(40))
            .with_amount(BetCategory::WetPar, Decimal::from(20))
            .with_amount(BetCategory::OhYes, Decimal::from(30))
            .with_penalty("pinkies", Decimal::from(15))
            .with_penalty("cuatriputt", Decimal::from(15))
            .with_penalty("saltapatras", Decimal::from(15))
            .with_penalty("paloma", Decimal::from(15))
            .with_penalty("nerdina", Decimal::from(25))
    }
}

impl From<BTreeMap<String, Decimal>> for BetConfig {
    fn from(flat: BTreeMap<String, Decimal>) -> Self {
        Self::from_flat(flat)
    }
}

impl From<BetConfig> for BTreeMap<String, Decimal> {
    fn from(config: BetConfig) -> Self {
        config.to_flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_amounts() {
        let config = BetConfig::default();
        assert_eq!(config.amount(BetCategory::Medal), Some(Decimal::from(120)));
        assert_eq!(config.amount(BetCategory::OhYes), Some(Decimal::from(30)));
        assert!(config.is_penalty("nerdina"));
        assert_eq!(config.penalty_categories().count(), 5);
    }

    #[test]
    fn test_flat_mapping_splits_penalties() {
        let json = r#"{"holeWinner": 10, "birdie": 5, "pinkies": 15}"#;
        let config: BetConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.amount(BetCategory::HoleWinner), Some(Decimal::from(10)));
        assert_eq!(config.amount(BetCategory::Medal), None);
        assert!(config.is_penalty("pinkies"));
        assert_eq!(config.to_flat().len(), 3);
    }

    #[test]
    fn test_zero_amount_disables_category() {
        let config = BetConfig::empty().with_amount(BetCategory::Eagle, Decimal::ZERO);
        assert_eq!(config.amount(BetCategory::Eagle), None);
    }
}
