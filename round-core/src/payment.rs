//! Payments and transfers produced by settlement
//!
//! A round's payments are always replaced as a complete set when settlement
//! is recomputed; they are never patched one by one.

use crate::{bets::BetCategory, types::PlayerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category tag carried by every payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentItem {
    /// Lowest net on holes 1-9
    MedalFront,
    /// Lowest net on holes 10-18
    MedalBack,
    /// Lowest net over 18 holes
    Match,
    /// Lowest net on a hole
    HoleWinner,
    /// One under par
    Birdie,
    /// Two under par
    Eagle,
    /// Three or more under par
    Albatross,
    /// Par saved from a bunker
    SandyPar,
    /// Holed with zero putts
    HoleOut,
    /// Par after water
    WetPar,
    /// Par-3 tee shot on the green
    OhYes,
}

impl PaymentItem {
    /// Bet category whose amount applies
    pub fn category(&self) -> BetCategory {
        match self {
            PaymentItem::MedalFront | PaymentItem::MedalBack => BetCategory::Medal,
            PaymentItem::Match => BetCategory::Match,
            PaymentItem::HoleWinner => BetCategory::HoleWinner,
            PaymentItem::Birdie => BetCategory::Birdie,
            PaymentItem::Eagle => BetCategory::Eagle,
            PaymentItem::Albatross => BetCategory::Albatross,
            PaymentItem::SandyPar => BetCategory::SandyPar,
            PaymentItem::HoleOut => BetCategory::HoleOut,
            PaymentItem::WetPar => BetCategory::WetPar,
            PaymentItem::OhYes => BetCategory::OhYes,
        }
    }

    /// Tag as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentItem::MedalFront => "medalFront",
            PaymentItem::MedalBack => "medalBack",
            PaymentItem::Match => "match",
            PaymentItem::HoleWinner => "holeWinner",
            PaymentItem::Birdie => "birdie",
            PaymentItem::Eagle => "eagle",
            PaymentItem::Albatross => "albatross",
            PaymentItem::SandyPar => "sandyPar",
            PaymentItem::HoleOut => "holeOut",
            PaymentItem::WetPar => "wetPar",
            PaymentItem::OhYes => "ohYes",
        }
    }

    /// Whether this is a per-occurrence bonus
    pub fn is_bonus(&self) -> bool {
        !matches!(
            self,
            PaymentItem::MedalFront
                | PaymentItem::MedalBack
                | PaymentItem::Match
                | PaymentItem::HoleWinner
        )
    }
}

impl fmt::Display for PaymentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directed obligation produced by a settlement run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Round
    pub round: Uuid,

    /// Payer
    pub from: PlayerId,

    /// Payee
    pub to: PlayerId,

    /// Amount
    pub amount: Decimal,

    /// Category tag
    pub item: PaymentItem,

    /// Triggering hole, where applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole: Option<u8>,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Netted point-to-point transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Payer
    pub from: PlayerId,

    /// Payee
    pub to: PlayerId,

    /// Amount
    pub amount: Decimal,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}
