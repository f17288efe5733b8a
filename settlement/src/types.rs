//! Core types for settlement engine

use chrono::{DateTime, Utc};
use round_core::{Payment, PlayerId, Transfer};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-player position across a round's payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBalance {
    /// Player
    pub player: PlayerId,

    /// Total owed to others
    pub total_owed: Decimal,

    /// Total owed by others
    pub total_receivable: Decimal,

    /// Net position (positive = net receiver, negative = net payer)
    pub net_position: Decimal,
}

impl PlayerBalance {
    /// Create new position
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            total_owed: Decimal::ZERO,
            total_receivable: Decimal::ZERO,
            net_position: Decimal::ZERO,
        }
    }

    /// Update position with a payment leg
    pub fn add_payment(&mut self, amount: Decimal, is_payer: bool) {
        if is_payer {
            self.total_owed += amount;
        } else {
            self.total_receivable += amount;
        }
        self.net_position = self.total_receivable - self.total_owed;
    }

    /// Check if net payer (owes money)
    pub fn is_net_payer(&self) -> bool {
        self.net_position < Decimal::ZERO
    }

    /// Check if net receiver (receives money)
    pub fn is_net_receiver(&self) -> bool {
        self.net_position > Decimal::ZERO
    }

    /// Get absolute net position
    pub fn abs_net_position(&self) -> Decimal {
        self.net_position.abs()
    }
}

/// Settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Payments generated and netted
    Netted,
    /// Payment set written to the store
    Stored,
}

/// Result of one settlement run for a round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSettlement {
    /// Settlement ID
    pub settlement_id: Uuid,

    /// Round
    pub round_id: Uuid,

    /// Gross payments in generation order
    pub payments: Vec<Payment>,

    /// Per-player positions, ordered by player id
    pub balances: Vec<PlayerBalance>,

    /// Netted transfers
    pub transfers: Vec<Transfer>,

    /// Total gross amount
    pub total_gross_amount: Decimal,

    /// Total net amount
    pub total_net_amount: Decimal,

    /// Netting efficiency (0.0 - 1.0)
    /// Higher = more netting
    pub netting_efficiency: f64,

    /// Settlement status
    pub status: SettlementStatus,

    /// Computed timestamp
    pub settled_at: DateTime<Utc>,
}

impl RoundSettlement {
    /// Calculate netting efficiency
    pub fn calculate_efficiency(&self) -> f64 {
        if self.total_gross_amount == Decimal::ZERO {
            return 0.0;
        }

        let netted = self.total_gross_amount - self.total_net_amount;
        let efficiency = netted / self.total_gross_amount;
        efficiency.to_f64().unwrap_or(0.0)
    }

    /// Calculate savings from netting
    pub fn calculate_savings(&self) -> Decimal {
        self.total_gross_amount - self.total_net_amount
    }

    /// Balance for a player
    pub fn balance(&self, player: &PlayerId) -> Option<&PlayerBalance> {
        self.balances.iter().find(|b| &b.player == player)
    }

    /// Summary statistics
    pub fn stats(&self) -> NettingStats {
        NettingStats {
            player_count: self.balances.len(),
            gross_payment_count: self.payments.len(),
            net_transfer_count: self.transfers.len(),
            total_gross: self.total_gross_amount,
            total_net: self.total_net_amount,
            amount_saved: self.calculate_savings(),
            efficiency: self.netting_efficiency,
            transfers_eliminated: self.payments.len().saturating_sub(self.transfers.len()),
        }
    }
}

/// Netting statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NettingStats {
    /// Number of players with a position
    pub player_count: usize,

    /// Number of gross payments
    pub gross_payment_count: usize,

    /// Number of net transfers
    pub net_transfer_count: usize,

    /// Total gross amount
    pub total_gross: Decimal,

    /// Total net amount
    pub total_net: Decimal,

    /// Amount saved
    pub amount_saved: Decimal,

    /// Netting efficiency (0.0 - 1.0)
    pub efficiency: f64,

    /// Number of transfers eliminated
    pub transfers_eliminated: usize,
}
