//! Debt netting
//!
//! Collapses a round's gross payments into a short list of transfers.
//!
//! # Algorithm
//!
//! 1. Calculate the net position of each player (received − paid)
//! 2. Order net payers and net receivers by amount, largest first, ties by
//!    player id
//! 3. Walk both lists once, moving `min(payer remaining, receiver remaining)`
//!    and advancing whichever side is exhausted
//!
//! The walk finishes in at most `payers + receivers` steps and leaves every
//! position at zero. It does not search for the minimum possible number of
//! transfers: positions that could pair off exactly may still be split.
//!
//! # Example
//!
//! ```text
//! Gross payments:
//!   A pays B: $30
//!   B pays C: $20
//!   C pays A: $10
//!
//! Net positions:
//!   A: -$20 (net payer)
//!   B: +$10 (net receiver)
//!   C: +$10 (net receiver)
//!
//! Transfers:
//!   A pays B: $10
//!   A pays C: $10
//! ```

use crate::types::{PlayerBalance, RoundSettlement, SettlementStatus};
use chrono::{DateTime, Utc};
use round_core::{Payment, PlayerId, Transfer};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Net position of every player that appears in `payments`
pub fn net_positions(payments: &[Payment]) -> BTreeMap<PlayerId, PlayerBalance> {
    let mut positions: BTreeMap<PlayerId, PlayerBalance> = BTreeMap::new();

    for payment in payments {
        positions
            .entry(payment.from.clone())
            .or_insert_with(|| PlayerBalance::new(payment.from.clone()))
            .add_payment(payment.amount, true);

        positions
            .entry(payment.to.clone())
            .or_insert_with(|| PlayerBalance::new(payment.to.clone()))
            .add_payment(payment.amount, false);
    }

    positions
}

/// Transfers that settle `payments`
pub fn net_transfers(payments: &[Payment]) -> Vec<Transfer> {
    transfers_for(&net_positions(payments))
}

/// Transfers that clear a set of positions
pub fn transfers_for(positions: &BTreeMap<PlayerId, PlayerBalance>) -> Vec<Transfer> {
    let mut payers: Vec<(PlayerId, Decimal)> = positions
        .values()
        .filter(|p| p.is_net_payer())
        .map(|p| (p.player.clone(), p.abs_net_position()))
        .collect();

    let mut receivers: Vec<(PlayerId, Decimal)> = positions
        .values()
        .filter(|p| p.is_net_receiver())
        .map(|p| (p.player.clone(), p.abs_net_position()))
        .collect();

    let largest_first =
        |a: &(PlayerId, Decimal), b: &(PlayerId, Decimal)| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0));
    payers.sort_by(largest_first);
    receivers.sort_by(largest_first);

    let mut transfers = Vec::with_capacity(payers.len() + receivers.len());
    let (mut i, mut j) = (0, 0);

    while i < payers.len() && j < receivers.len() {
        let amount = payers[i].1.min(receivers[j].1);
        transfers.push(Transfer {
            from: payers[i].0.clone(),
            to: receivers[j].0.clone(),
            amount,
        });

        payers[i].1 -= amount;
        receivers[j].1 -= amount;

        if payers[i].1.is_zero() {
            i += 1;
        }
        if receivers[j].1.is_zero() {
            j += 1;
        }
    }

    transfers
}

/// Net a round's payments into a settlement report
pub fn compute_settlement(
    round_id: Uuid,
    payments: Vec<Payment>,
    settled_at: DateTime<Utc>,
) -> RoundSettlement {
    let positions = net_positions(&payments);
    let transfers = transfers_for(&positions);

    let total_gross_amount: Decimal = payments.iter().map(|p| p.amount).sum();
    let total_net_amount: Decimal = transfers.iter().map(|t| t.amount).sum();

    let netting_efficiency = if total_gross_amount > Decimal::ZERO {
        ((total_gross_amount - total_net_amount) / total_gross_amount)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };

    tracing::debug!(
        round = %round_id,
        gross = %total_gross_amount,
        net = %total_net_amount,
        transfers = transfers.len(),
        "payments netted"
    );

    RoundSettlement {
        settlement_id: Uuid::now_v7(),
        round_id,
        payments,
        balances: positions.into_values().collect(),
        transfers,
        total_gross_amount,
        total_net_amount,
        netting_efficiency,
        status: SettlementStatus::Netted,
        settled_at,
    }
}
