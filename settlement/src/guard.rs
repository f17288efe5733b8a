//! Per-round settlement guard
//!
//! At most one settlement runs per round at a time. A run holds a
//! [`SettlementPermit`]; dropping the permit releases the round.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Tracks rounds with a settlement in flight
#[derive(Debug, Clone, Default)]
pub struct SettlementGuard {
    // round -> start of the running settlement
    in_flight: Arc<Mutex<HashMap<Uuid, DateTime<Utc>>>>,
}

impl SettlementGuard {
    /// Create new guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a round, failing if a settlement for it is already running
    pub fn try_acquire(&self, round_id: Uuid) -> Result<SettlementPermit> {
        let mut in_flight = self.in_flight.lock();

        if let Some(started_at) = in_flight.get(&round_id) {
            tracing::warn!(
                round = %round_id,
                started_at = %started_at,
                "settlement already in progress"
            );
            return Err(Error::SettlementInProgress(round_id));
        }

        in_flight.insert(round_id, Utc::now());
        Ok(SettlementPermit {
            round_id,
            in_flight: self.in_flight.clone(),
        })
    }

    /// Whether a settlement for the round is running
    pub fn is_in_flight(&self, round_id: Uuid) -> bool {
        self.in_flight.lock().contains_key(&round_id)
    }

    /// Number of rounds being settled
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// Exclusive claim on a round's settlement
#[derive(Debug)]
pub struct SettlementPermit {
    round_id: Uuid,
    in_flight: Arc<Mutex<HashMap<Uuid, DateTime<Utc>>>>,
}

impl SettlementPermit {
    /// Claimed round
    pub fn round_id(&self) -> Uuid {
        self.round_id
    }
}

impl Drop for SettlementPermit {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.round_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_claim_rejected() {
        let guard = SettlementGuard::new();
        let round = Uuid::now_v7();

        let permit = guard.try_acquire(round).unwrap();
        assert!(guard.is_in_flight(round));
        assert!(matches!(
            guard.try_acquire(round),
            Err(Error::SettlementInProgress(id)) if id == round
        ));

        drop(permit);
        assert!(!guard.is_in_flight(round));
        assert!(guard.try_acquire(round).is_ok());
    }

    #[test]
    fn test_different_rounds_run_together() {
        let guard = SettlementGuard::new();
        let first = guard.try_acquire(Uuid::now_v7()).unwrap();
        let second = guard.try_acquire(Uuid::now_v7()).unwrap();

        assert_ne!(first.round_id(), second.round_id());
        assert_eq!(guard.in_flight_count(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let guard = SettlementGuard::new();
        let other = guard.clone();
        let round = Uuid::now_v7();

        let _permit = guard.try_acquire(round).unwrap();
        assert!(other.try_acquire(round).is_err());
    }
}
