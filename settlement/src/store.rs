//! Payment storage
//!
//! A round's payments are only ever written as a complete set.

use crate::{types::PlayerBalance, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use round_core::Payment;
use uuid::Uuid;

/// Storage for generated payments
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Replace every stored payment of a round with `payments`
    async fn replace_payments(&self, round_id: Uuid, payments: Vec<Payment>) -> Result<()>;

    /// Stored payments of a round, in generation order
    async fn payments(&self, round_id: Uuid) -> Result<Vec<Payment>>;

    /// Drop a round's payments
    async fn delete_round(&self, round_id: Uuid) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct InMemoryPaymentStore {
    rounds: DashMap<Uuid, Vec<Payment>>,
}

impl InMemoryPaymentStore {
    /// Create empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds with stored payments
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn replace_payments(&self, round_id: Uuid, payments: Vec<Payment>) -> Result<()> {
        tracing::debug!(round = %round_id, payments = payments.len(), "replacing payments");
        self.rounds.insert(round_id, payments);
        Ok(())
    }

    async fn payments(&self, round_id: Uuid) -> Result<Vec<Payment>> {
        Ok(self
            .rounds
            .get(&round_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn delete_round(&self, round_id: Uuid) -> Result<()> {
        self.rounds.remove(&round_id);
        Ok(())
    }
}

/// Per-player summary of a round's stored payments
pub async fn round_summary(
    store: &dyn PaymentStore,
    round_id: Uuid,
) -> Result<Vec<PlayerBalance>> {
    let payments = store.payments(round_id).await?;
    Ok(crate::netting::net_positions(&payments)
        .into_values()
        .collect())
}
