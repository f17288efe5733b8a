//! Main settlement engine
//!
//! Orchestrates the per-round guard, payment generation, netting, storage,
//! metrics and the settlement event.

use crate::{
    config::Config,
    guard::SettlementGuard,
    metrics::Metrics,
    netting,
    store::{round_summary, InMemoryPaymentStore, PaymentStore},
    types::*,
    wagering, Result,
};
use chrono::Utc;
use round_core::{Payment, Round, Scorecard};
use round_events::{
    Debouncer, EventEnvelope, NotificationBuilder, Notifier, Outbox, OutboxDispatcher, RoundEvent,
};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Settlement engine
pub struct SettlementEngine {
    /// Payment storage
    store: Arc<dyn PaymentStore>,

    /// One settlement per round at a time
    guard: SettlementGuard,

    /// Pending notifications
    outbox: Arc<Outbox>,

    /// Prometheus metrics, when enabled
    metrics: Option<Metrics>,

    /// Configuration
    config: Config,
}

impl std::fmt::Debug for SettlementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementEngine")
            .field("service_name", &self.config.service_name)
            .field("in_flight", &self.guard.in_flight_count())
            .field("queued_events", &self.outbox.len())
            .finish()
    }
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config, store: Arc<dyn PaymentStore>, outbox: Arc<Outbox>) -> Result<Self> {
        let metrics = if config.metrics_enabled {
            Some(Metrics::new()?)
        } else {
            None
        };

        tracing::info!(
            service = %config.service_name,
            version = %config.service_version,
            "settlement engine ready"
        );

        Ok(Self {
            store,
            guard: SettlementGuard::new(),
            outbox,
            metrics,
            config,
        })
    }

    /// Engine backed by an in-memory store and a fresh outbox
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::new(
            config,
            Arc::new(InMemoryPaymentStore::new()),
            Arc::new(Outbox::new()),
        )
    }

    /// Settle a round: generate payments, net them and replace the stored set
    pub async fn run_settlement(
        &self,
        round: &Round,
        scorecards: &[Scorecard],
    ) -> Result<RoundSettlement> {
        let result = self.settle_exclusive(round, scorecards).await;

        if let Err(e) = &result {
            tracing::warn!(round = %round.id, error = %e, "settlement refused");
            if let Some(metrics) = &self.metrics {
                metrics.record_rejected();
            }
        }

        result
    }

    async fn settle_exclusive(
        &self,
        round: &Round,
        scorecards: &[Scorecard],
    ) -> Result<RoundSettlement> {
        let _permit = self.guard.try_acquire(round.id)?;
        let started = Instant::now();

        tracing::info!(round = %round.id, cards = scorecards.len(), "starting settlement");

        // Step 1: Generate payments
        let payments = wagering::settle(round, scorecards, round.bets())?;

        // Step 2: Net them
        let mut settlement = netting::compute_settlement(round.id, payments, Utc::now());

        // Step 3: Replace the stored set
        self.store
            .replace_payments(round.id, settlement.payments.clone())
            .await?;
        settlement.status = SettlementStatus::Stored;

        if let Some(metrics) = &self.metrics {
            metrics.record_run(
                settlement.payments.len(),
                settlement.transfers.len(),
                started.elapsed().as_secs_f64(),
            );
        }

        // Step 4: Queue the group notification
        if self.config.notifications.enabled {
            self.outbox.publish(
                EventEnvelope::new(
                    round.id,
                    RoundEvent::SettlementCompleted {
                        payment_count: settlement.payments.len(),
                        transfers: settlement.transfers.clone(),
                    },
                )
                .with_header("service", self.config.service_name.clone()),
            );
        }

        tracing::info!(
            "Settlement complete for round {}: {} gross → {} net ({:.1}% efficiency)",
            round.id,
            settlement.total_gross_amount,
            settlement.total_net_amount,
            settlement.netting_efficiency * 100.0
        );

        Ok(settlement)
    }

    /// Stored payments of a round
    pub async fn payments(&self, round_id: Uuid) -> Result<Vec<Payment>> {
        self.store.payments(round_id).await
    }

    /// Per-player balances from the stored payments
    pub async fn summary(&self, round_id: Uuid) -> Result<Vec<PlayerBalance>> {
        round_summary(self.store.as_ref(), round_id).await
    }

    /// Dispatcher draining this engine's outbox into `notifier`
    pub fn dispatcher(&self, notifier: Arc<dyn Notifier>) -> OutboxDispatcher {
        let mut builder = NotificationBuilder::new();
        if let Some(heading) = &self.config.notifications.heading {
            builder = builder.with_heading(heading.clone());
        }

        OutboxDispatcher::new(
            self.outbox.clone(),
            Debouncer::with_window_secs(self.config.notifications.debounce_seconds),
            notifier,
        )
        .with_builder(builder)
    }

    /// Per-round guard
    pub fn guard(&self) -> &SettlementGuard {
        &self.guard
    }

    /// Event outbox
    pub fn outbox(&self) -> &Arc<Outbox> {
        &self.outbox
    }

    /// Metrics, when enabled
    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
