//! Notification delivery
//!
//! The dispatcher drains the outbox, keeps only the newest envelope per
//! debounce key and forwards it once the key's window has passed. Envelopes
//! still inside their window and failed deliveries go back to the outbox for
//! a later pass, where a newer envelope with the same key supersedes them.

use crate::{
    debounce::Debouncer, event::EventEnvelope, outbox::Outbox, summary::NotificationBuilder,
    Error, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

/// Delivery channel for rendered notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification
    async fn notify(&self, envelope: &EventEnvelope, text: &str) -> Result<()>;
}

/// Notifier that keeps everything it is sent
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Uuid, String)>>,
    failing: Mutex<bool>,
}

impl RecordingNotifier {
    /// Create recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent deliveries fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    /// Delivered (round, text) pairs in order
    pub fn sent(&self) -> Vec<(Uuid, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, envelope: &EventEnvelope, text: &str) -> Result<()> {
        if *self.failing.lock() {
            return Err(Error::Notify("recording notifier set to fail".to_string()));
        }
        self.sent.lock().push((envelope.round_id, text.to_string()));
        Ok(())
    }
}

/// Outcome of one dispatch pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Forwarded to the notifier
    pub delivered: usize,
    /// Superseded by a newer envelope with the same key in this pass
    pub coalesced: usize,
    /// Key still inside its debounce window; requeued
    pub deferred: usize,
    /// Notifier failed; requeued
    pub failed: usize,
}

/// Drains an outbox into a notifier
pub struct OutboxDispatcher {
    outbox: Arc<Outbox>,
    debouncer: Debouncer,
    notifier: Arc<dyn Notifier>,
    builder: NotificationBuilder,
}

impl std::fmt::Debug for OutboxDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboxDispatcher")
            .field("queued", &self.outbox.len())
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl OutboxDispatcher {
    /// Create dispatcher
    pub fn new(outbox: Arc<Outbox>, debouncer: Debouncer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            outbox,
            debouncer,
            notifier,
            builder: NotificationBuilder::default(),
        }
    }

    /// Replace the message renderer
    pub fn with_builder(mut self, builder: NotificationBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Debounce cache
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Run one dispatch pass at `now`
    pub async fn dispatch(&self, now: DateTime<Utc>) -> DispatchReport {
        let purged = self.debouncer.purge_expired(now);
        let batch = self.outbox.drain();
        let mut report = DispatchReport::default();
        if batch.is_empty() {
            return report;
        }

        let mut newest: HashMap<String, usize> = HashMap::new();
        for (idx, envelope) in batch.iter().enumerate() {
            newest.insert(envelope.debounce_key(), idx);
        }

        let mut pending = Vec::new();
        for (idx, envelope) in batch.into_iter().enumerate() {
            let key = envelope.debounce_key();
            if newest.get(&key) != Some(&idx) {
                report.coalesced += 1;
                continue;
            }
            if !self.debouncer.should_emit(&key, now) {
                report.deferred += 1;
                pending.push(envelope);
                continue;
            }

            let text = self.builder.render(&envelope);
            match self.notifier.notify(&envelope, &text).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        round = %envelope.round_id,
                        kind = envelope.event.kind(),
                        error = %e,
                        "notification failed, requeued"
                    );
                    self.debouncer.forget(&key);
                    report.failed += 1;
                    pending.push(envelope);
                }
            }
        }

        if !pending.is_empty() {
            self.outbox.requeue(pending);
        }

        tracing::info!(
            delivered = report.delivered,
            coalesced = report.coalesced,
            deferred = report.deferred,
            failed = report.failed,
            purged,
            "notifications dispatched"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RoundEvent;
    use chrono::Duration;
    use round_core::PlayerId;

    fn score(round: Uuid, player: &str, hole: u8) -> EventEnvelope {
        EventEnvelope::new(
            round,
            RoundEvent::ScoreRecorded {
                player: PlayerId::new(player),
                hole,
            },
        )
    }

    fn dispatcher(notifier: Arc<RecordingNotifier>) -> (Arc<Outbox>, OutboxDispatcher) {
        let outbox = Arc::new(Outbox::new());
        let dispatcher =
            OutboxDispatcher::new(outbox.clone(), Debouncer::with_window_secs(60), notifier);
        (outbox, dispatcher)
    }

    #[tokio::test]
    async fn test_burst_of_scores_sends_one_message() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (outbox, dispatcher) = dispatcher(notifier.clone());
        let round = Uuid::now_v7();
        for hole in 1..=4 {
            outbox.publish(score(round, "ana", hole));
        }

        let report = dispatcher.dispatch(Utc::now()).await;

        assert_eq!(report.delivered, 1);
        assert_eq!(report.coalesced, 3);
        assert_eq!(notifier.sent()[0].1, "ana recorded hole 4");
    }

    #[tokio::test]
    async fn test_window_suppresses_then_releases() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (outbox, dispatcher) = dispatcher(notifier.clone());
        let round = Uuid::now_v7();
        let now = Utc::now();

        outbox.publish(score(round, "ana", 1));
        assert_eq!(dispatcher.dispatch(now).await.delivered, 1);

        outbox.publish(score(round, "ana", 2));
        let report = dispatcher.dispatch(now + Duration::seconds(30)).await;
        assert_eq!(report.deferred, 1);
        assert_eq!(outbox.len(), 1);

        outbox.publish(score(round, "ana", 3));
        let report = dispatcher.dispatch(now + Duration::seconds(61)).await;
        assert_eq!(report.delivered, 1);
        assert_eq!(report.coalesced, 1);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].1, "ana recorded hole 3");
    }

    #[tokio::test]
    async fn test_deferred_update_sent_after_window() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (outbox, dispatcher) = dispatcher(notifier.clone());
        let round = Uuid::now_v7();
        let now = Utc::now();

        outbox.publish(score(round, "ana", 1));
        dispatcher.dispatch(now).await;

        outbox.publish(score(round, "ana", 2));
        let report = dispatcher.dispatch(now + Duration::seconds(30)).await;
        assert_eq!(report.delivered, 0);
        assert_eq!(report.deferred, 1);

        let report = dispatcher.dispatch(now + Duration::seconds(120)).await;
        assert_eq!(report.delivered, 1);
        assert!(outbox.is_empty());

        let texts: Vec<String> = notifier.sent().into_iter().map(|(_, text)| text).collect();
        assert_eq!(texts, vec!["ana recorded hole 1", "ana recorded hole 2"]);
    }

    #[tokio::test]
    async fn test_dispatch_purges_expired_keys() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (outbox, dispatcher) = dispatcher(notifier.clone());
        let now = Utc::now();

        for _ in 0..3 {
            outbox.publish(EventEnvelope::new(Uuid::now_v7(), RoundEvent::RoundClosed));
        }
        dispatcher.dispatch(now).await;
        assert_eq!(dispatcher.debouncer().tracked(), 3);

        let report = dispatcher.dispatch(now + Duration::seconds(90)).await;
        assert_eq!(report, DispatchReport::default());
        assert_eq!(dispatcher.debouncer().tracked(), 0);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_requeued() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (outbox, dispatcher) = dispatcher(notifier.clone());
        let round = Uuid::now_v7();
        let now = Utc::now();

        notifier.set_failing(true);
        outbox.publish(EventEnvelope::new(round, RoundEvent::RoundClosed));
        let report = dispatcher.dispatch(now).await;
        assert_eq!(report.failed, 1);
        assert_eq!(outbox.len(), 1);

        notifier.set_failing(false);
        let report = dispatcher.dispatch(now).await;
        assert_eq!(report.delivered, 1);
        assert!(outbox.is_empty());
    }
}
