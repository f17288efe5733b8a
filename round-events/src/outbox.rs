//! In-memory event outbox

use crate::event::EventEnvelope;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// FIFO of events waiting to be dispatched
#[derive(Debug, Default)]
pub struct Outbox {
    queue: Mutex<VecDeque<EventEnvelope>>,
}

impl Outbox {
    /// Create empty outbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn publish(&self, envelope: EventEnvelope) {
        tracing::debug!(
            round = %envelope.round_id,
            kind = envelope.event.kind(),
            "event published"
        );
        self.queue.lock().push_back(envelope);
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<EventEnvelope> {
        self.queue.lock().drain(..).collect()
    }

    /// Put events back at the head, keeping their order
    pub fn requeue(&self, envelopes: Vec<EventEnvelope>) {
        let mut queue = self.queue.lock();
        for envelope in envelopes.into_iter().rev() {
            queue.push_front(envelope);
        }
    }

    /// Queued event count
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// No queued events
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RoundEvent;
    use uuid::Uuid;

    #[test]
    fn test_drain_is_fifo() {
        let outbox = Outbox::new();
        let round = Uuid::now_v7();
        outbox.publish(EventEnvelope::new(round, RoundEvent::RoundClosed));
        outbox.publish(EventEnvelope::new(
            round,
            RoundEvent::SettlementCompleted {
                payment_count: 0,
                transfers: vec![],
            },
        ));
        assert_eq!(outbox.len(), 2);

        let drained = outbox.drain();
        assert!(outbox.is_empty());
        assert_eq!(drained[0].event, RoundEvent::RoundClosed);
    }

    #[test]
    fn test_requeue_goes_to_front() {
        let outbox = Outbox::new();
        let round = Uuid::now_v7();
        let first = EventEnvelope::new(round, RoundEvent::RoundClosed);
        let first_id = first.id;
        outbox.publish(EventEnvelope::new(
            round,
            RoundEvent::SettlementCompleted {
                payment_count: 1,
                transfers: vec![],
            },
        ));
        outbox.requeue(vec![first]);

        assert_eq!(outbox.drain()[0].id, first_id);
    }
}
