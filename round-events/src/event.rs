//! Event envelope for round notifications

use chrono::{DateTime, Utc};
use round_core::{PlayerId, Transfer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Something that happened in a round and may warrant a group notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoundEvent {
    /// Strokes recorded on a hole
    ScoreRecorded {
        /// Card owner
        player: PlayerId,
        /// Course hole number
        hole: u8,
    },

    /// A player signed their card
    ScorecardAccepted {
        /// Card owner
        player: PlayerId,
    },

    /// Round closed
    RoundClosed,

    /// Payments regenerated and netted
    SettlementCompleted {
        /// Gross payment count
        #[serde(rename = "paymentCount")]
        payment_count: usize,
        /// Netted transfers
        transfers: Vec<Transfer>,
    },
}

impl RoundEvent {
    /// Stable kind name
    pub fn kind(&self) -> &'static str {
        match self {
            RoundEvent::ScoreRecorded { .. } => "score_recorded",
            RoundEvent::ScorecardAccepted { .. } => "scorecard_accepted",
            RoundEvent::RoundClosed => "round_closed",
            RoundEvent::SettlementCompleted { .. } => "settlement_completed",
        }
    }
}

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event ID (UUIDv7 for ordering)
    pub id: Uuid,

    /// Round the event belongs to
    pub round_id: Uuid,

    /// Event
    pub event: RoundEvent,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Headers (metadata)
    pub headers: BTreeMap<String, String>,
}

impl EventEnvelope {
    /// Create new envelope stamped now
    pub fn new(round_id: Uuid, event: RoundEvent) -> Self {
        Self::at(round_id, event, Utc::now())
    }

    /// Create new envelope with an explicit timestamp
    pub fn at(round_id: Uuid, event: RoundEvent, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            round_id,
            event,
            timestamp,
            headers: BTreeMap::new(),
        }
    }

    /// Add header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Key under which notifications for this event are debounced.
    ///
    /// Score updates coalesce per round; acceptances stay distinct per player.
    pub fn debounce_key(&self) -> String {
        match &self.event {
            RoundEvent::ScorecardAccepted { player } => {
                format!("{}:{}:{}", self.round_id, self.event.kind(), player)
            }
            _ => format!("{}:{}", self.round_id, self.event.kind()),
        }
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
