//! Round Events
//!
//! Notifications for round activity:
//! - Events wrapped in envelopes and queued in an outbox
//! - A caller-owned debounce cache so bursts of score updates become one message
//! - A `Notifier` seam for the delivery channel
//!
//! Nothing here runs timers; the caller decides when to dispatch.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod debounce;
pub mod error;
pub mod event;
pub mod notifier;
pub mod outbox;
pub mod summary;

pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use event::{EventEnvelope, RoundEvent};
pub use notifier::{DispatchReport, Notifier, OutboxDispatcher, RecordingNotifier};
pub use outbox::Outbox;
pub use summary::NotificationBuilder;
