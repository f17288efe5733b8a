//! Notification debouncing
//!
//! A keyed cache of the last emission time. Entries expire after the window;
//! callers own the cache and pass the clock in.

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

/// Default window between notifications for the same key
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Keyed expiring cache
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    // key -> last emission
    last_emitted: Arc<DashMap<String, DateTime<Utc>>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_WINDOW_SECS))
    }
}

impl Debouncer {
    /// Create debouncer with a window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emitted: Arc::new(DashMap::new()),
        }
    }

    /// Create debouncer with a window in seconds
    pub fn with_window_secs(seconds: u64) -> Self {
        Self::new(Duration::seconds(seconds as i64))
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// True when `key` has not been emitted within the window; records the
    /// emission when it returns true.
    pub fn should_emit(&self, key: &str, now: DateTime<Utc>) -> bool {
        match self.last_emitted.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                if now - *entry.get() < self.window {
                    return false;
                }
                entry.insert(now);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Drop the record for `key` so the next call emits
    pub fn forget(&self, key: &str) {
        self.last_emitted.remove(key);
    }

    /// Remove entries whose window has passed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.last_emitted.len();
        self.last_emitted
            .retain(|_, emitted| now - *emitted < self.window);
        before - self.last_emitted.len()
    }

    /// Keys currently tracked
    pub fn tracked(&self) -> usize {
        self.last_emitted.len()
    }
}
