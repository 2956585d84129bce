//! Time sources.
//!
//! Queries that need "now" (the neighborhood trend) read it from a [`Clock`]
//! rather than from the system directly, so that tests and replays can pin
//! the current instant.

use chrono::{Duration, Utc};
use parking_lot::RwLock;

use crate::model::Timestamp;

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: RwLock::new(now) }
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.write() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read()
    }
}
