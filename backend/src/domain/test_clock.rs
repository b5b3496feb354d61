//! Shared test double for the injected clock.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// A clock frozen at a chosen instant.
pub(crate) struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// A stable reference instant well away from month boundaries.
    pub(crate) fn at_reference() -> Self {
        Self::new(reference_instant())
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Mid-month noon, so day arithmetic never crosses a month boundary by
/// accident.
pub(crate) fn reference_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("reference instant is unambiguous"),
    }
}
