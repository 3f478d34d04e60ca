//! Shared helpers for connection unit tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Fixed base instant for deterministic timestamp assertions.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0)
        .single()
        .expect("valid base timestamp")
}

/// Clock that advances one second per query, starting at [`base_time`].
///
/// Successive reads are strictly increasing, which makes timestamp
/// monotonicity assertions deterministic.
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl StepClock {
    /// Creates a clock positioned at [`base_time`].
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        base_time() + Duration::seconds(tick)
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.next().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.next()
    }
}
