//! Clock abstraction for determinism.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wraps another clock so that readings never go backwards within the
/// process, even if the wrapped clock is adjusted.
///
/// Readings are truncated to microsecond precision, which is what the
/// notification store keeps.
#[derive(Debug)]
pub struct MonotonicClock<C> {
    inner: C,
    last_micros: AtomicI64,
}

impl<C: Clock> MonotonicClock<C> {
    /// Creates a monotonic view over `inner`.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            last_micros: AtomicI64::new(i64::MIN),
        }
    }
}

impl<C: Clock> Clock for MonotonicClock<C> {
    fn now(&self) -> DateTime<Utc> {
        let reading = self.inner.now();
        let micros = reading.timestamp_micros();
        let previous = self.last_micros.fetch_max(micros, Ordering::SeqCst);
        DateTime::from_timestamp_micros(previous.max(micros)).unwrap_or(reading)
    }
}
