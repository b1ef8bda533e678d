// ABOUTME: Time source and delay primitive used by the wait loops.
// ABOUTME: TokioClock sleeps for real; ManualClock advances instantly for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Capability for reading the current instant and suspending the caller.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Suspend the current task without blocking the runtime thread.
    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `tokio::time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock: `sleep` returns immediately after moving time forward.
///
/// Every requested sleep is recorded so callers can assert on retry cadence.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Move time forward without recording a sleep (simulates request latency).
    pub fn advance(&self, duration: Duration) {
        *self.offset.lock() += duration;
    }

    /// Virtual time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        self.advance(duration);
    }
}

/// Seconds from `start` to `now`, rounded to one decimal place.
pub fn elapsed_secs(start: Instant, now: Instant) -> f64 {
    let millis = now.saturating_duration_since(start).as_millis();
    (millis as f64 / 100.0).round() / 10.0
}
