// ABOUTME: The three polling phases: deploy creation, deploy readiness, URL availability.
// ABOUTME: Each phase is a bounded loop over an injected clock and observer.

mod creation;
mod readiness;
mod url;

pub use creation::{DeployTarget, wait_for_deploy_creation};
pub use readiness::{UNKNOWN_STATE, wait_for_deploy_ready};
pub use url::wait_for_url;

use crate::clock::Clock;
use crate::observer::Observer;
use std::time::Duration;

/// Retry cadence and wall-clock budget for one waiter invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    /// Deploy creation: poll every 5s for up to 5 minutes.
    pub const CREATION: PollPolicy = PollPolicy::new(Duration::from_secs(5), Duration::from_secs(300));

    /// Deploy readiness: poll every 10s for up to 15 minutes.
    pub const READINESS: PollPolicy =
        PollPolicy::new(Duration::from_secs(10), Duration::from_secs(900));

    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// The budget is spent only once elapsed time strictly exceeds it.
    pub fn is_exhausted(&self, elapsed: Duration) -> bool {
        elapsed > self.timeout
    }
}

/// Attempt-counted policy for the URL check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlPolicy {
    pub interval: Duration,
    pub budget: Duration,
}

impl UrlPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

    pub const fn new(interval: Duration, budget: Duration) -> Self {
        Self { interval, budget }
    }

    /// Number of probes allowed: `ceil(budget / interval)`.
    ///
    /// Equivalent to a zero-based counter running while it is below the
    /// fractional quotient, so a 10s budget at 3s yields 4 attempts.
    pub fn attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let quotient = self.budget.as_secs_f64() / self.interval.as_secs_f64();
        quotient.ceil() as u32
    }
}

/// Capabilities shared by every phase.
#[derive(Clone, Copy)]
pub struct PollContext<'a> {
    pub clock: &'a dyn Clock,
    pub observer: &'a dyn Observer,
}

impl<'a> PollContext<'a> {
    pub fn new(clock: &'a dyn Clock, observer: &'a dyn Observer) -> Self {
        Self { clock, observer }
    }
}
