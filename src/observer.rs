// ABOUTME: Progress events emitted by the wait loops and the sinks that consume them.
// ABOUTME: Decouples polling logic from how progress is logged or displayed.

use crate::types::DeployId;

/// A progress event from one of the three wait phases.
///
/// `elapsed` values are seconds since the phase started, rounded to 0.1s.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitEvent {
    /// No deploy for the commit yet; another poll follows.
    DeployPending { elapsed: f64 },
    DeployFound {
        deploy_id: DeployId,
        name: String,
        elapsed: f64,
    },
    /// The deploy exists but is not in a ready state.
    DeployBuilding { state: String, elapsed: f64 },
    /// Fetching the deploy's status failed; the poll will be retried.
    DeployPollFailed { error: String, elapsed: f64 },
    DeployReady { state: String, elapsed: f64 },
    UrlAttemptFailed {
        attempt: u32,
        attempts: u32,
        error: String,
    },
    UrlAvailable { url: String, attempt: u32 },
}

/// Receives progress events. Implementations must not fail the run.
pub trait Observer: Send + Sync {
    fn notify(&self, event: &WaitEvent);
}

/// Logs every event through `tracing` at `info`. Retried failures are not
/// warnings; `Output` already shows them as progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &WaitEvent) {
        match event {
            WaitEvent::DeployPending { elapsed } => {
                tracing::info!(elapsed, "Deploy not yet created, retrying");
            }
            WaitEvent::DeployFound {
                deploy_id,
                name,
                elapsed,
            } => {
                tracing::info!(%deploy_id, %name, elapsed, "Deploy found");
            }
            WaitEvent::DeployBuilding { state, elapsed } => {
                tracing::info!(%state, elapsed, "Deploy not yet ready, retrying");
            }
            WaitEvent::DeployPollFailed { error, elapsed } => {
                tracing::info!(%error, elapsed, "Failed to fetch deploy status, retrying");
            }
            WaitEvent::DeployReady { state, elapsed } => {
                tracing::info!(%state, elapsed, "Deploy ready");
            }
            WaitEvent::UrlAttemptFailed {
                attempt,
                attempts,
                error,
            } => {
                tracing::info!(attempt, attempts, %error, "URL not reachable yet");
            }
            WaitEvent::UrlAvailable { url, attempt } => {
                tracing::info!(%url, attempt, "URL available");
            }
        }
    }
}

impl<O: Observer + ?Sized> Observer for &O {
    fn notify(&self, event: &WaitEvent) {
        (**self).notify(event);
    }
}

/// Fan an event out to two observers in order.
impl<A: Observer, B: Observer> Observer for (A, B) {
    fn notify(&self, event: &WaitEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}
