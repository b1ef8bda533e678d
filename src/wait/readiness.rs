// ABOUTME: Deploy-readiness waiter.
// ABOUTME: Polls one deploy until its state is ready or current.

use super::{PollContext, PollPolicy};
use crate::clock::elapsed_secs;
use crate::error::{Error, Result};
use crate::observer::WaitEvent;
use crate::provider::{Deploy, DeployProvider};
use crate::types::{DeployId, SiteId};

/// Reported as the last known state when no poll ever succeeded.
pub const UNKNOWN_STATE: &str = "unknown";

/// Wait until the deploy reaches a ready state.
///
/// A failed poll is reported and retried like a not-ready state; the
/// timeout error carries the last state actually observed.
pub async fn wait_for_deploy_ready(
    provider: &dyn DeployProvider,
    ctx: PollContext<'_>,
    site_id: &SiteId,
    deploy_id: &DeployId,
    policy: PollPolicy,
) -> Result<Deploy> {
    let start = ctx.clock.now();
    let mut last_state: Option<String> = None;

    loop {
        let polled = provider.get_deploy(site_id, deploy_id).await;
        let now = ctx.clock.now();
        let elapsed = elapsed_secs(start, now);

        match polled {
            Ok(deploy) => {
                if deploy.is_ready() {
                    ctx.observer.notify(&WaitEvent::DeployReady {
                        state: deploy.state.clone(),
                        elapsed,
                    });
                    return Ok(deploy);
                }
                last_state = Some(deploy.state);
            }
            Err(e) => {
                ctx.observer.notify(&WaitEvent::DeployPollFailed {
                    error: e.to_string(),
                    elapsed,
                });
            }
        }

        if policy.is_exhausted(now.saturating_duration_since(start)) {
            return Err(Error::ReadinessTimeout {
                timeout_secs: policy.timeout.as_secs(),
                state: last_state.unwrap_or_else(|| UNKNOWN_STATE.to_string()),
            });
        }

        if let Some(state) = &last_state {
            ctx.observer.notify(&WaitEvent::DeployBuilding {
                state: state.clone(),
                elapsed,
            });
        }
        ctx.clock.sleep(policy.interval).await;
    }
}
