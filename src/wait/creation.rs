// ABOUTME: Deploy-creation waiter.
// ABOUTME: Polls the site's deploy list until a deploy for the target commit appears.

use super::{PollContext, PollPolicy};
use crate::clock::elapsed_secs;
use crate::error::{Error, Result};
use crate::observer::WaitEvent;
use crate::provider::{Deploy, DeployProvider};
use crate::types::{CommitSha, SiteId};

/// Which deploy the creation waiter is looking for.
#[derive(Debug, Clone, Copy)]
pub struct DeployTarget<'a> {
    pub site_id: &'a SiteId,
    pub commit: &'a CommitSha,
    /// Only accept deploys from this context (e.g. `deploy-preview`).
    pub context: Option<&'a str>,
}

/// Wait until the provider lists a deploy for `target`.
///
/// The first matching deploy in provider order wins. A missing deploy list
/// fails immediately with [`Error::FetchFailed`]. The timeout is only checked
/// after a poll finds nothing, so the last poll may land up to one interval
/// past the budget.
pub async fn wait_for_deploy_creation(
    provider: &dyn DeployProvider,
    ctx: PollContext<'_>,
    target: DeployTarget<'_>,
    policy: PollPolicy,
) -> Result<Deploy> {
    let start = ctx.clock.now();

    loop {
        let deploys = provider
            .list_deploys(target.site_id)
            .await?
            .ok_or_else(|| Error::FetchFailed {
                site_id: target.site_id.to_string(),
            })?;

        let now = ctx.clock.now();
        let elapsed = elapsed_secs(start, now);

        if let Some(deploy) = deploys
            .into_iter()
            .find(|d| d.matches(target.commit, target.context))
        {
            ctx.observer.notify(&WaitEvent::DeployFound {
                deploy_id: deploy.id.clone(),
                name: deploy.name.clone(),
                elapsed,
            });
            return Ok(deploy);
        }

        if policy.is_exhausted(now.saturating_duration_since(start)) {
            return Err(Error::CreationTimeout {
                timeout_secs: policy.timeout.as_secs(),
            });
        }

        ctx.observer.notify(&WaitEvent::DeployPending { elapsed });
        ctx.clock.sleep(policy.interval).await;
    }
}
