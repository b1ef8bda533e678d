// ABOUTME: Runs the three wait phases in order for one configured deploy.
// ABOUTME: Publishes the deploy id and preview URL as soon as the deploy exists.

use crate::clock::Clock;
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::observer::Observer;
use crate::output::OutputSink;
use crate::provider::{DeployProvider, UrlProbe};
use crate::types::DeployId;
use crate::wait::{
    DeployTarget, PollContext, wait_for_deploy_creation, wait_for_deploy_ready, wait_for_url,
};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutputs {
    pub deploy_id: DeployId,
    pub url: String,
    /// Ready state the deploy reached (`ready` or `current`).
    pub state: String,
}

/// Public preview URL of a deploy: `https://{deploy_id}--{name}.{domain}`.
pub fn preview_url(deploy_id: &DeployId, name: &str, domain: &str) -> String {
    format!("https://{deploy_id}--{name}.{domain}")
}

/// Sequences deploy creation, deploy readiness and URL availability.
pub struct Orchestrator<'a> {
    provider: &'a dyn DeployProvider,
    probe: &'a dyn UrlProbe,
    ctx: PollContext<'a>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        provider: &'a dyn DeployProvider,
        probe: &'a dyn UrlProbe,
        clock: &'a dyn Clock,
        observer: &'a dyn Observer,
    ) -> Self {
        Self {
            provider,
            probe,
            ctx: PollContext::new(clock, observer),
        }
    }

    /// Wait for the configured commit's deploy to be live.
    ///
    /// Outputs are published after the deploy is found, before readiness is
    /// checked. A failed publish is a warning; any phase failing ends the run
    /// with that phase's error.
    pub async fn run(
        &self,
        config: &Config,
        outputs: &mut dyn OutputSink,
        diag: &mut Diagnostics,
    ) -> Result<RunOutputs> {
        tracing::debug!(
            site_id = %config.site_id,
            commit = %config.commit,
            context = config.context.as_deref(),
            "Waiting for deploy"
        );

        let target = DeployTarget {
            site_id: &config.site_id,
            commit: &config.commit,
            context: config.context.as_deref(),
        };
        let deploy =
            wait_for_deploy_creation(self.provider, self.ctx, target, config.creation).await?;

        let url = preview_url(&deploy.id, &deploy.name, &config.preview_domain);
        for (name, value) in [("deploy_id", deploy.id.as_str()), ("url", url.as_str())] {
            if let Err(e) = outputs.publish(name, value) {
                diag.warn(Warning::output_publish(format!(
                    "could not publish output {name}: {e}"
                )));
            }
        }

        let ready = wait_for_deploy_ready(
            self.provider,
            self.ctx,
            &config.site_id,
            &deploy.id,
            config.readiness,
        )
        .await?;

        wait_for_url(self.probe, self.ctx, &url, config.url).await?;

        Ok(RunOutputs {
            deploy_id: deploy.id,
            url,
            state: ready.state,
        })
    }
}
