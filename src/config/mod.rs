// ABOUTME: Run configuration assembled once at the process boundary.
// ABOUTME: Merges CLI/env inputs over the settings file and validates required values.

mod commit;
mod file;

pub use commit::{EventContext, resolve_commit};
pub use file::{CONFIG_FILENAME, CONFIG_FILENAME_ALT, FileConfig, PhaseConfig};

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::types::{CommitSha, SiteId};
use crate::wait::{PollPolicy, UrlPolicy};
use std::time::Duration;

/// Default budget for the URL check, in seconds.
pub const DEFAULT_MAX_TIMEOUT_SECS: u64 = 60;

/// Raw inputs as supplied by flags or the environment.
///
/// Empty strings count as absent, matching how CI systems pass unset inputs.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub token: Option<String>,
    pub site_id: Option<String>,
    pub context: Option<String>,
    pub max_timeout: Option<String>,
    pub commit: Option<String>,
    pub api_url: Option<String>,
}

/// Validated, immutable settings for one run.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub site_id: SiteId,
    pub commit: CommitSha,
    pub context: Option<String>,
    pub api_url: String,
    pub preview_domain: String,
    pub creation: PollPolicy,
    pub readiness: PollPolicy,
    pub url: UrlPolicy,
    pub request_timeout: Duration,
}

impl Config {
    /// Build the run configuration.
    ///
    /// Every missing required input (token, site id, commit) is collected
    /// into a single [`Error::ConfigurationMissing`].
    pub fn from_inputs(inputs: Inputs, file: FileConfig, diag: &mut Diagnostics) -> Result<Self> {
        let token = non_empty(inputs.token);
        let site_id = non_empty(inputs.site_id).or_else(|| non_empty(file.site_id));
        let commit = non_empty(inputs.commit);

        let mut missing = Vec::new();
        if token.is_none() {
            missing.push("token");
        }
        if site_id.is_none() {
            missing.push("site_id");
        }
        if commit.is_none() {
            missing.push("commit");
        }

        let (Some(token), Some(site_id), Some(commit)) = (token, site_id, commit) else {
            return Err(Error::ConfigurationMissing(missing));
        };

        let commit = CommitSha::new(&commit)
            .map_err(|e| Error::InvalidConfig(format!("commit {commit:?}: {e}")))?;

        let max_timeout = match non_empty(inputs.max_timeout) {
            Some(raw) => Duration::from_secs(parse_seconds(&raw)?),
            None => file
                .max_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_MAX_TIMEOUT_SECS)),
        };

        let creation = PollPolicy::from(file.creation);
        let readiness = PollPolicy::from(file.readiness);
        for (name, interval) in [
            ("creation.interval", creation.interval),
            ("readiness.interval", readiness.interval),
            ("url_interval", file.url_interval),
        ] {
            if interval.is_zero() {
                return Err(Error::InvalidConfig(format!("{name} must be greater than zero")));
            }
        }

        let url = UrlPolicy::new(file.url_interval, max_timeout);
        if url.attempts() == 0 {
            diag.warn(Warning::url_budget(format!(
                "max_timeout of {}s allows no URL checks; the run will fail after the deploy is ready",
                max_timeout.as_secs()
            )));
        }

        Ok(Self {
            token,
            site_id: SiteId::new(site_id),
            commit,
            context: non_empty(inputs.context).or_else(|| non_empty(file.context)),
            api_url: non_empty(inputs.api_url).unwrap_or(file.api_url),
            preview_domain: file.preview_domain,
            creation,
            readiness,
            url,
            request_timeout: file.request_timeout,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("site_id", &self.site_id)
            .field("commit", &self.commit)
            .field("context", &self.context)
            .field("api_url", &self.api_url)
            .field("preview_domain", &self.preview_domain)
            .field("creation", &self.creation)
            .field("readiness", &self.readiness)
            .field("url", &self.url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_seconds(raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| Error::InvalidConfig(format!("max_timeout must be whole seconds, got {raw:?}")))
}
