// ABOUTME: Optional deploy-wait.yml settings file.
// ABOUTME: Holds provider endpoints and poll cadences that have no CLI flag.

use crate::error::{Error, Result};
use crate::provider::{DEFAULT_API_URL, DEFAULT_PREVIEW_DOMAIN};
use crate::wait::{PollPolicy, UrlPolicy};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "deploy-wait.yml";
pub const CONFIG_FILENAME_ALT: &str = "deploy-wait.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub site_id: Option<String>,

    #[serde(default)]
    pub context: Option<String>,

    #[serde(default, with = "humantime_serde")]
    pub max_timeout: Option<Duration>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_preview_domain")]
    pub preview_domain: String,

    #[serde(default = "default_creation")]
    pub creation: PhaseConfig,

    #[serde(default = "default_readiness")]
    pub readiness: PhaseConfig,

    #[serde(default = "default_url_interval", with = "humantime_serde")]
    pub url_interval: Duration,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

/// Interval and budget for one polling phase.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseConfig {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl From<PhaseConfig> for PollPolicy {
    fn from(phase: PhaseConfig) -> Self {
        PollPolicy::new(phase.interval, phase.timeout)
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_preview_domain() -> String {
    DEFAULT_PREVIEW_DOMAIN.to_string()
}

fn default_creation() -> PhaseConfig {
    PhaseConfig {
        interval: PollPolicy::CREATION.interval,
        timeout: PollPolicy::CREATION.timeout,
    }
}

fn default_readiness() -> PhaseConfig {
    PhaseConfig {
        interval: PollPolicy::READINESS.interval,
        timeout: PollPolicy::READINESS.timeout,
    }
}

fn default_url_interval() -> Duration {
    UrlPolicy::DEFAULT_INTERVAL
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            site_id: None,
            context: None,
            max_timeout: None,
            api_url: default_api_url(),
            preview_domain: default_preview_domain(),
            creation: default_creation(),
            readiness: default_readiness(),
            url_interval: default_url_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl FileConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the settings file from `dir` if there is one, else defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }
}
