// ABOUTME: Application-wide error types for deploy-wait.
// ABOUTME: Every wait phase returns these, so the entry point has one place to report failure.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required input: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    #[error("failed to fetch deploys for site {site_id}")]
    FetchFailed { site_id: String },

    #[error("timed out waiting for deploy to be created after {timeout_secs} seconds")]
    CreationTimeout { timeout_secs: u64 },

    #[error(
        "timed out waiting for deploy to become ready after {timeout_secs} seconds (last known state: {state})"
    )]
    ReadinessTimeout { timeout_secs: u64, state: String },

    #[error("unable to connect to {url} after {attempts} attempt(s)")]
    UrlUnavailable { url: String, attempts: u32 },

    #[error("deploy provider request failed: {0}")]
    Http(String),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write output to {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
