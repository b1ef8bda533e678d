// ABOUTME: Output formatting for CLI feedback and published step outputs.
// ABOUTME: Supports normal, quiet (CI), JSON and GitHub Actions output modes.

use crate::error::{Error, Result};
use crate::observer::{Observer, WaitEvent};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
    /// Progress lines plus `::error::` / `::warning::` workflow commands
    Github,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if matches!(self.mode, OutputMode::Normal | OutputMode::Github) {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Github => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => {
                if let Some(json) = self.json_event("success", message) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Github => println!("::warning::{}", escape_workflow_data(message)),
            OutputMode::Json => {
                if let Some(json) = self.json_event("warning", message) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Github => {
                println!("::error::{}", escape_workflow_data(message));
            }
            OutputMode::Json => {
                if let Some(json) = self.json_event("error", message) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn json_event(&self, event: &str, message: &str) -> Option<String> {
        let event = JsonEvent {
            event,
            message,
            duration_secs: if self.start_time.is_some() {
                Some(self.elapsed_secs())
            } else {
                None
            },
        };
        serde_json::to_string(&event).ok()
    }
}

impl Observer for Output {
    fn notify(&self, event: &WaitEvent) {
        let message = match event {
            WaitEvent::DeployPending { elapsed } => {
                format!("  → Waiting for deploy to be created... ({elapsed:.1}s)")
            }
            WaitEvent::DeployFound {
                deploy_id,
                name,
                elapsed,
            } => format!("  ✓ Found deploy {deploy_id} for {name} ({elapsed:.1}s)"),
            WaitEvent::DeployBuilding { state, elapsed } => {
                format!("  → Deploy is {state}, waiting... ({elapsed:.1}s)")
            }
            WaitEvent::DeployPollFailed { error, elapsed } => {
                format!("  → Could not fetch deploy status: {error} ({elapsed:.1}s)")
            }
            WaitEvent::DeployReady { state, elapsed } => {
                format!("  ✓ Deploy is {state} ({elapsed:.1}s)")
            }
            WaitEvent::UrlAttemptFailed {
                attempt,
                attempts,
                error,
            } => format!("  → URL not reachable ({attempt}/{attempts}): {error}"),
            WaitEvent::UrlAvailable { url, .. } => format!("  ✓ {url} is reachable"),
        };
        self.progress(&message);
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// Escape a message for use in a GitHub workflow command.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Destination for the run's named outputs (`deploy_id`, `url`).
pub trait OutputSink {
    fn publish(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes `name=value` lines to the `GITHUB_OUTPUT` file, or stdout when
/// no such file is configured.
#[derive(Debug, Clone, Default)]
pub struct GithubOutput {
    path: Option<PathBuf>,
}

impl GithubOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from))
    }
}

impl OutputSink for GithubOutput {
    fn publish(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.path {
            Some(path) => std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| writeln!(file, "{name}={value}"))
                .map_err(|source| Error::OutputWrite {
                    path: path.clone(),
                    source,
                })?,
            None => println!("{name}={value}"),
        }
        tracing::debug!(output = name, value, "Published output");
        Ok(())
    }
}

/// Keeps published outputs in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    values: Vec<(String, String)>,
}

impl MemoryOutput {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OutputSink for MemoryOutput {
    fn publish(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
