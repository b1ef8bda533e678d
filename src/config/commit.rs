// ABOUTME: Resolves the commit to wait for from the triggering CI event.
// ABOUTME: Pull requests use the head commit; everything else uses the event SHA.

use crate::diagnostics::{Diagnostics, Warning};
use serde::Deserialize;
use std::path::PathBuf;

/// The parts of a GitHub Actions event needed to pick a commit.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    /// `GITHUB_EVENT_NAME`
    pub event_name: Option<String>,
    /// `GITHUB_EVENT_PATH`, the JSON webhook payload.
    pub event_path: Option<PathBuf>,
    /// `GITHUB_SHA`
    pub sha: Option<String>,
}

impl EventContext {
    pub fn from_env() -> Self {
        Self {
            event_name: std::env::var("GITHUB_EVENT_NAME").ok(),
            event_path: std::env::var_os("GITHUB_EVENT_PATH").map(PathBuf::from),
            sha: std::env::var("GITHUB_SHA").ok(),
        }
    }

    fn is_pull_request(&self) -> bool {
        matches!(
            self.event_name.as_deref(),
            Some("pull_request" | "pull_request_target")
        )
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    head: PullRequestHead,
}

#[derive(Debug, Deserialize)]
struct PullRequestHead {
    sha: String,
}

/// Pick the commit SHA for this run.
///
/// An explicit value wins. Otherwise a pull request's head commit is used,
/// falling back to the event SHA. Payload read failures are recorded in
/// `diag` rather than failing the run; a missing commit is reported later
/// with the other required inputs.
pub fn resolve_commit(
    explicit: Option<&str>,
    event: &EventContext,
    diag: &mut Diagnostics,
) -> Option<String> {
    if let Some(sha) = explicit.filter(|s| !s.trim().is_empty()) {
        return Some(sha.trim().to_string());
    }

    if let Some(path) = &event.event_path {
        match read_payload(path) {
            Ok(payload) => {
                if let Some(pr) = payload.pull_request {
                    return Some(pr.head.sha);
                }
                if event.is_pull_request() {
                    diag.warn(Warning::event_payload(format!(
                        "{} event payload has no pull_request.head.sha, using GITHUB_SHA",
                        event.event_name.as_deref().unwrap_or("pull_request")
                    )));
                }
            }
            Err(reason) => {
                diag.warn(Warning::event_payload(format!(
                    "could not read event payload {}: {reason}, using GITHUB_SHA",
                    path.display()
                )));
            }
        }
    }

    event.sha.clone().filter(|s| !s.trim().is_empty())
}

fn read_payload(path: &std::path::Path) -> Result<EventPayload, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}
