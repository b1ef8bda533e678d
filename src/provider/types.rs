// ABOUTME: Deploy records as returned by the provider API.
// ABOUTME: Only the fields the wait loops inspect are modelled; the rest are ignored.

use crate::types::{CommitSha, DeployId};
use serde::{Deserialize, Serialize};

/// Provider states that mean the deploy is published.
pub const READY_STATES: [&str; 2] = ["ready", "current"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deploy {
    pub id: DeployId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub commit_ref: Option<String>,

    #[serde(default)]
    pub context: Option<String>,

    #[serde(default)]
    pub state: String,
}

impl Deploy {
    pub fn is_ready(&self) -> bool {
        READY_STATES.contains(&self.state.as_str())
    }

    /// True when this deploy was built from `commit` and, if a context is
    /// given, belongs to that context.
    pub fn matches(&self, commit: &CommitSha, context: Option<&str>) -> bool {
        if self.commit_ref.as_deref() != Some(commit.as_str()) {
            return false;
        }

        match context {
            Some(ctx) => self.context.as_deref() == Some(ctx),
            None => true,
        }
    }
}
