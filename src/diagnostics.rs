// ABOUTME: Diagnostics accumulator for non-fatal warnings raised during a run.
// ABOUTME: Collects warnings that shouldn't fail the run but should be shown to users.

/// Collects non-fatal warnings during input resolution and output publishing.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create an event payload warning.
    pub fn event_payload(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::EventPayload,
            message: message.into(),
        }
    }

    /// Create a URL budget warning.
    pub fn url_budget(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UrlBudget,
            message: message.into(),
        }
    }

    /// Create an output publish warning.
    pub fn output_publish(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::OutputPublish,
            message: message.into(),
        }
    }
}

/// Categories of non-fatal warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// CI event payload could not be read; fell back to the event's commit.
    EventPayload,
    /// The URL budget allows no probe attempts at all.
    UrlBudget,
    /// A step output could not be written; the run carries on without it.
    OutputPublish,
}
