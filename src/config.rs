//! Per-frame configuration.
//!
//! Configuration is a plain value handed to each frame at construction. There
//! is no process-wide mutable state.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Configuration for a single computation frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Name used in log events and the frame report.
    pub name: Option<Cow<'static, str>>,
    /// Emit a trace event for every successful step.
    pub trace_steps: bool,
    /// Emit a warning when a foreign failure is converted.
    pub log_foreign: bool,
}

impl FrameConfig {
    /// Creates a configuration with defaults: unnamed, step tracing and
    /// foreign-failure warnings enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            trace_steps: true,
            log_foreign: true,
        }
    }

    /// Sets the frame name.
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enables or disables per-step trace events.
    #[must_use]
    pub fn trace_steps(mut self, enabled: bool) -> Self {
        self.trace_steps = enabled;
        self
    }

    /// Enables or disables warnings for converted foreign failures.
    #[must_use]
    pub fn log_foreign(mut self, enabled: bool) -> Self {
        self.log_foreign = enabled;
        self
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::new()
    }
}
