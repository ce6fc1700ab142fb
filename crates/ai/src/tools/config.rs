use std::time::Duration;

use super::constants::DEFAULT_TOOL_DEADLINE_SECS;

/// Per-call settings shared by every tool.
#[derive(Clone, Debug)]
pub struct ToolConfig {
    /// Upper bound on one tool call. The in-flight upstream request is
    /// dropped when it expires.
    pub deadline: Duration,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(DEFAULT_TOOL_DEADLINE_SECS),
        }
    }
}

impl ToolConfig {
    pub fn with_deadline(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// Read `INVESTOR_TOOL_DEADLINE_MS`, keeping the default when unset or
    /// unparseable.
    pub fn from_env() -> Self {
        std::env::var("INVESTOR_TOOL_DEADLINE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(|ms| Self::with_deadline(Duration::from_millis(ms)))
            .unwrap_or_default()
    }
}
