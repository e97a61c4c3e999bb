//! Canonical hook configuration (`hooks:` section of loaf.yaml)
//!
//! ```yaml
//! hooks:
//!   pre-tool:
//!     - script: hooks/pre-tool/check-secrets.sh
//!       matcher: "Edit|Write"
//!       timeout: 45000
//!   session:
//!     - script: hooks/session/restore.py
//!       event: SessionStart
//! ```

use serde::{Deserialize, Serialize};

/// Trigger category of a hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookCategory {
    PreTool,
    PostTool,
    Session,
}

impl HookCategory {
    /// Fixed processing order used when translating
    pub const ORDER: [HookCategory; 3] = [
        HookCategory::PreTool,
        HookCategory::PostTool,
        HookCategory::Session,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HookCategory::PreTool => "pre-tool",
            HookCategory::PostTool => "post-tool",
            HookCategory::Session => "session",
        }
    }
}

/// One canonical hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDefinition {
    /// Script path, e.g. `hooks/pre-tool/format.py`
    pub script: String,

    /// Tool-name filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    /// Timeout in milliseconds
    #[serde(default, rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Session event name (session hooks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

#[cfg(test)]
impl HookDefinition {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            matcher: None,
            timeout_ms: None,
            event: None,
        }
    }

    pub fn with_matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}

/// Hooks grouped by category, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    #[serde(rename = "pre-tool")]
    pub pre_tool: Vec<HookDefinition>,

    #[serde(rename = "post-tool")]
    pub post_tool: Vec<HookDefinition>,

    pub session: Vec<HookDefinition>,
}

impl HookConfig {
    /// Hooks declared for a category
    pub fn category(&self, category: HookCategory) -> &[HookDefinition] {
        match category {
            HookCategory::PreTool => &self.pre_tool,
            HookCategory::PostTool => &self.post_tool,
            HookCategory::Session => &self.session,
        }
    }

    pub fn len(&self) -> usize {
        self.pre_tool.len() + self.post_tool.len() + self.session.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
