//! Per-target hook schema description
//!
//! A [`HookSchema`] tells the translator how a target names its events,
//! which timeout unit it uses, how it invokes scripts and where it expects
//! hook scripts to live.

use std::collections::BTreeMap;

use crate::config::{HookCategory, HookDefinition};
use crate::error::{Result, hook_event_missing};

/// Timeout handling for one hook category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Whole seconds (floor of milliseconds / 1000), `default_ms` when unset
    Seconds { default_ms: u64 },
    /// Always this many seconds, the canonical value is ignored
    Fixed { seconds: u64 },
}

impl TimeoutPolicy {
    /// Timeout in the target's unit
    pub fn resolve(self, timeout_ms: Option<u64>) -> u64 {
        match self {
            TimeoutPolicy::Seconds { default_ms } => timeout_ms.unwrap_or(default_ms) / 1000,
            TimeoutPolicy::Fixed { seconds } => seconds,
        }
    }
}

/// How a category's hooks are keyed in the target schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventNaming {
    /// Every hook of the category goes under one key
    Fixed(String),
    /// Keyed by the hook's own event name through a lookup table.
    /// Names missing from the table fall back to lower case.
    Table(BTreeMap<String, String>),
}

impl EventNaming {
    pub fn table<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EventNaming::Table(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Target event key for a hook
    pub fn resolve(&self, hook: &HookDefinition) -> Result<String> {
        match self {
            EventNaming::Fixed(key) => Ok(key.clone()),
            EventNaming::Table(table) => {
                let event = hook
                    .event
                    .as_deref()
                    .ok_or_else(|| hook_event_missing(&hook.script))?;
                if let Some(key) = table.get(event) {
                    return Ok(key.clone());
                }
                let fallback = event.to_lowercase();
                tracing::debug!(
                    event,
                    key = %fallback,
                    "no event mapping, falling back to lower case"
                );
                Ok(fallback)
            }
        }
    }
}

/// Translation rule for one canonical category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub naming: EventNaming,
    pub timeout: TimeoutPolicy,
}

impl CategoryRule {
    pub fn new(naming: EventNaming, timeout: TimeoutPolicy) -> Self {
        Self { naming, timeout }
    }
}

/// Interpreter selection keyed by script extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterTable {
    by_extension: Vec<(String, String)>,
    default: String,
}

impl InterpreterTable {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            by_extension: Vec::new(),
            default: default.into(),
        }
    }

    /// Map a file extension (without the dot) to an interpreter command
    pub fn with(mut self, extension: impl Into<String>, interpreter: impl Into<String>) -> Self {
        self.by_extension
            .push((extension.into(), interpreter.into()));
        self
    }

    /// Interpreter for a script path
    pub fn select(&self, script: &str) -> &str {
        let file_name = script.rsplit('/').next().unwrap_or(script);
        let extension = file_name.rsplit_once('.').map(|(_, ext)| ext);
        extension
            .and_then(|ext| {
                self.by_extension
                    .iter()
                    .find(|(known, _)| known == ext)
                    .map(|(_, interpreter)| interpreter.as_str())
            })
            .unwrap_or(&self.default)
    }
}

/// Native hook schema of one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSchema {
    /// Artifact file name, relative to the target output root
    pub artifact: String,

    /// Value of the top-level `version` field
    pub schema_version: u32,

    /// Directory hook scripts are referenced from
    pub hook_root: String,

    /// Trailing script path segments kept under `hook_root`
    pub kept_segments: usize,

    /// Key of the matcher sub-object, e.g. `tool_name`
    pub matcher_key: String,

    pub interpreters: InterpreterTable,

    rules: BTreeMap<HookCategory, CategoryRule>,
}

impl HookSchema {
    pub fn new(artifact: impl Into<String>, schema_version: u32, interpreters: InterpreterTable) -> Self {
        Self {
            artifact: artifact.into(),
            schema_version,
            hook_root: "hooks".to_string(),
            kept_segments: 2,
            matcher_key: "tool_name".to_string(),
            interpreters,
            rules: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, category: HookCategory, rule: CategoryRule) -> Self {
        self.rules.insert(category, rule);
        self
    }

    pub fn with_hook_root(mut self, hook_root: impl Into<String>, kept_segments: usize) -> Self {
        self.hook_root = hook_root.into();
        self.kept_segments = kept_segments;
        self
    }

    pub fn with_matcher_key(mut self, key: impl Into<String>) -> Self {
        self.matcher_key = key.into();
        self
    }

    /// Rule for a category, `None` when the target has no such trigger
    pub fn rule(&self, category: HookCategory) -> Option<&CategoryRule> {
        self.rules.get(&category)
    }

    /// Command string the target runs for a script
    pub fn command_for(&self, script: &str) -> String {
        let segments: Vec<&str> = script.split('/').filter(|s| !s.is_empty()).collect();
        let keep = self.kept_segments.min(segments.len());
        let tail = segments[segments.len() - keep..].join("/");
        let interpreter = self.interpreters.select(script);
        if self.hook_root.is_empty() {
            format!("{interpreter} {tail}")
        } else {
            format!("{interpreter} {}/{tail}", self.hook_root)
        }
    }
}
