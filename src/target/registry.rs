//! Target registry
//!
//! This module provides:
//! - Built-in target definitions
//! - Target lookup by name

use std::collections::HashMap;

use super::{AgentDefaults, DocumentKind, TargetProfile};
use crate::config::HookCategory;
use crate::hooks::{CategoryRule, EventNaming, HookSchema, InterpreterTable, TimeoutPolicy};

/// Registry of known targets, in declaration order
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<TargetProfile>,
    by_name: HashMap<String, usize>,
}

impl TargetRegistry {
    /// Create a new registry with the given targets
    pub fn new(targets: Vec<TargetProfile>) -> Self {
        let by_name = targets
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.name.clone(), idx))
            .collect();
        Self { targets, by_name }
    }

    /// Registry with the built-in targets
    pub fn builtin() -> Self {
        Self::new(builtin_targets())
    }

    /// Get a target by name
    pub fn get(&self, name: &str) -> Option<&TargetProfile> {
        self.by_name.get(name).and_then(|&idx| self.targets.get(idx))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TargetProfile> {
        let idx = *self.by_name.get(name)?;
        self.targets.get_mut(idx)
    }

    /// All targets in the registry
    pub fn all(&self) -> &[TargetProfile] {
        &self.targets
    }

    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Cursor-compatible `hooks.json` schema used by the remote target
pub fn remote_hook_schema() -> HookSchema {
    let interpreters = InterpreterTable::new("bash")
        .with("py", "python3")
        .with("ts", "bun run");

    HookSchema::new("hooks.json", 1, interpreters)
        .with_hook_root("hooks", 2)
        .with_matcher_key("tool_name")
        .with_rule(
            HookCategory::PreTool,
            CategoryRule::new(
                EventNaming::Fixed("preToolUse".to_string()),
                TimeoutPolicy::Seconds { default_ms: 60_000 },
            ),
        )
        .with_rule(
            HookCategory::PostTool,
            CategoryRule::new(
                EventNaming::Fixed("postToolUse".to_string()),
                TimeoutPolicy::Fixed { seconds: 30 },
            ),
        )
        .with_rule(
            HookCategory::Session,
            CategoryRule::new(
                EventNaming::table([
                    ("SessionStart", "sessionStart"),
                    ("SessionEnd", "sessionEnd"),
                    ("PreCompact", "preCompact"),
                ]),
                TimeoutPolicy::Seconds { default_ms: 60_000 },
            ),
        )
}

/// Remote-fetchable skills, agents and commands at the repository root
pub fn remote_target() -> TargetProfile {
    TargetProfile::new(
        "remote",
        "Remote-fetchable skills, agents and commands (Cursor, Codex, Copilot)",
        ".",
    )
    .with_kind(DocumentKind::Skill, "skills")
    .with_kind(DocumentKind::Agent, "agents")
    .with_kind(DocumentKind::Command, "commands")
    .with_skill_side_dir("references")
    .with_skill_side_dir("scripts")
    .with_skill_side_dir("assets")
    .with_agent_defaults(AgentDefaults::new("inherit", "is_background", "pm"))
    .with_hooks(remote_hook_schema())
}

/// Gemini CLI skills with version provenance
pub fn gemini_target() -> TargetProfile {
    TargetProfile::new("gemini", "Gemini CLI skills", "dist/gemini")
        .with_kind(DocumentKind::Skill, "skills")
        .with_skill_side_dir("references")
        .with_skill_side_dir("scripts")
        .with_version_stamp()
}

/// Get built-in target definitions
pub fn builtin_targets() -> Vec<TargetProfile> {
    vec![gemini_target(), remote_target()]
}
