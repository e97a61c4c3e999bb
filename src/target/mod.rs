//! Build targets
//!
//! This module handles:
//! - Target definitions (TargetProfile, DocumentKind, AgentDefaults)
//! - Built-in target registry (via registry module)
//! - Applying loaf.yaml overrides and selecting targets (via loader module)
//!
//! Everything that differs between targets lives in its [`TargetProfile`];
//! the build pipeline never branches on a target name.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::frontmatter::{Frontmatter, layer};
use crate::hooks::HookSchema;

pub mod loader;
pub mod registry;

/// Kind of canonical document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    Skill,
    Agent,
    Command,
}

impl DocumentKind {
    #[cfg(test)]
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Skill,
        DocumentKind::Agent,
        DocumentKind::Command,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Skill => "skill",
            DocumentKind::Agent => "agent",
            DocumentKind::Command => "command",
        }
    }

    /// Directory holding this kind in the canonical tree
    pub fn source_dir_name(self) -> &'static str {
        match self {
            DocumentKind::Skill => "skills",
            DocumentKind::Agent => "agents",
            DocumentKind::Command => "commands",
        }
    }

    /// Description used when a document declares none
    pub fn placeholder_description(self, name: &str) -> String {
        match self {
            DocumentKind::Skill => format!("{name} skill"),
            DocumentKind::Agent => format!("{name} agent for specialized tasks"),
            DocumentKind::Command => format!("{name} command"),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default frontmatter for agents on a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDefaults {
    /// Value of `model`
    pub model: String,

    /// Boolean key marking background execution, e.g. `is_background`
    pub background_key: String,

    /// Agent that orchestrates the others and runs in the foreground
    pub orchestrator: String,
}

impl AgentDefaults {
    pub fn new(
        model: impl Into<String>,
        background_key: impl Into<String>,
        orchestrator: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            background_key: background_key.into(),
            orchestrator: orchestrator.into(),
        }
    }

    /// Defaults layer for one agent
    pub fn layer_for(&self, agent_name: &str) -> Frontmatter {
        let background = agent_name != self.orchestrator;
        let mut defaults = layer([("model", Value::String(self.model.clone()))]);
        defaults.insert(
            Value::String(self.background_key.clone()),
            Value::Bool(background),
        );
        defaults
    }
}

/// Output layout of one supported document kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindLayout {
    pub kind: DocumentKind,
    /// Directory under the target output root
    pub dir: String,
}

/// Everything the pipeline needs to know about one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProfile {
    /// Target identifier (e.g. "remote", "gemini"); also the sidecar suffix
    pub name: String,

    /// One-line description shown by `loaf targets`
    pub description: String,

    /// Output root relative to the project root
    pub output: PathBuf,

    /// Supported kinds and where they go
    pub layouts: Vec<KindLayout>,

    /// Side directories copied along with each skill
    pub skill_side_dirs: Vec<String>,

    pub agent_defaults: Option<AgentDefaults>,

    /// Append `version: <project version>` to every document
    pub stamp_version: bool,

    /// Hook artifact schema, `None` when the target has no hooks
    pub hooks: Option<HookSchema>,

    /// Built by `loaf build` without `--target`
    pub enabled: bool,
}

impl TargetProfile {
    /// Create a target supporting no kinds yet
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            output: output.into(),
            layouts: Vec::new(),
            skill_side_dirs: Vec::new(),
            agent_defaults: None,
            stamp_version: false,
            hooks: None,
            enabled: true,
        }
    }

    /// Support a kind, written under `dir`
    pub fn with_kind(mut self, kind: DocumentKind, dir: impl Into<String>) -> Self {
        self.layouts.push(KindLayout {
            kind,
            dir: dir.into(),
        });
        self
    }

    pub fn with_skill_side_dir(mut self, dir: impl Into<String>) -> Self {
        self.skill_side_dirs.push(dir.into());
        self
    }

    pub fn with_agent_defaults(mut self, defaults: AgentDefaults) -> Self {
        self.agent_defaults = Some(defaults);
        self
    }

    pub fn with_version_stamp(mut self) -> Self {
        self.stamp_version = true;
        self
    }

    pub fn with_hooks(mut self, schema: HookSchema) -> Self {
        self.hooks = Some(schema);
        self
    }

    #[cfg(test)]
    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.kind_dir(kind).is_some()
    }

    /// Output directory name for a kind, `None` when unsupported
    pub fn kind_dir(&self, kind: DocumentKind) -> Option<&str> {
        self.layouts
            .iter()
            .find(|layout| layout.kind == kind)
            .map(|layout| layout.dir.as_str())
    }

    /// Supported kinds in declaration order
    pub fn kinds(&self) -> impl Iterator<Item = DocumentKind> + '_ {
        self.layouts.iter().map(|layout| layout.kind)
    }

    /// Output root resolved against the project root
    pub fn output_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output)
    }

    /// Directories and files this target owns and regenerates each build
    pub fn owned_paths(&self, project_root: &Path) -> Vec<PathBuf> {
        let root = self.output_root(project_root);
        let mut owned: Vec<PathBuf> = self
            .layouts
            .iter()
            .map(|layout| root.join(&layout.dir))
            .collect();
        if let Some(schema) = &self.hooks {
            owned.push(root.join(&schema.artifact));
        }
        owned
    }
}
