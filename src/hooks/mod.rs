//! Hook schema translation
//!
//! Converts the canonical hook configuration into a target's native hook
//! artifact:
//!
//! ```json
//! {
//!   "version": 1,
//!   "hooks": {
//!     "preToolUse": [
//!       { "command": "bash hooks/pre-tool/check.sh", "timeout": 45, "matcher": { "tool_name": "Edit" } }
//!     ],
//!     "sessionStart": [
//!       { "command": "python3 hooks/session/restore.py", "timeout": 60 }
//!     ]
//!   }
//! }
//! ```
//!
//! Categories are processed in the order pre-tool, post-tool, session. Event
//! keys appear in the order they are first produced, and within a key
//! entries keep the order in which they were declared.

pub mod schema;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{HookCategory, HookConfig, HookDefinition};
use crate::error::{Result, file_write_failed};

pub use schema::{CategoryRule, EventNaming, HookSchema, InterpreterTable, TimeoutPolicy};

/// One hook in target schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedHook {
    pub command: String,

    /// Timeout in the target's unit
    pub timeout: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<BTreeMap<String, String>>,
}

/// Native hook configuration artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookArtifact {
    pub version: u32,
    pub hooks: IndexMap<String, Vec<TranslatedHook>>,
}

impl HookArtifact {
    /// Number of translated entries across all event keys
    pub fn entry_count(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }
}

/// Pretty JSON with a trailing newline for an artifact bound for `path`.
/// Failures name that path.
fn artifact_json<T: Serialize>(value: &T, path: &Path) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| file_write_failed(path.display().to_string(), e.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn translate_hook(
    hook: &HookDefinition,
    rule: &CategoryRule,
    schema: &HookSchema,
) -> TranslatedHook {
    TranslatedHook {
        command: schema.command_for(&hook.script),
        timeout: rule.timeout.resolve(hook.timeout_ms),
        matcher: hook.matcher.as_ref().map(|matcher| {
            BTreeMap::from([(schema.matcher_key.clone(), matcher.clone())])
        }),
    }
}

/// Translate the canonical hook configuration into a target schema
pub fn translate_hooks(config: &HookConfig, schema: &HookSchema) -> Result<HookArtifact> {
    let mut hooks: IndexMap<String, Vec<TranslatedHook>> = IndexMap::new();

    for category in HookCategory::ORDER {
        let definitions = config.category(category);
        if definitions.is_empty() {
            continue;
        }
        let Some(rule) = schema.rule(category) else {
            tracing::debug!(
                category = category.as_str(),
                count = definitions.len(),
                "target has no trigger for category, skipping"
            );
            continue;
        };

        for hook in definitions {
            let key = rule.naming.resolve(hook)?;
            hooks
                .entry(key)
                .or_default()
                .push(translate_hook(hook, rule, schema));
        }
    }

    Ok(HookArtifact {
        version: schema.schema_version,
        hooks,
    })
}

/// Translate and write the artifact under `output_root`. Returns the
/// written path and the artifact.
pub fn write_hooks(
    config: &HookConfig,
    schema: &HookSchema,
    output_root: &Path,
) -> Result<(PathBuf, HookArtifact)> {
    let artifact = translate_hooks(config, schema)?;
    let path = output_root.join(&schema.artifact);
    let json = artifact_json(&artifact, &path)?;
    crate::common::fs::write_file(&path, json)?;
    tracing::debug!(path = %path.display(), entries = artifact.entry_count(), "wrote hook artifact");
    Ok((path, artifact))
}
