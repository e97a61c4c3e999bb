//! Per-document transformation
//!
//! Projects one canonical document into a target tree: the frontmatter is
//! merged from its layers, the body is written back unchanged, and skills
//! bring their side directories along.
//!
//! Layer precedence, lowest first:
//! 1. target defaults for the kind (agents only)
//! 2. canonical frontmatter
//! 3. derived identity (`name`, `description` fallbacks)
//! 4. sidecar override for the target
//! 5. `version` stamp on provenance-tracking targets

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::common::fs as loaf_fs;
use crate::error::{LoafError, Result, file_write_failed};
use crate::frontmatter::{Frontmatter, get_str, layer, merge_layers, parse_document, render_document};
use crate::sidecar::load_sidecar;
use crate::target::{DocumentKind, TargetProfile};

/// File holding a skill's body inside its directory
pub const SKILL_FILE: &str = "SKILL.md";

/// Sidecar base name for skills (`SKILL.<target>.yaml`)
pub const SKILL_SIDECAR_BASE: &str = "SKILL";

/// A canonical document located in the source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDocument {
    pub kind: DocumentKind,

    /// Filesystem-derived name (skill directory or file stem)
    pub name: String,

    /// Markdown file with frontmatter and body
    pub source: PathBuf,

    /// Directory holding the document's sidecars
    pub dir: PathBuf,

    /// Base of sidecar file names
    pub sidecar_base: String,
}

impl CanonicalDocument {
    /// Skill stored as `<skills>/<name>/SKILL.md`
    pub fn skill(skill_dir: &Path, name: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::Skill,
            name: name.into(),
            source: skill_dir.join(SKILL_FILE),
            dir: skill_dir.to_path_buf(),
            sidecar_base: SKILL_SIDECAR_BASE.to_string(),
        }
    }

    /// Agent or command stored as a single markdown file
    pub fn file(kind: DocumentKind, path: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            source: path.to_path_buf(),
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            sidecar_base: name.clone(),
            name,
        }
    }
}

/// Per-target inputs shared by every document of a build
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    pub target: &'a TargetProfile,
    pub output_root: &'a Path,
    /// Project version, required only when the target stamps it
    pub version: Option<&'a str>,
}

/// What one transformation produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutcome {
    /// Written document, `None` when there was nothing to write
    pub written: Option<PathBuf>,
    /// Side directories copied
    pub side_dirs: usize,
}

/// Destination of a document inside the target tree, `None` when the target
/// does not support the kind
pub fn destination(doc: &CanonicalDocument, ctx: &TransformContext<'_>) -> Option<PathBuf> {
    let kind_dir = ctx.output_root.join(ctx.target.kind_dir(doc.kind)?);
    Some(match doc.kind {
        DocumentKind::Skill => kind_dir.join(&doc.name).join(SKILL_FILE),
        DocumentKind::Agent | DocumentKind::Command => kind_dir.join(format!("{}.md", doc.name)),
    })
}

fn is_absent(frontmatter: &Frontmatter, key: &str) -> bool {
    match frontmatter.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Fallbacks for `name` and `description`. Keys the canonical frontmatter
/// already sets are left out so its values pass through untouched.
fn identity_layer(doc: &CanonicalDocument, canonical: &Frontmatter) -> Frontmatter {
    let mut identity = Frontmatter::new();
    if is_absent(canonical, "name") {
        identity.insert(Value::from("name"), Value::from(doc.name.clone()));
    }
    if is_absent(canonical, "description") {
        let name = get_str(canonical, "name").unwrap_or_else(|| doc.name.clone());
        identity.insert(
            Value::from("description"),
            Value::from(doc.kind.placeholder_description(&name)),
        );
    }
    identity
}

/// Merge every frontmatter layer for a document on a target
pub fn merged_frontmatter(
    doc: &CanonicalDocument,
    canonical: &Frontmatter,
    ctx: &TransformContext<'_>,
) -> Result<Frontmatter> {
    let mut layers = Vec::with_capacity(5);

    if doc.kind == DocumentKind::Agent {
        if let Some(defaults) = &ctx.target.agent_defaults {
            layers.push(defaults.layer_for(&doc.name));
        }
    }
    layers.push(canonical.clone());
    layers.push(identity_layer(doc, canonical));
    layers.push(load_sidecar(&doc.dir, &doc.sidecar_base, &ctx.target.name)?);

    if ctx.target.stamp_version {
        let version = ctx.version.ok_or_else(|| LoafError::VersionUnavailable {
            target: ctx.target.name.clone(),
        })?;
        layers.push(layer([("version", Value::String(version.to_string()))]));
    }

    Ok(merge_layers(layers))
}

fn copy_side_dirs(doc: &CanonicalDocument, dest_dir: &Path, ctx: &TransformContext<'_>) -> Result<usize> {
    let mut copied = 0;
    for side in &ctx.target.skill_side_dirs {
        let src = doc.dir.join(side);
        if !src.is_dir() {
            continue;
        }
        let dst = dest_dir.join(side);
        loaf_fs::copy_dir_recursive(&src, &dst)
            .map_err(|e| file_write_failed(dst.display().to_string(), e.to_string()))?;
        copied += 1;
    }
    Ok(copied)
}

/// Transform one canonical document into the target tree
pub fn transform_document(
    doc: &CanonicalDocument,
    ctx: &TransformContext<'_>,
) -> Result<TransformOutcome> {
    let Some(dest) = destination(doc, ctx) else {
        tracing::debug!(kind = %doc.kind, name = %doc.name, target_name = %ctx.target.name, "kind not supported, skipping");
        return Ok(TransformOutcome::default());
    };

    let mut outcome = TransformOutcome::default();

    if doc.source.is_file() {
        let content = loaf_fs::read_to_string(&doc.source)?;
        let parsed = parse_document(&content, &doc.source.display().to_string())?;
        let frontmatter = merged_frontmatter(doc, &parsed.frontmatter, ctx)?;
        let rendered = render_document(&frontmatter, &parsed.body)
            .map_err(|e| file_write_failed(dest.display().to_string(), e.to_string()))?;
        loaf_fs::write_file(&dest, rendered)?;
        tracing::debug!(kind = %doc.kind, name = %doc.name, dest = %dest.display(), "wrote document");
        outcome.written = Some(dest.clone());
    } else {
        tracing::debug!(source = %doc.source.display(), "no document body, nothing to transform");
    }

    if doc.kind == DocumentKind::Skill {
        if let Some(dest_dir) = dest.parent() {
            outcome.side_dirs = copy_side_dirs(doc, dest_dir, ctx)?;
        }
    }

    Ok(outcome)
}
