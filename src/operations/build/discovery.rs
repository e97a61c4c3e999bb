//! Canonical document discovery
//!
//! Enumerates the canonical tree:
//! - `skills/<name>/` directories (with or without SKILL.md)
//! - `agents/<name>.md` files
//! - `commands/<name>.md` files
//!
//! Missing kind directories yield no documents. Results are sorted by name
//! so builds are deterministic.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, file_read_failed};
use crate::target::DocumentKind;
use crate::transform::CanonicalDocument;

/// Direct children of `dir`, sorted by file name. Symlinks are followed so
/// a linked skill directory counts as a skill; a dangling link is an error.
fn entries(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).display().to_string();
                file_read_failed(path, e.to_string())
            })
        })
        .collect()
}

fn discover_skills(dir: &Path) -> Result<Vec<CanonicalDocument>> {
    let skills = entries(dir)?
        .into_iter()
        .filter(|e| e.file_type().is_dir())
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            CanonicalDocument::skill(e.path(), name)
        })
        .collect();
    Ok(skills)
}

fn discover_files(kind: DocumentKind, dir: &Path) -> Result<Vec<CanonicalDocument>> {
    let files = entries(dir)?
        .into_iter()
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|e| {
            let name = e.path().file_stem()?.to_string_lossy().into_owned();
            Some(CanonicalDocument::file(kind, e.path(), name))
        })
        .collect();
    Ok(files)
}

/// Canonical documents of one kind under the source directory
pub fn discover_kind(source_dir: &Path, kind: DocumentKind) -> Result<Vec<CanonicalDocument>> {
    let dir = source_dir.join(kind.source_dir_name());
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "no {} directory", kind);
        return Ok(Vec::new());
    }
    match kind {
        DocumentKind::Skill => discover_skills(&dir),
        DocumentKind::Agent | DocumentKind::Command => discover_files(kind, &dir),
    }
}

/// Canonical documents of the given kinds, kind by kind
pub fn discover_documents(
    source_dir: &Path,
    kinds: impl IntoIterator<Item = DocumentKind>,
) -> Result<Vec<CanonicalDocument>> {
    let mut documents = Vec::new();
    for kind in kinds {
        documents.extend(discover_kind(source_dir, kind)?);
    }
    Ok(documents)
}
