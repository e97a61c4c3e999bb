//! Output layout checks run before anything is cleaned
//!
//! A target owns the paths it regenerates. Those paths must stay clear of
//! the canonical source tree, and no two targets in one build may own the
//! same path or nest inside each other, or a build would delete its own
//! input or silently overwrite another target's output.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, config_invalid};
use crate::target::TargetProfile;

/// Lexically normalized path: `.` components dropped, `..` removes the
/// component before it. A path that normalizes to nothing stays empty so it
/// prefixes every relative path.
fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    components.push(Component::ParentDir);
                }
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}

/// Whether one path equals the other or lies inside it
fn overlaps(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

fn owned(target: &TargetProfile, root: &Path) -> Vec<PathBuf> {
    target
        .owned_paths(root)
        .iter()
        .map(|p| normalize(p))
        .collect()
}

/// Fail when a path the target owns equals, contains or sits inside the
/// source directory.
pub fn check_source_clear(target: &TargetProfile, root: &Path, source_dir: &Path) -> Result<()> {
    let source = normalize(source_dir);
    match owned(target, root).into_iter().find(|p| overlaps(p, &source)) {
        Some(path) => Err(config_invalid(format!(
            "target '{}' owns {} which overlaps the source directory {}",
            target.name,
            path.display(),
            source.display()
        ))),
        None => Ok(()),
    }
}

/// Fail when two of the targets own overlapping paths
pub fn check_disjoint(targets: &[TargetProfile], root: &Path) -> Result<()> {
    let owned: Vec<(&str, Vec<PathBuf>)> = targets
        .iter()
        .map(|t| (t.name.as_str(), owned(t, root)))
        .collect();

    for (i, (name, paths)) in owned.iter().enumerate() {
        for (other, other_paths) in &owned[i + 1..] {
            for path in paths {
                if let Some(clash) = other_paths.iter().find(|p| overlaps(path, p)) {
                    return Err(config_invalid(format!(
                        "targets '{}' and '{}' both write {} and {}",
                        name,
                        other,
                        path.display(),
                        clash.display()
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Every check for one build: each target against the source directory,
/// then the targets against each other.
pub fn check_layout(targets: &[TargetProfile], root: &Path, source_dir: &Path) -> Result<()> {
    for target in targets {
        check_source_clear(target, root, source_dir)?;
    }
    check_disjoint(targets, root)
}
