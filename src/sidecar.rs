//! Target-specific sidecar overrides
//!
//! A sidecar lives next to its canonical document and is named
//! `<base>.<target>.yaml`, e.g. `skills/python/SKILL.gemini.yaml` or
//! `agents/pm.remote.yaml`. Its keys win over the canonical frontmatter for
//! that one target.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{Result, sidecar_not_mapping, sidecar_parse_failed};
use crate::frontmatter::Frontmatter;

/// Extension of sidecar files
pub const SIDECAR_EXTENSION: &str = "yaml";

/// Path of the sidecar for a document base name in `dir` and a target
pub fn sidecar_path(dir: &Path, base: &str, target: &str) -> PathBuf {
    dir.join(format!("{base}.{target}.{SIDECAR_EXTENSION}"))
}

/// Load the sidecar override. A missing file is an empty mapping; a file
/// that does not parse as a YAML mapping is an error naming the file.
pub fn load_sidecar(dir: &Path, base: &str, target: &str) -> Result<Frontmatter> {
    let path = sidecar_path(dir, base, target);
    if !path.is_file() {
        return Ok(Frontmatter::new());
    }

    let content = crate::common::fs::read_to_string(&path)?;
    let origin = path.display().to_string();
    match serde_yaml::from_str::<Value>(&content)
        .map_err(|e| sidecar_parse_failed(origin.clone(), e.to_string()))?
    {
        Value::Mapping(mapping) => {
            tracing::debug!(path = %origin, keys = mapping.len(), "loaded sidecar override");
            Ok(mapping)
        }
        Value::Null => Ok(Frontmatter::new()),
        _ => Err(sidecar_not_mapping(origin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoafError;
    use crate::frontmatter::get_str;
    use tempfile::TempDir;

    fn temp() -> TempDir {
        TempDir::new_in(crate::temp::temp_dir_base()).unwrap()
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("src/agents"), "pm", "remote"),
            PathBuf::from("src/agents/pm.remote.yaml")
        );
        assert_eq!(
            sidecar_path(Path::new("src/skills/python"), "SKILL", "gemini"),
            PathBuf::from("src/skills/python/SKILL.gemini.yaml")
        );
    }

    #[test]
    fn missing_sidecar_is_empty() {
        let dir = temp();
        let loaded = load_sidecar(dir.path(), "pm", "remote").unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn sidecar_for_other_target_is_ignored() {
        let dir = temp();
        std::fs::write(dir.path().join("pm.gemini.yaml"), "model: fast\n").unwrap();
        assert!(load_sidecar(dir.path(), "pm", "remote").unwrap().is_empty());
    }

    #[test]
    fn loads_mapping() {
        let dir = temp();
        std::fs::write(
            dir.path().join("pm.remote.yaml"),
            "model: sonnet\nis_background: true\n",
        )
        .unwrap();
        let loaded = load_sidecar(dir.path(), "pm", "remote").unwrap();
        assert_eq!(get_str(&loaded, "model").as_deref(), Some("sonnet"));
        assert_eq!(get_str(&loaded, "is_background").as_deref(), Some("true"));
    }

    #[test]
    fn empty_file_is_empty_mapping() {
        let dir = temp();
        std::fs::write(dir.path().join("SKILL.gemini.yaml"), "").unwrap();
        assert!(load_sidecar(dir.path(), "SKILL", "gemini").unwrap().is_empty());
    }

    #[test]
    fn malformed_sidecar_names_the_file() {
        let dir = temp();
        std::fs::write(dir.path().join("pm.remote.yaml"), "model: [unclosed\n").unwrap();
        let err = load_sidecar(dir.path(), "pm", "remote").unwrap_err();
        assert!(matches!(err, LoafError::SidecarParseFailed { .. }));
        assert!(err.to_string().contains("pm.remote.yaml"));
    }

    #[test]
    fn non_mapping_sidecar_is_error() {
        let dir = temp();
        std::fs::write(dir.path().join("pm.remote.yaml"), "- a\n- b\n").unwrap();
        let err = load_sidecar(dir.path(), "pm", "remote").unwrap_err();
        assert!(matches!(err, LoafError::SidecarNotMapping { .. }));
    }
}
