//! Build configuration (loaf.yaml)
//!
//! All keys are optional; a project without a loaf.yaml builds every
//! enabled built-in target from `src/` with no hooks.
//!
//! ```yaml
//! version: 1.9.0
//! source: src
//! hooks:
//!   pre-tool:
//!     - script: hooks/pre-tool/check.sh
//! targets:
//!   gemini:
//!     output: dist/gemini
//!   remote:
//!     enabled: false
//! ```

pub mod hooks;
mod version;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_parse_failed, config_read_failed};

pub use hooks::{HookCategory, HookConfig, HookDefinition};
pub use version::project_version;

/// Default configuration file name at the project root
pub const CONFIG_FILE: &str = "loaf.yaml";

/// Default canonical source directory
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Contents of loaf.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Version stamped into documents of provenance-tracking targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Canonical source directory, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Canonical hook configuration
    pub hooks: HookConfig,

    /// Per-target overrides keyed by target name
    pub targets: BTreeMap<String, TargetOverride>,
}

/// Override of a built-in target's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetOverride {
    /// Output root, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Set to false to leave the target out of `loaf build`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl BuildConfig {
    /// Parse configuration from a YAML string. Blank input yields the defaults.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Canonical source directory resolved against the project root
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(
            self.source
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_SOURCE_DIR)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoafError;
    use tempfile::TempDir;

    #[test]
    fn empty_config_is_default() {
        let config = BuildConfig::from_yaml("").unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
version: 1.9.0
source: canonical
hooks:
  pre-tool:
    - script: hooks/pre-tool/check.sh
      timeout: 45000
targets:
  gemini:
    output: out/gemini
  remote:
    enabled: false
"#;
        let config = BuildConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version.as_deref(), Some("1.9.0"));
        assert_eq!(config.hooks.pre_tool.len(), 1);
        assert_eq!(
            config.targets["gemini"].output.as_deref(),
            Some(Path::new("out/gemini"))
        );
        assert_eq!(config.targets["remote"].enabled, Some(false));
        assert_eq!(
            config.source_dir(Path::new("/proj")),
            PathBuf::from("/proj/canonical")
        );
    }

    #[test]
    fn default_source_dir() {
        assert_eq!(
            BuildConfig::default().source_dir(Path::new("/proj")),
            PathBuf::from("/proj/src")
        );
    }

    #[test]
    fn load_missing_file_is_default() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let config = BuildConfig::load(&temp.path().join(CONFIG_FILE)).unwrap();
        assert!(config.hooks.is_empty());
    }

    #[test]
    fn load_blank_file_is_default() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "  \n\n").unwrap();
        assert_eq!(BuildConfig::load(&path).unwrap(), BuildConfig::default());
    }

    #[test]
    fn load_malformed_file_names_path() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "hooks: [unclosed\n").unwrap();

        let err = BuildConfig::load(&path).unwrap_err();
        match err {
            LoafError::ConfigParseFailed { path: p, .. } => assert!(p.ends_with(CONFIG_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
