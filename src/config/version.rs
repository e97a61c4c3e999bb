//! Project version lookup for provenance stamping

use std::path::Path;

use serde::Deserialize;

use super::BuildConfig;
use crate::error::{Result, config_parse_failed};

#[derive(Deserialize)]
struct PackageJson {
    version: Option<String>,
}

/// Version from loaf.yaml, falling back to `package.json` at the project root.
/// Returns `Ok(None)` when neither declares one.
pub fn project_version(config: &BuildConfig, root: &Path) -> Result<Option<String>> {
    if let Some(version) = config.version.as_ref().filter(|v| !v.is_empty()) {
        return Ok(Some(version.clone()));
    }

    let package_json = root.join("package.json");
    if !package_json.is_file() {
        return Ok(None);
    }

    let content = crate::common::fs::read_to_string(&package_json)?;
    let package: PackageJson = serde_json::from_str(&content)
        .map_err(|e| config_parse_failed(package_json.display().to_string(), e.to_string()))?;
    Ok(package.version.filter(|v| !v.is_empty()))
}
