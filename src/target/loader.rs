//! Target configuration loading
//!
//! Applies the `targets:` overrides from loaf.yaml to the built-in
//! definitions and selects the targets a build should run.

use super::TargetProfile;
use super::registry::TargetRegistry;
use crate::config::BuildConfig;
use crate::error::{Result, config_invalid, target_not_found};

/// Built-in registry with loaf.yaml overrides applied
pub fn load_registry(config: &BuildConfig) -> Result<TargetRegistry> {
    let mut registry = TargetRegistry::builtin();

    for (name, over) in &config.targets {
        let known = registry.names().join(", ");
        let target = registry.get_mut(name).ok_or_else(|| {
            config_invalid(format!(
                "override for unknown target '{name}' (known targets: {known})"
            ))
        })?;

        if let Some(output) = &over.output {
            target.output.clone_from(output);
        }
        if let Some(enabled) = over.enabled {
            target.enabled = enabled;
        }
    }

    Ok(registry)
}

/// Targets to build. With no explicit names every enabled target is
/// selected; named targets are built even when disabled in loaf.yaml.
pub fn select_targets(registry: &TargetRegistry, names: &[String]) -> Result<Vec<TargetProfile>> {
    if names.is_empty() {
        return Ok(registry
            .all()
            .iter()
            .filter(|t| t.enabled)
            .cloned()
            .collect());
    }

    let mut selected: Vec<TargetProfile> = Vec::with_capacity(names.len());
    for name in names {
        let target = registry.get(name).ok_or_else(|| target_not_found(name))?;
        if !selected.iter().any(|t| t.name == target.name) {
            selected.push(target.clone());
        }
    }
    Ok(selected)
}
