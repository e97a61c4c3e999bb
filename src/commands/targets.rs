//! Targets command implementation
//!
//! Lists the targets with their supported kinds, output root and hook
//! support, after loaf.yaml overrides are applied.

use std::path::PathBuf;

use console::Style;

use super::project_root;
use crate::config::{BuildConfig, CONFIG_FILE};
use crate::error::Result;
use crate::target::TargetProfile;
use crate::target::loader::load_registry;

/// Run targets command
pub fn run(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let root = project_root(root)?;
    let config_path = config.unwrap_or_else(|| root.join(CONFIG_FILE));
    let config = BuildConfig::load(&config_path)?;
    let registry = load_registry(&config)?;

    println!("Available targets ({}):", registry.all().len());
    println!();
    for target in registry.all() {
        display_target(target);
        println!();
    }
    Ok(())
}

fn display_target(target: &TargetProfile) {
    let name = Style::new().bold().yellow().apply_to(&target.name);
    if target.enabled {
        println!("  {}", name);
    } else {
        println!("  {} {}", name, Style::new().dim().apply_to("(disabled)"));
    }
    println!("    {}", target.description);

    let label = Style::new().bold();
    let kinds: Vec<String> = target
        .layouts
        .iter()
        .map(|layout| format!("{} → {}/", layout.kind, layout.dir))
        .collect();
    println!("    {} {}", label.apply_to("Kinds:"), kinds.join(", "));
    println!("    {} {}", label.apply_to("Output:"), target.output.display());
    if !target.skill_side_dirs.is_empty() {
        println!(
            "    {} {}",
            label.apply_to("Skill files:"),
            target.skill_side_dirs.join(", ")
        );
    }
    match &target.hooks {
        Some(schema) => println!("    {} {}", label.apply_to("Hooks:"), schema.artifact),
        None => println!("    {} none", label.apply_to("Hooks:")),
    }
    if target.stamp_version {
        println!("    {} stamped", label.apply_to("Version:"));
    }
}
