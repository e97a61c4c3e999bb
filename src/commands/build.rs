//! Build command implementation
//!
//! Builds the selected targets and prints one summary block per target.
//! Fails when any target failed, after every target has been attempted.

use std::path::{Path, PathBuf};

use console::Style;

use super::project_root;
use crate::cli::BuildArgs;
use crate::error::{LoafError, Result};
use crate::operations::build::{BuildContext, BuildOptions, TargetOutcome, TargetReport, build_targets};
use crate::progress::ProgressDisplay;
use crate::target::loader::{load_registry, select_targets};

/// Run build command. Verbose runs skip the progress bars so they do not
/// interleave with debug logging.
pub fn run(root: Option<PathBuf>, config: Option<PathBuf>, args: BuildArgs, verbose: bool) -> Result<()> {
    let root = project_root(root)?;
    let context = BuildContext::load(&root, config.as_deref())?;
    let options = BuildOptions::from(&args);

    let registry = load_registry(&context.config)?;
    let targets = select_targets(&registry, &options.targets)?;
    if targets.is_empty() {
        println!("No targets enabled.");
        return Ok(());
    }

    let progress = if verbose {
        ProgressDisplay::hidden()
    } else {
        ProgressDisplay::new(targets.len() as u64)
    };
    let outcomes = build_targets(&context, &targets, progress)?;

    for outcome in &outcomes {
        display_outcome(&root, outcome);
    }

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.is_success())
        .map(|o| o.target.as_str())
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(LoafError::BuildFailed {
            targets: failed.join(", "),
        })
    }
}

fn display_outcome(root: &Path, outcome: &TargetOutcome) {
    match &outcome.result {
        Ok(report) => display_report(root, report),
        Err(e) => {
            println!(
                "{} {}",
                Style::new().bold().red().apply_to("✗"),
                Style::new().bold().apply_to(&outcome.target)
            );
            println!("    {}", e);
        }
    }
}

fn display_report(root: &Path, report: &TargetReport) {
    let output = report
        .output_root
        .strip_prefix(root)
        .unwrap_or(&report.output_root);
    let output = if output.as_os_str().is_empty() {
        ".".to_string()
    } else {
        output.display().to_string()
    };

    println!(
        "{} {} {}",
        Style::new().bold().green().apply_to("✓"),
        Style::new().bold().apply_to(&report.target),
        Style::new().dim().apply_to(format!("→ {}", output))
    );

    let counts: Vec<String> = report
        .documents
        .iter()
        .map(|(kind, count)| format!("{} {}{}", count, kind, if *count == 1 { "" } else { "s" }))
        .collect();
    if report.total_documents() == 0 {
        println!("    no documents");
    } else {
        println!("    {}", counts.join(", "));
    }
    if let Some(entries) = report.hook_entries {
        println!("    {} hook entr{}", entries, if entries == 1 { "y" } else { "ies" });
    }
    println!("    {}", Style::new().dim().apply_to(&report.digest));
}
