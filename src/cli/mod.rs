//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;

/// Loaf - agent skill distribution builder
///
/// Builds one canonical tree of skills, agents, commands and hooks into the
/// formats each AI coding tool expects.
#[derive(Parser, Debug)]
#[command(
    name = "loaf",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Build agent skills, agents, commands and hooks for every AI coding tool",
    long_about = "Loaf reads a canonical tree of skills, agents, commands and hook definitions \
                  and builds it into each target's native layout (remote-fetchable repositories, \
                  Gemini CLI, ...), applying per-target frontmatter overrides from sidecar files.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  loaf build                   \x1b[90m# Build every enabled target\x1b[0m\n   \
                  loaf build --target gemini   \x1b[90m# Build only the Gemini skills\x1b[0m\n   \
                  loaf targets                 \x1b[90m# List available targets\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project root (defaults to current directory)
    #[arg(long, short = 'r', global = true, env = "LOAF_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to <root>/loaf.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build targets from the canonical tree
    Build(BuildArgs),

    /// List available targets
    Targets,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
