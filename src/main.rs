//! Loaf - agent skill distribution builder
//!
//! Builds a canonical tree of skills, agents, commands and hook definitions
//! into the native layout of each supported AI coding tool.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod frontmatter;
mod hash;
mod hooks;
mod operations;
mod progress;
mod sidecar;
mod target;
#[cfg(test)]
mod temp;
mod transaction;
mod transform;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("loaf=debug")
        } else {
            EnvFilter::new("loaf=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(cli.root, cli.config, args, cli.verbose),
        Commands::Targets => commands::targets::run(cli.root, cli.config),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
