//! Version command implementation

use crate::error::Result;
use crate::target::registry::TargetRegistry;

/// Run version command
pub fn run() -> Result<()> {
    println!("loaf {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Minimum Rust: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!("  Targets: {}", TargetRegistry::builtin().names().join(", "));

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
