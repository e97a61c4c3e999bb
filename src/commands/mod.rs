//! Command implementations for Loaf CLI

pub mod build;
pub mod completions;
pub mod targets;
pub mod version;

use std::path::PathBuf;

use crate::error::{Result, io_error};

/// Project root from CLI argument or current directory
pub(crate) fn project_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path),
        None => std::env::current_dir()
            .map_err(|e| io_error(format!("Failed to get current directory: {}", e))),
    }
}
