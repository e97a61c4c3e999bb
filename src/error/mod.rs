//! Error types and handling for Loaf
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`document`]: Canonical document and sidecar errors
//! - [`target`]: Target and build errors
//! - [`fs`]: File system errors

pub mod config;
pub mod document;
pub mod fs;
pub mod target;

#[allow(unused_imports)]
pub use config::{
    invalid as config_invalid, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
#[allow(unused_imports)]
pub use document::{
    parse_failed as document_parse_failed, sidecar_not_mapping,
    sidecar_parse_failed,
};
#[allow(unused_imports)]
pub use fs::{io_error, read_failed as file_read_failed, write_failed as file_write_failed};
#[allow(unused_imports)]
pub use target::{hook_event_missing, not_found as target_not_found};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Loaf operations
#[derive(Error, Diagnostic, Debug)]
pub enum LoafError {
    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(loaf::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(loaf::config::parse_failed),
        help("Check the YAML syntax of loaf.yaml")
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(loaf::config::invalid))]
    ConfigInvalid { message: String },

    // Document errors
    #[error("Failed to parse frontmatter in {path}: {reason}")]
    #[diagnostic(
        code(loaf::document::parse_failed),
        help("The block between the leading '---' lines must be a YAML mapping")
    )]
    DocumentParseFailed { path: String, reason: String },

    #[error("Failed to parse sidecar override {path}: {reason}")]
    #[diagnostic(
        code(loaf::sidecar::parse_failed),
        help("Fix the YAML in the sidecar file or remove it")
    )]
    SidecarParseFailed { path: String, reason: String },

    #[error("Sidecar override {path} is not a mapping")]
    #[diagnostic(
        code(loaf::sidecar::not_mapping),
        help("Sidecar files must contain frontmatter keys, e.g. 'description: ...'")
    )]
    SidecarNotMapping { path: String },

    // Target errors
    #[error("Unknown target: {name}")]
    #[diagnostic(
        code(loaf::target::not_found),
        help("Run 'loaf targets' to list the available targets")
    )]
    TargetNotFound { name: String },

    #[error("Target '{target}' stamps a version but none is configured")]
    #[diagnostic(
        code(loaf::target::version_unavailable),
        help("Set 'version' in loaf.yaml or add a package.json with a version field")
    )]
    VersionUnavailable { target: String },

    #[error("Session hook '{script}' has no event name")]
    #[diagnostic(
        code(loaf::hooks::event_missing),
        help("Add 'event: SessionStart' (or another session event) to the hook")
    )]
    HookEventMissing { script: String },

    #[error("Build failed for target(s): {targets}")]
    #[diagnostic(code(loaf::build::failed))]
    BuildFailed { targets: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(loaf::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(loaf::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(loaf::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for LoafError {
    fn from(err: std::io::Error) -> Self {
        LoafError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for LoafError {
    fn from(err: serde_yaml::Error) -> Self {
        LoafError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LoafError {
    fn from(err: serde_json::Error) -> Self {
        LoafError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LoafError>;
