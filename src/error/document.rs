//! Canonical document and sidecar errors

use super::LoafError;

/// Creates a frontmatter parse error for a canonical document
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> LoafError {
    LoafError::DocumentParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a sidecar parse error
pub fn sidecar_parse_failed(path: impl Into<String>, reason: impl Into<String>) -> LoafError {
    LoafError::SidecarParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn sidecar_not_mapping(path: impl Into<String>) -> LoafError {
    LoafError::SidecarNotMapping { path: path.into() }
}
