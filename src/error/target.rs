//! Target and build errors

use super::LoafError;

/// Creates an unknown target error
pub fn not_found(name: impl Into<String>) -> LoafError {
    LoafError::TargetNotFound { name: name.into() }
}

/// Creates a missing session event error
pub fn hook_event_missing(script: impl Into<String>) -> LoafError {
    LoafError::HookEventMissing {
        script: script.into(),
    }
}
