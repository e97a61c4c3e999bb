//! File system errors

use std::path::Path;

use super::LoafError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> LoafError {
    LoafError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> LoafError {
    LoafError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> LoafError {
    LoafError::IoError {
        message: message.into(),
    }
}

pub(crate) fn read_error(path: &Path, e: &std::io::Error) -> LoafError {
    read_failed(path.display().to_string(), e.to_string())
}

pub(crate) fn write_error(path: &Path, e: &std::io::Error) -> LoafError {
    write_failed(path.display().to_string(), e.to_string())
}
