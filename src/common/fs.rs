//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use crate::error::fs::{read_error, write_error};
use crate::error::Result;

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, &e))?;
    }
    Ok(())
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|e| write_error(path, &e))
}

/// Read a UTF-8 file
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| read_error(path, &e))
}

/// Remove a file or directory tree if it exists
pub fn remove_path(path: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| write_error(path, &e))
    } else {
        fs::remove_file(path).map_err(|e| write_error(path, &e))
    }
}

/// Remove a directory (if present) and create it again empty
pub fn reset_dir(path: &Path) -> Result<()> {
    remove_path(path)?;
    fs::create_dir_all(path).map_err(|e| write_error(path, &e))
}

/// Copy a directory recursively
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    let mut entries = fs::read_dir(src_ref)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}
