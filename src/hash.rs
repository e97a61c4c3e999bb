//! BLAKE3 digests of generated output

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, file_read_failed};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

fn update_from_file(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| file_read_failed(path.display().to_string(), e.to_string()))?;

    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| file_read_failed(path.display().to_string(), e.to_string()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(())
}

/// Digest of a set of owned paths (files or directory trees) under `root`.
///
/// Files are visited sorted by path relative to `root`, and each relative
/// path is hashed along with its contents, so the digest only changes when
/// the generated tree does. Missing paths contribute nothing.
pub fn hash_paths(root: &Path, paths: &[impl AsRef<Path>]) -> Result<String> {
    let mut files: Vec<_> = paths
        .iter()
        .flat_map(|p| WalkDir::new(p.as_ref()).into_iter().filter_map(|e| e.ok()))
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files.dedup();

    let mut hasher = Hasher::new();
    for file_path in files {
        let relative_path = file_path
            .strip_prefix(root)
            .unwrap_or(&file_path)
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        update_from_file(&mut hasher, &file_path)?;

        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_paths_deterministic() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        std::fs::create_dir_all(temp.path().join("skills/a")).unwrap();
        std::fs::write(temp.path().join("skills/a/SKILL.md"), "aaa").unwrap();
        std::fs::write(temp.path().join("hooks.json"), "{}").unwrap();

        let paths = [temp.path().join("skills"), temp.path().join("hooks.json")];
        let hash1 = hash_paths(temp.path(), &paths).unwrap();
        let hash2 = hash_paths(temp.path(), &paths).unwrap();
        assert!(hash1.starts_with(HASH_PREFIX));
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_paths_ignores_unowned_files() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        std::fs::create_dir_all(temp.path().join("skills")).unwrap();
        std::fs::write(temp.path().join("skills/x.md"), "x").unwrap();

        let paths = [temp.path().join("skills")];
        let before = hash_paths(temp.path(), &paths).unwrap();
        std::fs::write(temp.path().join("README.md"), "readme").unwrap();
        assert_eq!(before, hash_paths(temp.path(), &paths).unwrap());

        std::fs::write(temp.path().join("skills/x.md"), "changed").unwrap();
        assert_ne!(before, hash_paths(temp.path(), &paths).unwrap());
    }

    #[test]
    fn test_hash_paths_missing_is_empty_digest() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let empty: [&Path; 0] = [];
        assert_eq!(
            hash_paths(temp.path(), &[temp.path().join("nothing")]).unwrap(),
            hash_paths(temp.path(), &empty).unwrap()
        );
    }
}
