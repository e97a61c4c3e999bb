//! Common test utilities for Loaf integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project with a canonical `src/` tree
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Project with one skill, two agents, one command and a version
    pub fn with_sample_tree() -> Self {
        let project = Self::new();
        project.write_file("loaf.yaml", "version: 1.2.0\n");
        project.write_file(
            "src/skills/python/SKILL.md",
            "---\nname: python\ndescription: Python conventions\n---\n# Python\n\nUse type hints.\n",
        );
        project.write_file("src/skills/python/references/style.md", "# Style\n");
        project.write_file("src/skills/python/scripts/lint.sh", "ruff check .\n");
        project.write_file("src/skills/python/assets/logo.txt", "snake\n");
        project.write_file(
            "src/agents/pm.md",
            "---\ndescription: Coordinates the team\n---\nYou plan work.\n",
        );
        project.write_file("src/agents/backend-dev.md", "You build APIs.\n");
        project.write_file("src/commands/start.md", "Start a session.\n");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// `loaf` command rooted at this project
    pub fn loaf(&self) -> Command {
        let mut cmd = loaf_cmd();
        cmd.arg("--root").arg(&self.path).env_remove("LOAF_ROOT");
        cmd
    }

    /// Frontmatter block of a generated document
    pub fn frontmatter(&self, path: &str) -> String {
        let content = self.read_file(path);
        let rest = content
            .strip_prefix("---\n")
            .expect("document should start with a frontmatter block");
        let end = rest.find("---\n").expect("unterminated frontmatter");
        rest[..end].to_string()
    }

    /// All files under a directory, relative and sorted
    pub fn list_files(&self, dir: &str) -> Vec<String> {
        let root = self.path.join(dir);
        let mut files: Vec<String> = walk(&root)
            .into_iter()
            .map(|p| {
                p.strip_prefix(&root)
                    .expect("walked path under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated, dead_code)]
pub fn loaf_cmd() -> Command {
    Command::cargo_bin("loaf").expect("loaf binary should be built")
}

fn walk(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            files.extend(walk(&path));
        } else {
            files.push(path);
        }
    }
    files
}
