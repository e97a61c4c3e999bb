//! Main orchestrator for the build operation
//!
//! Each target runs the same steps:
//! 1. CLEAN: remove the paths the target owns
//! 2. ENUMERATE: discover canonical documents of the supported kinds
//! 3. TRANSFORM: merge frontmatter and write every document (fail-fast)
//! 4. TRANSLATE_HOOKS: write the hook artifact, when the target has a schema
//! 5. DIGEST: hash the regenerated tree
//!
//! Before any target runs, the owned paths of every selected target are
//! checked against the source directory and against each other. A failing
//! target has its owned outputs removed and does not stop the targets
//! after it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::discovery::discover_documents;
use super::layout::{check_layout, check_source_clear};
use crate::cli::BuildArgs;
use crate::common::fs::reset_dir;
use crate::config::{BuildConfig, CONFIG_FILE, project_version};
use crate::error::{LoafError, Result};
use crate::hash::hash_paths;
use crate::hooks::write_hooks;
use crate::progress::ProgressDisplay;
use crate::target::{DocumentKind, TargetProfile};
use crate::transaction::Transaction;
use crate::transform::{TransformContext, transform_document};

/// Options for a build
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Targets named on the command line; empty means every enabled target
    pub targets: Vec<String>,
}

impl From<&BuildArgs> for BuildOptions {
    fn from(args: &BuildArgs) -> Self {
        Self {
            targets: args.targets.clone(),
        }
    }
}

/// Project-wide inputs shared by every target
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Project root; target outputs resolve against it
    pub root: PathBuf,

    /// Canonical source directory
    pub source_dir: PathBuf,

    pub config: BuildConfig,
}

impl BuildContext {
    pub fn new(root: impl Into<PathBuf>, config: BuildConfig) -> Self {
        let root = root.into();
        let source_dir = config.source_dir(&root);
        Self {
            root,
            source_dir,
            config,
        }
    }

    /// Load loaf.yaml (or `config_path`) for the project at `root`
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path.map_or_else(|| root.join(CONFIG_FILE), Path::to_path_buf);
        let config = BuildConfig::load(&config_path)?;
        Ok(Self::new(root, config))
    }
}

/// Summary of one successful target build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: String,
    pub output_root: PathBuf,

    /// Documents written per kind
    pub documents: BTreeMap<DocumentKind, usize>,

    /// Skill side directories copied
    pub side_dirs: usize,

    /// Hook entries written, `None` when the target has no hook schema
    pub hook_entries: Option<usize>,

    /// BLAKE3 digest of the owned outputs
    pub digest: String,
}

impl TargetReport {
    pub fn total_documents(&self) -> usize {
        self.documents.values().sum()
    }
}

/// Result of one target in a multi-target build
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: String,
    pub result: Result<TargetReport>,
}

impl TargetOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Build every target independently, one outcome per target.
/// An unsafe output layout fails the whole build before anything is cleaned.
pub fn build_targets(
    context: &BuildContext,
    targets: &[TargetProfile],
    progress: ProgressDisplay,
) -> Result<Vec<TargetOutcome>> {
    check_layout(targets, &context.root, &context.source_dir)?;
    Ok(BuildOperation::new(context, progress).execute(targets))
}

/// Main orchestrator for the build operation
pub struct BuildOperation<'a> {
    context: &'a BuildContext,
    progress: ProgressDisplay,
}

impl<'a> BuildOperation<'a> {
    pub fn new(context: &'a BuildContext, progress: ProgressDisplay) -> Self {
        Self { context, progress }
    }

    /// Build every target in order, collecting one outcome per target
    pub fn execute(&mut self, targets: &[TargetProfile]) -> Vec<TargetOutcome> {
        let outcomes = targets
            .iter()
            .map(|target| {
                let result = self.build_target(target);
                if let Err(e) = &result {
                    tracing::warn!(target_name = %target.name, "build failed: {}", e);
                }
                TargetOutcome {
                    target: target.name.clone(),
                    result,
                }
            })
            .collect();
        self.progress.finish();
        outcomes
    }

    fn resolve_version(&self, target: &TargetProfile) -> Result<Option<String>> {
        if !target.stamp_version {
            return Ok(None);
        }
        project_version(&self.context.config, &self.context.root)?
            .map(Some)
            .ok_or_else(|| LoafError::VersionUnavailable {
                target: target.name.clone(),
            })
    }

    /// Build a single target
    pub fn build_target(&mut self, target: &TargetProfile) -> Result<TargetReport> {
        let result = self.run_target(target);
        match result {
            Ok(_) => self.progress.finish_target(),
            Err(_) => self.progress.fail_target(),
        }
        result
    }

    fn run_target(&mut self, target: &TargetProfile) -> Result<TargetReport> {
        let root = &self.context.root;
        let output_root = target.output_root(root);
        tracing::info!(target_name = %target.name, output = %output_root.display(), "building target");

        check_source_clear(target, root, &self.context.source_dir)?;
        let transaction = Transaction::new(target.owned_paths(root));
        transaction.clean()?;
        for layout in &target.layouts {
            reset_dir(&output_root.join(&layout.dir))?;
        }

        let version = self.resolve_version(target)?;

        let documents = discover_documents(&self.context.source_dir, target.kinds())?;
        self.progress
            .start_target(&target.name, documents.len() as u64);

        let ctx = TransformContext {
            target,
            output_root: &output_root,
            version: version.as_deref(),
        };

        let mut written: BTreeMap<DocumentKind, usize> = BTreeMap::new();
        let mut side_dirs = 0;
        for doc in &documents {
            let outcome = transform_document(doc, &ctx)?;
            if outcome.written.is_some() {
                *written.entry(doc.kind).or_default() += 1;
            }
            side_dirs += outcome.side_dirs;
            self.progress.document_done(&doc.name);
        }

        let hook_entries = match &target.hooks {
            Some(schema) => {
                let (_, artifact) = write_hooks(&self.context.config.hooks, schema, &output_root)?;
                Some(artifact.entry_count())
            }
            None => {
                if !self.context.config.hooks.is_empty() {
                    tracing::debug!(target_name = %target.name, "target has no hook schema, hooks not translated");
                }
                None
            }
        };

        let digest = hash_paths(&output_root, transaction.owned_paths())?;
        transaction.commit();

        Ok(TargetReport {
            target: target.name.clone(),
            output_root,
            documents: written,
            side_dirs,
            hook_entries,
            digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::registry::{gemini_target, remote_target};
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let src = temp.path().join("src");
        write(
            &src.join("skills/python/SKILL.md"),
            "---\nname: python\ndescription: Python tips\n---\n# Python\n",
        );
        write(&src.join("skills/python/references/style.md"), "PEP 8");
        write(&src.join("agents/pm.md"), "---\ndescription: Plans work\n---\nYou plan.\n");
        write(&src.join("agents/backend-dev.md"), "You build APIs.\n");
        write(&src.join("commands/start.md"), "Start.\n");
        temp
    }

    fn context(root: &Path, yaml: &str) -> BuildContext {
        BuildContext::new(root, BuildConfig::from_yaml(yaml).unwrap())
    }

    #[test]
    fn remote_build_writes_everything() {
        let temp = project();
        let ctx = context(
            temp.path(),
            "hooks:\n  pre-tool:\n    - script: hooks/pre-tool/check.sh\n",
        );
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());
        let report = op.build_target(&remote_target()).unwrap();

        assert_eq!(report.documents[&DocumentKind::Skill], 1);
        assert_eq!(report.documents[&DocumentKind::Agent], 2);
        assert_eq!(report.documents[&DocumentKind::Command], 1);
        assert_eq!(report.total_documents(), 4);
        assert_eq!(report.side_dirs, 1);
        assert_eq!(report.hook_entries, Some(1));
        assert!(temp.path().join("skills/python/references/style.md").is_file());
        assert!(temp.path().join("hooks.json").is_file());
    }

    #[test]
    fn rebuild_is_identical() {
        let temp = project();
        let ctx = context(temp.path(), "version: 2.0.0\n");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());

        let first = op.build_target(&gemini_target()).unwrap();
        let skill = temp.path().join("dist/gemini/skills/python/SKILL.md");
        let bytes = fs::read(&skill).unwrap();

        let second = op.build_target(&gemini_target()).unwrap();
        assert_eq!(first.digest, second.digest);
        assert_eq!(bytes, fs::read(&skill).unwrap());
    }

    #[test]
    fn stale_outputs_are_removed() {
        let temp = project();
        let ctx = context(temp.path(), "");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());
        op.build_target(&remote_target()).unwrap();
        assert!(temp.path().join("agents/backend-dev.md").is_file());

        fs::remove_file(temp.path().join("src/agents/backend-dev.md")).unwrap();
        write(&temp.path().join("skills/leftover/SKILL.md"), "stale");
        op.build_target(&remote_target()).unwrap();

        assert!(!temp.path().join("agents/backend-dev.md").exists());
        assert!(!temp.path().join("skills/leftover").exists());
        assert!(temp.path().join("src/agents/pm.md").is_file());
    }

    #[test]
    fn empty_hooks_artifact_still_written() {
        let temp = project();
        let ctx = context(temp.path(), "");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());
        let report = op.build_target(&remote_target()).unwrap();
        assert_eq!(report.hook_entries, Some(0));
        assert_eq!(
            fs::read_to_string(temp.path().join("hooks.json")).unwrap(),
            "{\n  \"version\": 1,\n  \"hooks\": {}\n}\n"
        );
    }

    #[test]
    fn missing_source_tree_builds_nothing() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let ctx = context(temp.path(), "version: 1.0.0\n");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());
        let report = op.build_target(&gemini_target()).unwrap();
        assert_eq!(report.total_documents(), 0);
        assert_eq!(report.hook_entries, None);
    }

    #[test]
    fn failed_target_leaves_no_partial_output() {
        let temp = project();
        write(
            &temp.path().join("src/skills/python/SKILL.gemini.yaml"),
            "- not\n- a mapping\n",
        );
        let ctx = context(temp.path(), "version: 1.0.0\n");

        let outcomes =
            build_targets(&ctx, &[gemini_target(), remote_target()], ProgressDisplay::hidden()).unwrap();
        assert!(matches!(
            outcomes[0].result,
            Err(LoafError::SidecarNotMapping { .. })
        ));
        assert!(!temp.path().join("dist/gemini/skills").exists());
        assert!(outcomes[1].is_success());
        assert!(temp.path().join("skills/python/SKILL.md").is_file());
    }

    #[test]
    fn stamping_target_without_version_fails() {
        let temp = project();
        let ctx = context(temp.path(), "");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());
        let err = op.build_target(&gemini_target()).unwrap_err();
        assert!(matches!(err, LoafError::VersionUnavailable { .. }));
    }

    #[test]
    fn version_from_package_json() {
        let temp = project();
        write(&temp.path().join("package.json"), "{\"version\": \"3.1.4\"}");
        let ctx = context(temp.path(), "");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());
        op.build_target(&gemini_target()).unwrap();
        let content =
            fs::read_to_string(temp.path().join("dist/gemini/skills/python/SKILL.md")).unwrap();
        assert!(content.contains("version: 3.1.4"));
    }

    #[test]
    fn source_at_root_keeps_canonical_tree() {
        let temp = project();
        let canonical = temp.path().join("src");
        let ctx = context(&canonical, "version: 1.0.0\nsource: .\n");
        let mut op = BuildOperation::new(&ctx, ProgressDisplay::hidden());

        let err = op.build_target(&remote_target()).unwrap_err();
        assert!(matches!(err, LoafError::ConfigInvalid { .. }));
        assert!(canonical.join("skills/python/SKILL.md").is_file());
        assert!(canonical.join("agents").is_dir());
    }

    #[test]
    fn overlapping_targets_build_nothing() {
        let temp = project();
        let ctx = context(temp.path(), "version: 1.0.0\n");
        let mut gemini = gemini_target();
        gemini.output = ".".into();
        fs::create_dir_all(temp.path().join("skills/keep")).unwrap();

        let err = build_targets(&ctx, &[gemini, remote_target()], ProgressDisplay::hidden()).unwrap_err();
        assert!(matches!(err, LoafError::ConfigInvalid { .. }));
        assert!(temp.path().join("skills/keep").is_dir());
        assert!(!temp.path().join("skills/python").exists());
    }
}
