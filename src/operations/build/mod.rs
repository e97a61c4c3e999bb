//! Build operation submodules

pub mod discovery;
pub mod layout;
pub mod orchestrator;

pub use orchestrator::{
    BuildContext, BuildOptions, TargetOutcome, TargetReport, build_targets,
};
