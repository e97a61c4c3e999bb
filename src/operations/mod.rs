//! Operations module
//!
//! This module provides high-level operations that coordinate:
//! - build: Complete build workflow for one or more targets
//!
//! The operations coordinate with:
//! - Target: Target profiles and selection (from target module)
//! - Transform: Per-document frontmatter merging (from transform module)
//! - Hooks: Hook artifact translation (from hooks module)
//! - Transaction: Cleanup of owned outputs on error
//! - Progress: Progress reporting (from progress module)

pub mod build;
