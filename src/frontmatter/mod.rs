//! Frontmatter documents and layered merging
//!
//! Canonical documents are markdown files with an optional YAML header
//! between `---` delimiters. The header is merged from several layers
//! (target defaults, canonical frontmatter, derived identity, sidecar,
//! version stamp) before the document is written for a target.

mod document;
mod merge;

pub use document::{get_str, parse_document, render_document};
pub use merge::{layer, merge_layers};

/// Frontmatter mapping (insertion ordered)
pub type Frontmatter = serde_yaml::Mapping;
