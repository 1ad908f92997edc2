//! iFixDocs core: structural documentation extraction for Python sources.
//!
//! A best-effort lexical scanner, not a parser: it finds `class` and `def`
//! lines, ties nearby comments to them, splits the names into classes and
//! functions, and renders the result as Markdown.
//!
//! # Modules
//!
//! - [`scanner`]: Single-pass line scanner and the [`extract`] entry point
//! - [`matcher`]: Class/function declaration patterns
//! - [`comments`]: Comment marker handling
//! - [`classify`]: Class/function split from a class-only re-scan
//! - [`render`]: Markdown page for one file
//! - [`types`]: Declarations, comment bundles, extraction results

pub mod classify;
pub mod comments;
pub mod matcher;
pub mod render;
pub mod scanner;
pub mod types;

pub use render::render_markdown;
pub use scanner::{extract, scan_lines};
pub use types::{ExtractionResult, NO_COMMENTS};
