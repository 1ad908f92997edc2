//! Markdown rendering of one file's extraction result.

use std::fmt::Write;

use crate::types::ExtractionResult;

/// Printed when `git log` has nothing for the file.
pub const NO_HISTORY: &str = "No commit history found.";

/// Render the per-file documentation page.
///
/// Section order is fixed: classes, functions, comments per name (discovery
/// order), then the commit history block as given.
pub fn render_markdown(file_name: &str, result: &ExtractionResult, history: &str) -> String {
    let mut out = String::with_capacity(256);
    let _ = writeln!(out, "# Documentation for {file_name}\n");

    out.push_str("## Classes\n");
    push_bullets(&mut out, &result.classes);

    out.push_str("\n## Functions\n");
    push_bullets(&mut out, &result.functions);

    out.push_str("\n## Comments\n");
    if result.is_empty() {
        out.push_str("- None\n");
    }
    for (name, bundle) in result.comments() {
        let _ = writeln!(out, "### {name}");
        push_bullets(&mut out, bundle);
    }

    out.push_str("\n## Commit History\n");
    let history = history.trim_end();
    if history.trim().is_empty() {
        out.push_str(NO_HISTORY);
    } else {
        out.push_str(history);
    }
    out.push('\n');
    out
}

fn push_bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("- None\n");
        return;
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}
