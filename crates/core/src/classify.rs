//! Class/function split. Runs after the line scan as its own pass over the raw
//! text, matching class declarations only, and is the single source of truth
//! for which bucket a name lands in.

use std::collections::HashSet;

use crate::matcher::match_class;
use crate::types::ExtractionResult;

/// Names declared as classes anywhere in the text.
pub fn class_names(text: &str) -> HashSet<&str> {
    text.lines().filter_map(|line| match_class(line.trim())).collect()
}

/// Fill `classes` and `functions` from the keys of `result.comments`.
///
/// A key is a class iff the class-only re-scan found it; every other key is a
/// function. Both lists follow discovery order and are rebuilt from scratch.
pub fn classify(text: &str, result: &mut ExtractionResult) {
    let declared_classes = class_names(text);
    let (classes, functions): (Vec<String>, Vec<String>) = result
        .names()
        .map(str::to_string)
        .partition(|name| declared_classes.contains(name.as_str()));
    result.classes = classes;
    result.functions = functions;
}
