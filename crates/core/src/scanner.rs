//! Line scanner: one forward pass over a file that ties comments to the
//! declarations they describe.
//!
//! Comments above a declaration are buffered and handed to it when it is
//! matched. Comment-only lines directly under a declaration (no blank or code
//! line in between) belong to that declaration, as do inline `#` comments on
//! its code lines until the next declaration or a detached comment-only line.

use tracing::debug;

use crate::classify::classify;
use crate::comments::{comment_text, inline_comment, is_comment_line};
use crate::matcher::match_declaration;
use crate::types::ExtractionResult;

/// Per-scan working state. Created fresh for every file.
#[derive(Default)]
struct ScanState {
    pending: Vec<String>,
    current: Option<String>,
    // Every line since the last declaration has been a comment-only line.
    attached: bool,
    // Inline comments on code lines still go to `current`.
    trailing: bool,
}

/// Scan lines and collect comment bundles per declared name.
///
/// Only `comments` is populated; run [`classify`] (or use [`extract`]) to fill
/// the class/function split.
pub fn scan_lines(lines: &[&str]) -> ExtractionResult {
    let mut result = ExtractionResult::new();
    let mut state = ScanState::default();

    for line in lines {
        let stripped = line.trim();

        if stripped.is_empty() {
            state.attached = false;
            continue;
        }

        let declaration = match_declaration(stripped);

        if declaration.is_none() && is_comment_line(stripped) {
            let text = comment_text(stripped);
            match (&state.current, state.attached) {
                (Some(name), true) => {
                    if let Some(text) = text {
                        result.append(name, text);
                    }
                }
                _ => {
                    state.trailing = false;
                    state.pending.extend(text.map(str::to_string));
                }
            }
            continue;
        }

        match declaration {
            Some(decl) => {
                let mut bundle = std::mem::take(&mut state.pending);
                if let Some(inline) = inline_comment(line) {
                    bundle.push(inline.to_string());
                }
                result.insert(&decl.name, bundle);
                state.current = Some(decl.name);
                state.attached = true;
                state.trailing = true;
            }
            None => {
                state.attached = false;
                if !state.trailing {
                    continue;
                }
                if let (Some(name), Some(inline)) = (&state.current, inline_comment(line)) {
                    result.append(name, inline);
                }
            }
        }
    }

    result
}

/// Full extraction for one file: scan, then classify.
pub fn extract(text: &str) -> ExtractionResult {
    let lines: Vec<&str> = text.lines().collect();
    let mut result = scan_lines(&lines);
    classify(text, &mut result);
    debug!(
        lines = lines.len(),
        classes = result.classes.len(),
        functions = result.functions.len(),
        "Extracted declarations"
    );
    result
}
