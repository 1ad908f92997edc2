//! Comment splitting. A `#` anywhere on a line splits it into a code prefix and
//! a comment suffix; only the trimmed suffix is kept, and an empty suffix is
//! dropped. Triple-quoted markers count only at the very start of a stripped
//! line, and there is no multi-line block tracking.

/// Single-line comment marker.
pub const COMMENT_MARKER: char = '#';

/// Markers that start a comment-only line.
const LINE_MARKERS: &[&str] = &["#", "\"\"\"", "'''"];

/// Does this (trimmed) line start with a comment marker?
pub fn is_comment_line(stripped: &str) -> bool {
    LINE_MARKERS.iter().any(|m| stripped.starts_with(m))
}

/// Text of a comment-only line with its marker removed.
///
/// For triple-quoted lines a closing marker on the same line is removed too, so
/// `"""Load the config."""` yields `Load the config.`.
pub fn comment_text(stripped: &str) -> Option<&str> {
    let text = if let Some(rest) = stripped.strip_prefix('#') {
        rest
    } else {
        let marker = ["\"\"\"", "'''"].into_iter().find(|m| stripped.starts_with(m))?;
        let rest = &stripped[marker.len()..];
        rest.strip_suffix(marker).unwrap_or(rest)
    };
    non_empty(text.trim())
}

/// Inline comment: the trimmed text after the first `#` in a raw line.
pub fn inline_comment(line: &str) -> Option<&str> {
    let (_, suffix) = line.split_once(COMMENT_MARKER)?;
    non_empty(suffix.trim())
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_comment_line() {
        assert!(is_comment_line("# hello"));
        assert!(is_comment_line("\"\"\"Docstring"));
        assert!(is_comment_line("'''Docstring'''"));
        assert!(!is_comment_line("x = 1  # trailing"));
        assert!(!is_comment_line("\"plain string\""));
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("# helper function"), Some("helper function"));
        assert_eq!(comment_text("#no space"), Some("no space"));
        assert_eq!(comment_text("\"\"\"Load the config.\"\"\""), Some("Load the config."));
        assert_eq!(comment_text("'''Opening only"), Some("Opening only"));
        assert_eq!(comment_text("x = 1"), None);
    }

    #[test]
    fn test_empty_comment_is_discarded() {
        assert_eq!(comment_text("#"), None);
        assert_eq!(comment_text("#    "), None);
        assert_eq!(comment_text("\"\"\""), None);
        assert_eq!(comment_text("\"\"\"\"\"\""), None);
    }

    #[test]
    fn test_inline_comment() {
        assert_eq!(inline_comment("def run():  # entry point"), Some("entry point"));
        assert_eq!(inline_comment("    x = 1 # counter # extra"), Some("counter # extra"));
        assert_eq!(inline_comment("x = 1  #  "), None);
        assert_eq!(inline_comment("x = 1"), None);
    }
}
