//! Declaration matching: recognize `class` and `def` lines and pull out the
//! declared identifier.
//!
//! Both patterns are anchored at the start of an already-trimmed line and
//! require the whole signature (parameter list or base list, then `:`) on that
//! line. Anything after the `:` is tolerated so inline comments and one-line
//! bodies still match. Multi-line signatures never match.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Declaration;

// `def name(params) -> ret:` with an optional `async` prefix. The greedy `.*`
// inside the parens lets defaults like `x=f()` through.
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+)?def\s+([\p{XID_Start}_]\p{XID_Continue}*)\s*\(.*\)\s*(?:->[^:]*)?:")
        .expect("function pattern is valid")
});

// `class Name:` or `class Name(Base, metaclass=M):`
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+([\p{XID_Start}_]\p{XID_Continue}*)\s*(?:\(.*\))?\s*:")
        .expect("class pattern is valid")
});

/// Identifier of a function declared on this line, if any.
pub fn match_function(stripped: &str) -> Option<&str> {
    FUNCTION_RE.captures(stripped).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Identifier of a class declared on this line, if any.
pub fn match_class(stripped: &str) -> Option<&str> {
    CLASS_RE.captures(stripped).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Try the function pattern, then the class pattern.
pub fn match_declaration(stripped: &str) -> Option<Declaration> {
    if let Some(name) = match_function(stripped) {
        return Some(Declaration::function(name));
    }
    match_class(stripped).map(Declaration::class)
}
