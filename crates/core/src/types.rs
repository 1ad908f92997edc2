//! Extraction result types: declarations, comment bundles, and the per-file
//! [`ExtractionResult`] handed to the renderer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Placeholder stored for a declaration that has no comments at all.
pub const NO_COMMENTS: &str = "No comments found";

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Function,
}

/// A class or function definition line recognized by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn class(name: &str) -> Self {
        Self { name: name.to_string(), kind: DeclarationKind::Class }
    }

    pub fn function(name: &str) -> Self {
        Self { name: name.to_string(), kind: DeclarationKind::Function }
    }
}

/// Ordered comments attached to one declaration name. Never empty once stored
/// in an [`ExtractionResult`]: an empty bundle becomes `[NO_COMMENTS]`.
pub type CommentBundle = Vec<String>;

/// Returns true when the bundle only carries the "no comments" placeholder.
pub fn is_placeholder(bundle: &[String]) -> bool {
    bundle.len() == 1 && bundle[0] == NO_COMMENTS
}

// ---------------------------------------------------------------------------
// Extraction result
// ---------------------------------------------------------------------------

/// Everything the scanner learned about one file.
///
/// `comments` keeps discovery order. `classes` and `functions` are filled by
/// [`crate::classify::classify`] and always partition the keys of `comments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    #[serde(rename = "comments_by_name", serialize_with = "serialize_ordered_map")]
    comments: Vec<(String, CommentBundle)>,
    // name -> position in `comments`
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(rename = "class_names")]
    pub classes: Vec<String>,
    #[serde(rename = "function_names")]
    pub functions: Vec<String>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Number of distinct declared names.
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// `(name, bundle)` pairs in discovery order.
    pub fn comments(&self) -> &[(String, CommentBundle)] {
        &self.comments
    }

    /// Declared names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.comments.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&CommentBundle> {
        self.index.get(name).map(|&i| &self.comments[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CommentBundle> {
        let i = *self.index.get(name)?;
        Some(&mut self.comments[i].1)
    }

    /// Store a bundle under `name`. A repeated name replaces the earlier bundle
    /// but keeps its original position.
    pub fn insert(&mut self, name: &str, bundle: CommentBundle) {
        let bundle = if bundle.is_empty() { vec![NO_COMMENTS.to_string()] } else { bundle };
        match self.get_mut(name) {
            Some(existing) => *existing = bundle,
            None => {
                self.index.insert(name.to_string(), self.comments.len());
                self.comments.push((name.to_string(), bundle));
            }
        }
    }

    /// Append a comment to an existing bundle, replacing the placeholder if
    /// that is all the bundle holds.
    pub fn append(&mut self, name: &str, comment: &str) {
        if let Some(bundle) = self.get_mut(name) {
            if is_placeholder(bundle) {
                bundle.clear();
            }
            bundle.push(comment.to_string());
        }
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f == name)
    }
}

/// Serialize the ordered pairs as a JSON object, keeping discovery order.
fn serialize_ordered_map<S: Serializer>(
    pairs: &[(String, CommentBundle)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (name, bundle) in pairs {
        map.serialize_entry(name, bundle)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_empty_bundle_gets_placeholder() {
        let mut result = ExtractionResult::new();
        result.insert("run", Vec::new());
        assert_eq!(result.get("run"), Some(&vec![NO_COMMENTS.to_string()]));
    }

    #[test]
    fn test_insert_duplicate_keeps_position() {
        let mut result = ExtractionResult::new();
        result.insert("a", vec!["first".to_string()]);
        result.insert("b", Vec::new());
        result.insert("a", vec!["second".to_string()]);
        let names: Vec<&str> = result.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(result.get("a"), Some(&vec!["second".to_string()]));
    }

    #[test]
    fn test_append_replaces_placeholder() {
        let mut result = ExtractionResult::new();
        result.insert("run", Vec::new());
        result.append("run", "entry point");
        result.append("run", "second");
        assert_eq!(
            result.get("run"),
            Some(&vec!["entry point".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn test_serializes_comments_as_object() {
        let mut result = ExtractionResult::new();
        result.insert("Foo", vec!["a widget".to_string()]);
        result.classes.push("Foo".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["comments_by_name"]["Foo"][0], "a widget");
        assert_eq!(json["class_names"][0], "Foo");
        assert!(json["function_names"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_lookup_after_many_inserts() {
        let mut result = ExtractionResult::new();
        for i in 0..500 {
            result.insert(&format!("f{i}"), Vec::new());
        }
        result.insert("f10", vec!["again".to_string()]);
        result.append("f499", "last");
        assert_eq!(result.len(), 500);
        assert_eq!(result.comments()[10], ("f10".to_string(), vec!["again".to_string()]));
        assert_eq!(result.get("f499"), Some(&vec!["last".to_string()]));
        assert_eq!(result.get("f500"), None);
    }

    #[test]
    fn test_append_unknown_name_is_ignored() {
        let mut result = ExtractionResult::new();
        result.append("ghost", "boo");
        assert!(result.is_empty());
    }
}
