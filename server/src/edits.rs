//! Persistence for pages edited in the frontend.

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::error::DocsError;

/// Check an edit target name: relative, no `..`, not empty.
pub fn validate_doc_name(file_name: &str) -> Result<&Path, DocsError> {
    let name = file_name.trim();
    if name.is_empty() {
        return Err(DocsError::InvalidRequest("file_name must not be empty".into()));
    }
    let path = Path::new(name);
    let safe = path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !safe || name.starts_with('/') || name.starts_with('\\') {
        return Err(DocsError::InvalidRequest(format!("invalid file_name '{file_name}'")));
    }
    Ok(path)
}

/// Write `content` to `<edits_dir>/<file_name>.md` and return the path written.
pub fn save_edit(edits_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf, DocsError> {
    let rel = validate_doc_name(file_name)?;
    let mut target = edits_dir.join(rel).into_os_string();
    target.push(".md");
    let target = PathBuf::from(target);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| DocsError::io(format!("create {}", parent.display()), e))?;
    }
    fs::write(&target, content)
        .map_err(|e| DocsError::io(format!("write {}", target.display()), e))?;

    info!(path = %target.display(), bytes = content.len(), "Saved edited doc");
    Ok(target)
}

/// Read back a previously saved edit.
pub fn load_edit(edits_dir: &Path, file_name: &str) -> Result<String, DocsError> {
    let rel = validate_doc_name(file_name)?;
    let mut target = edits_dir.join(rel).into_os_string();
    target.push(".md");
    fs::read_to_string(PathBuf::from(target))
        .map_err(|_| DocsError::NotFound(format!("no saved doc for '{file_name}'")))
}
