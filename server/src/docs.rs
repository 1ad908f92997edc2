//! Docs pipeline: clone → walk → extract → render → write.
//!
//! Every request gets its own scratch directory, removed when the
//! [`tempfile::TempDir`] guard drops, on success and on every error path.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use ifixdocs_core::{extract, render_markdown};

use crate::error::DocsError;
use crate::git::{clone_repo, format_history, history_index, HistoryIndex};
use crate::types::{DocsConfig, SourceEntry, MAX_FILE_READ};
use crate::walk::walk_source_files;

/// Name of the directory the rendered pages are written to, inside the checkout.
pub const DOCS_DIR: &str = "docs";

/// Repository name from its URL: last path segment without `.git`.
///
/// `https://github.com/user/project.git` → `project`.
pub fn repo_name_from_url(repo_url: &str) -> Result<String, DocsError> {
    let url = repo_url.trim();
    if url.is_empty() {
        return Err(DocsError::InvalidRequest("repo_url must not be empty".into()));
    }
    let last = url.trim_end_matches('/').rsplit(['/', ':']).next().unwrap_or("");
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() || name == "." || name == ".." {
        return Err(DocsError::InvalidRequest(format!(
            "cannot derive a repository name from '{url}'"
        )));
    }
    Ok(name.to_string())
}

/// Clone `repo_url` into a scratch directory and document it.
///
/// Returns rendered Markdown keyed by path relative to the repository root.
pub fn generate_docs(
    repo_url: &str,
    config: &DocsConfig,
) -> Result<BTreeMap<String, String>, DocsError> {
    let repo_name = repo_name_from_url(repo_url)?;
    let scratch = tempfile::Builder::new()
        .prefix("ifixdocs-")
        .tempdir()
        .map_err(|e| DocsError::io("create scratch directory", e))?;
    let repo_path = scratch.path().join(&repo_name);

    let start = Instant::now();
    clone_repo(repo_url.trim(), &repo_path).map_err(DocsError::Clone)?;
    info!(
        repo = repo_name.as_str(),
        time_ms = start.elapsed().as_millis() as u64,
        "Cloned repository"
    );

    generate_docs_for_path(&repo_path, config)
}

/// Document an existing checkout at `repo_root`, writing pages under
/// `<repo_root>/docs/`.
pub fn generate_docs_for_path(
    repo_root: &Path,
    config: &DocsConfig,
) -> Result<BTreeMap<String, String>, DocsError> {
    let start = Instant::now();
    let docs_path = repo_root.join(DOCS_DIR);
    fs::create_dir_all(&docs_path)
        .map_err(|e| DocsError::io(format!("create {}", docs_path.display()), e))?;

    let files = walk_source_files(repo_root, config);
    let history = match history_index(repo_root, config.history_limit) {
        Ok(index) => index,
        Err(e) => {
            warn!(root = %repo_root.display(), error = e.as_str(), "No commit history available");
            HistoryIndex::new()
        }
    };

    let rendered: Vec<(String, String)> = files
        .par_iter()
        .filter_map(|file| document_file(file, &history))
        .collect();

    let mut docs = BTreeMap::new();
    for (rel_path, markdown) in rendered {
        let out = doc_path(&docs_path, &rel_path);
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DocsError::io(format!("create {}", parent.display()), e))?;
        }
        fs::write(&out, &markdown)
            .map_err(|e| DocsError::io(format!("write {}", out.display()), e))?;
        docs.insert(rel_path, markdown);
    }

    info!(
        root = %repo_root.display(),
        found = files.len(),
        documented = docs.len(),
        time_ms = start.elapsed().as_millis() as u64,
        "Docs generated"
    );
    Ok(docs)
}

/// Where the page for `rel_path` is written: `docs/<rel_path>.md`.
pub fn doc_path(docs_path: &Path, rel_path: &str) -> PathBuf {
    docs_path.join(format!("{rel_path}.md"))
}

/// Extract and render one file. Oversized or non-UTF-8 files are skipped.
fn document_file(file: &SourceEntry, history: &HistoryIndex) -> Option<(String, String)> {
    let size = fs::metadata(&file.abs_path).map(|m| m.len()).unwrap_or(0);
    if size > MAX_FILE_READ {
        warn!(path = file.rel_path.as_str(), size, "Skipping oversized file");
        return None;
    }
    let content = match fs::read_to_string(&file.abs_path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = file.rel_path.as_str(), error = %e, "Skipping unreadable file");
            return None;
        }
    };

    let result = extract(&content);
    let commits = history.get(&file.rel_path).map(|c| format_history(c)).unwrap_or_default();
    debug!(
        path = file.rel_path.as_str(),
        classes = result.classes.len(),
        functions = result.functions.len(),
        commits = history.get(&file.rel_path).map_or(0, Vec::len),
        "Documented file"
    );
    Some((file.rel_path.clone(), render_markdown(file.file_name(), &result, &commits)))
}
