//! iFixDocs backend: clone a repository, document its Python sources, and
//! serve the pages over HTTP.
//!
//! # Modules
//!
//! - [`api`]: Axum router and handlers
//! - [`docs`]: Clone → walk → extract → render → write pipeline
//! - [`git`]: Clone and per-file commit history
//! - [`walk`]: Extension-filtered directory walk
//! - [`edits`]: Storage for pages edited in the frontend
//! - [`error`]: [`error::DocsError`] and its HTTP mapping
//! - [`types`]: Configuration and shared state

pub mod api;
pub mod docs;
pub mod edits;
pub mod error;
pub mod git;
pub mod types;
pub mod walk;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use types::DocsConfig;

// ---------------------------------------------------------------------------
// Cross-platform path helpers
// ---------------------------------------------------------------------------

/// Platform-aware home directory: `HOME` on Unix, `USERPROFILE` on Windows.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")).ok().map(PathBuf::from)
}

/// Platform-aware data directory: `~/.local/share/ifixdocs` on Unix, `%LOCALAPPDATA%/ifixdocs` on Windows.
pub fn data_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var("LOCALAPPDATA")
            .or_else(|_| std::env::var("APPDATA"))
            .ok()
            .map(|a| PathBuf::from(a).join("ifixdocs"))
    } else {
        home_dir().map(|h| h.join(".local/share/ifixdocs"))
    }
}

// ---------------------------------------------------------------------------
// ifixdocs.toml config loading
// ---------------------------------------------------------------------------

/// File name looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "ifixdocs.toml";

/// Known keys in `ifixdocs.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] =
    &["extensions", "skip_dirs", "allowed_origins", "history_limit", "edits_dir"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn string_list(value: &toml::Value) -> Option<Vec<String>> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(|s| s.to_string())).collect())
}

/// Apply the keys of a parsed `ifixdocs.toml` table on top of `config`.
///
/// Unknown keys trigger a warning with a typo suggestion.
pub fn apply_config_table(config: &mut DocsConfig, table: &toml::Table) {
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match suggestion {
            Some(suggestion) if edit_distance(key, suggestion) <= 3 => {
                warn!(
                    key = key.as_str(),
                    suggestion = *suggestion,
                    "Unknown key in {CONFIG_FILE}: did you mean '{suggestion}'?"
                );
            }
            _ => {
                warn!(
                    key = key.as_str(),
                    "Unknown key in {CONFIG_FILE} (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }
    }

    // extensions: replace defaults, tolerate a leading dot
    if let Some(exts) = table.get("extensions").and_then(string_list) {
        config.extensions =
            exts.into_iter().map(|e| e.trim_start_matches('.').to_string()).collect();
    }

    // skip_dirs: merge with defaults
    if let Some(dirs) = table.get("skip_dirs").and_then(string_list) {
        config.skip_dirs.extend(dirs);
    }

    if let Some(origins) = table.get("allowed_origins").and_then(string_list) {
        config.allowed_origins = origins;
    }

    if let Some(limit) = table.get("history_limit").and_then(|v| v.as_integer()) {
        if limit >= 0 {
            config.history_limit = limit as usize;
        } else {
            warn!(history_limit = limit, "history_limit must not be negative, keeping default");
        }
    }

    if let Some(dir) = table.get("edits_dir").and_then(|v| v.as_str()) {
        config.edits_dir = PathBuf::from(dir);
    }
}

/// Load [`DocsConfig`] from a TOML file.
///
/// A missing or unparsable file yields defaults with a warning.
pub fn load_docs_config(path: &Path) -> DocsConfig {
    let mut config = DocsConfig::default();
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return config;
    }

    debug!(path = %path.display(), "Loading config");
    match std::fs::read_to_string(path) {
        Ok(content) => match content.parse::<toml::Table>() {
            Ok(table) => apply_config_table(&mut config, &table),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to parse config"),
        },
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to read config"),
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("extensions", "extensions"), 0);
        assert_eq!(edit_distance("extension", "extensions"), 1);
        assert_eq!(edit_distance("skip_dir", "skip_dirs"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_apply_config_table() {
        let table: toml::Table = r#"
            extensions = [".py", "pyi"]
            skip_dirs = ["third_party"]
            allowed_origins = ["https://docs.example.com"]
            history_limit = 2
            edits_dir = "/var/lib/ifixdocs"
            extention = "typo"
        "#
        .parse()
        .unwrap();

        let mut config = DocsConfig::new(PathBuf::from("edits"));
        apply_config_table(&mut config, &table);

        assert!(config.extensions.contains("py"));
        assert!(config.extensions.contains("pyi"));
        assert_eq!(config.extensions.len(), 2);
        assert!(config.skip_dirs.contains("third_party"));
        assert!(config.skip_dirs.contains(".git"), "defaults are kept");
        assert_eq!(config.allowed_origins, vec!["https://docs.example.com"]);
        assert_eq!(config.history_limit, 2);
        assert_eq!(config.edits_dir, PathBuf::from("/var/lib/ifixdocs"));
    }

    #[test]
    fn test_negative_history_limit_ignored() {
        let table: toml::Table = "history_limit = -1".parse().unwrap();
        let mut config = DocsConfig::new(PathBuf::from("edits"));
        apply_config_table(&mut config, &table);
        assert_eq!(config.history_limit, 5);
    }

    #[test]
    fn test_load_docs_config_missing_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_docs_config(&dir.path().join(CONFIG_FILE));
        assert!(config.extensions.contains("py"));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "extensions = [").unwrap();
        let config = load_docs_config(&broken);
        assert_eq!(config.history_limit, 5);

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "history_limit = 9\n").unwrap();
        assert_eq!(load_docs_config(&good).history_limit, 9);
    }
}
