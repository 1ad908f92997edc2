use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Files larger than this (in bytes) are skipped by the docs pipeline.
pub const MAX_FILE_READ: u64 = 512 * 1024;

/// Default HTTP port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

// ---------------------------------------------------------------------------
// Docs configuration: loaded from ifixdocs.toml or defaults
// ---------------------------------------------------------------------------

/// Runtime configuration for doc generation and the HTTP layer.
#[derive(Clone, Debug)]
pub struct DocsConfig {
    /// File extensions to document (without the dot).
    pub extensions: HashSet<String>,
    /// Directory names to skip during the walk.
    pub skip_dirs: HashSet<String>,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Commits listed per file in the history section.
    pub history_limit: usize,
    /// Where `/edit-doc/` stores edited pages.
    pub edits_dir: PathBuf,
}

impl DocsConfig {
    pub fn new(edits_dir: PathBuf) -> Self {
        Self {
            extensions: ["py"].iter().map(|s| s.to_string()).collect(),
            skip_dirs: [
                ".git",
                "docs",
                "node_modules",
                "__pycache__",
                "venv",
                ".venv",
                "build",
                "dist",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            history_limit: 5,
            edits_dir,
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        let edits_dir = crate::data_dir()
            .map(|d| d.join("edits"))
            .unwrap_or_else(|| PathBuf::from("ifixdocs-edits"));
        Self::new(edits_dir)
    }
}

// ---------------------------------------------------------------------------
// Walk output
// ---------------------------------------------------------------------------

/// A source file found by the directory walk.
#[derive(Clone, Debug)]
pub struct SourceEntry {
    pub rel_path: String,
    pub abs_path: PathBuf,
}

impl SourceEntry {
    /// Last path component, used in the page title.
    pub fn file_name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }
}

// ---------------------------------------------------------------------------
// Axum state
// ---------------------------------------------------------------------------

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DocsConfig>,
    pub start_time: Instant,
}

impl AppContext {
    pub fn new(config: DocsConfig) -> Self {
        Self { config: Arc::new(config), start_time: Instant::now() }
    }
}
