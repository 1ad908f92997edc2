//! Test harness for docs pipeline and HTTP integration tests.
//!
//! Copies a fixture project into a temp dir and turns it into a git repository
//! with a real history, so clone and commit-history lookups run for real.

pub mod fixtures;

use ifixdocs_server::types::DocsConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestRepo {
    pub root: PathBuf,
    _temp_dir: TempDir,
}

impl TestRepo {
    /// Create a git repository from a named fixture directory.
    /// Copies fixture files to a temp dir, runs `git init` + initial commit.
    pub fn from_fixture(name: &str) -> Self {
        let fixture_src =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
        assert!(fixture_src.exists(), "Fixture '{name}' not found at {}", fixture_src.display());

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join(name);

        fixtures::copy_dir_recursive(&fixture_src, &root);

        fixtures::git(&root, &["init", "--quiet"]);
        let repo = TestRepo { root, _temp_dir: temp_dir };
        repo.commit_all("Initial commit");
        repo
    }

    /// Stage everything and commit with a fixed test identity.
    pub fn commit_all(&self, message: &str) {
        fixtures::git(&self.root, &["add", "-A"]);
        fixtures::git(
            &self.root,
            &[
                "-c", "user.email=test@test.com",
                "-c", "user.name=Test",
                "commit", "--quiet", "-m", message,
            ],
        );
    }

    /// Overwrite (or create) a file relative to the repo root.
    pub fn write(&self, rel_path: &str, content: &str) {
        let path = self.root.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Repository location usable as a clone URL.
    pub fn url(&self) -> String {
        self.root.display().to_string()
    }
}

/// Config with edits stored under `dir`.
pub fn test_config(dir: &Path) -> DocsConfig {
    DocsConfig::new(dir.join("edits"))
}
