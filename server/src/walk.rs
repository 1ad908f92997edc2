//! Directory walk over a checkout, filtered by extension and skip list.

use ignore::WalkBuilder;
use std::path::Path;
use std::sync::Mutex;

use crate::types::{DocsConfig, SourceEntry};

/// Collect source files under `root` whose extension is in `config.extensions`.
///
/// Hidden entries and `config.skip_dirs` are pruned; `.gitignore` is not
/// consulted so vendored sources still get documented. Results are sorted by
/// relative path.
pub fn walk_source_files(root: &Path, config: &DocsConfig) -> Vec<SourceEntry> {
    let results: Mutex<Vec<SourceEntry>> = Mutex::new(Vec::new());
    let skip = config.skip_dirs.clone();
    let extensions = &config.extensions;

    WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .threads(rayon::current_num_threads().min(12))
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                return !skip.contains(name.as_ref());
            }
            true
        })
        .build_parallel()
        .run(|| {
            Box::new(|entry| {
                let entry = match entry {
                    Ok(e) => e,
                    Err(_) => return ignore::WalkState::Continue,
                };
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return ignore::WalkState::Continue;
                }

                let abs_path = entry.path().to_path_buf();
                let ext = abs_path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if !extensions.contains(ext) {
                    return ignore::WalkState::Continue;
                }

                let rel_path = abs_path
                    .strip_prefix(root)
                    .unwrap_or(&abs_path)
                    .to_string_lossy()
                    .replace('\\', "/");

                if let Ok(mut files) = results.lock() {
                    files.push(SourceEntry { rel_path, abs_path });
                }
                ignore::WalkState::Continue
            })
        });

    let mut files = results.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x = 1\n").unwrap();
    }

    #[test]
    fn test_walk_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "pkg/b.py");
        touch(root, "a.py");
        touch(root, "README.md");
        touch(root, "node_modules/dep/index.py");
        touch(root, "docs/a.py.md");
        touch(root, ".hidden/secret.py");
        touch(root, "pkg/__pycache__/b.cpython-311.py");

        let config = DocsConfig::new(root.join("edits"));
        let files = walk_source_files(root, &config);
        let rels: Vec<&str> = files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(rels, vec!["a.py", "pkg/b.py"]);
        assert_eq!(files[1].file_name(), "b.py");
        assert!(files[1].abs_path.ends_with("pkg/b.py"));
    }

    #[test]
    fn test_walk_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.py");
        touch(root, "b.pyi");

        let mut config = DocsConfig::new(root.join("edits"));
        config.extensions = ["pyi".to_string()].into_iter().collect();
        let files = walk_source_files(root, &config);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rel_path, "b.pyi");
    }
}
