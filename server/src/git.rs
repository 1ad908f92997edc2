//! Git plumbing: cloning the target repository and per-file commit history.

use git2::{Repository, Sort, Time};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

/// Recent commits per file path (relative, `/`-separated), newest first.
pub type HistoryIndex = HashMap<String, Vec<CommitInfo>>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn format_git_time(time: Time) -> String {
    chrono_from_epoch(time.seconds(), time.offset_minutes())
}

/// Simple epoch -> date string without pulling in chrono.
fn chrono_from_epoch(epoch: i64, offset_minutes: i32) -> String {
    let adjusted = epoch + (offset_minutes as i64) * 60;
    let days = adjusted.div_euclid(86400);
    let rem = adjusted.rem_euclid(86400);
    let hours = rem / 3600;
    let mins = (rem % 3600) / 60;

    let (year, month, day) = days_to_ymd(days);

    format!("{year:04}-{month:02}-{day:02} {hours:02}:{mins:02}")
}

fn days_to_ymd(mut days: i64) -> (i64, i64, i64) {
    // Algorithm from http://howardhinnant.github.io/date_algorithms.html
    days += 719468;
    let era = if days >= 0 { days } else { days - 146096 } / 146097;
    let doe = days - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Clone `url` into `dest` with the `git` binary.
pub fn clone_repo(url: &str, dest: &Path) -> Result<(), String> {
    if url.starts_with('-') {
        return Err(format!("Refusing to clone '{url}'"));
    }
    debug!(url, dest = %dest.display(), "Cloning repository");
    let output = Command::new("git")
        .args(["clone", "--quiet", "--"])
        .arg(url)
        .arg(dest)
        .stdin(Stdio::null())
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| format!("Failed to run git: {e}"))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("git clone exited with {}: {}", output.status, stderr.trim()))
    }
}

/// Walk HEAD once (newest first) and collect up to `limit` commits for every
/// file each commit touched.
pub fn history_index(repo_root: &Path, limit: usize) -> Result<HistoryIndex, String> {
    let repo = Repository::open(repo_root).map_err(|e| format!("Failed to open repo: {e}"))?;

    let mut revwalk = repo.revwalk().map_err(|e| format!("Revwalk failed: {e}"))?;
    revwalk.push_head().map_err(|e| format!("push_head failed: {e}"))?;
    revwalk.set_sorting(Sort::TIME).map_err(|e| format!("set_sorting failed: {e}"))?;

    let mut index: HistoryIndex = HashMap::new();
    if limit == 0 {
        return Ok(index);
    }

    for oid in revwalk {
        let oid = match oid {
            Ok(o) => o,
            Err(_) => continue,
        };
        let commit = match repo.find_commit(oid) {
            Ok(c) => c,
            Err(_) => continue,
        };

        // Diff this commit vs its parent to see which files it touched
        let tree = match commit.tree() {
            Ok(t) => t,
            Err(_) => continue,
        };
        let parent_tree = commit.parent(0).ok().and_then(|p| p.tree().ok());

        let diff = match repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None) {
            Ok(d) => d,
            Err(_) => continue,
        };

        let mut touched = Vec::new();
        diff.foreach(
            &mut |delta, _| {
                if let Some(path) = delta.new_file().path().and_then(|p| p.to_str()) {
                    touched.push(path.to_string());
                }
                true
            },
            None,
            None,
            None,
        )
        .ok();

        if touched.is_empty() {
            continue;
        }

        let sig = commit.author();
        let info = CommitInfo {
            hash: oid.to_string()[..8].to_string(),
            author: sig.name().unwrap_or("unknown").to_string(),
            date: format_git_time(sig.when()),
            message: commit.message().unwrap_or("").lines().next().unwrap_or("").to_string(),
        };

        for path in touched {
            let entries = index.entry(path).or_default();
            if entries.len() < limit {
                entries.push(info.clone());
            }
        }
    }

    Ok(index)
}

/// Commit history block for one file: one bullet per commit.
pub fn format_history(commits: &[CommitInfo]) -> String {
    commits
        .iter()
        .map(|c| format!("- {} | {} | {} | {}", c.hash, c.date, c.author, c.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrono_from_epoch() {
        assert_eq!(chrono_from_epoch(0, 0), "1970-01-01 00:00");
        // 2024-02-29 12:34 UTC
        assert_eq!(chrono_from_epoch(1_709_210_040, 0), "2024-02-29 12:34");
        // Offset pushes the wall clock across midnight
        assert_eq!(chrono_from_epoch(1_709_244_000, 120), "2024-03-01 00:00");
    }

    #[test]
    fn test_format_history() {
        let commits = vec![
            CommitInfo {
                hash: "abcdef12".into(),
                author: "Ann".into(),
                date: "2024-01-02 10:00".into(),
                message: "Add parser".into(),
            },
            CommitInfo {
                hash: "12345678".into(),
                author: "Bo".into(),
                date: "2024-01-01 09:00".into(),
                message: "Initial commit".into(),
            },
        ];
        assert_eq!(
            format_history(&commits),
            "- abcdef12 | 2024-01-02 10:00 | Ann | Add parser\n- 12345678 | 2024-01-01 09:00 | Bo | Initial commit"
        );
        assert_eq!(format_history(&[]), "");
    }

    #[test]
    fn test_clone_rejects_option_like_url() {
        let dir = tempfile::tempdir().unwrap();
        let err = clone_repo("--upload-pack=evil", &dir.path().join("x")).unwrap_err();
        assert!(err.contains("Refusing"), "got: {err}");
    }

    #[test]
    fn test_history_index_on_non_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(history_index(dir.path(), 5).is_err());
    }
}
