// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Repository discovery

use crate::aggregate::collect_repo_status;
use crate::git::GitQuery;
use crate::types::ScanReport;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Whether `dir` is a repository root.
///
/// The `.git` entry can be a directory or, for worktrees and submodules, a
/// plain file; either counts.
#[must_use]
pub fn is_repo_root(dir: &Path) -> bool {
    dir.join(".git").exists()
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Walk `root` depth-first and aggregate every repository found.
///
/// A repository's subtree is never descended into, so nested metadata stays
/// untouched. Hidden entries below the start directory are skipped, and so
/// are unreadable directories. Report order is discovery order.
pub fn scan_path<G: GitQuery>(root: &Path, git: &G) -> ScanReport {
    info!("scanning {}", root.display());

    let mut report = ScanReport::default();
    let mut walker = WalkDir::new(root).follow_links(false).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.depth() > 0 && is_hidden(&entry) {
            walker.skip_current_dir();
            continue;
        }

        if is_repo_root(entry.path()) {
            if let Some(status) = collect_repo_status(git, entry.path()) {
                report.push(status);
            }
            walker.skip_current_dir();
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Reports one untracked file for every repository it is asked about,
    /// and records which roots were visited
    #[derive(Default)]
    struct RecordingGit {
        visited: std::sync::Mutex<Vec<PathBuf>>,
    }

    impl GitQuery for RecordingGit {
        fn current_branch(&self, _repo: &Path) -> Option<String> {
            Some("main".into())
        }

        fn remote_url(&self, _repo: &Path) -> Option<String> {
            None
        }

        fn upstream_branch(&self, _repo: &Path) -> Option<String> {
            None
        }

        fn has_remote_ref(&self, _repo: &Path, _branch: &str) -> bool {
            false
        }

        fn ahead_behind(&self, _repo: &Path) -> Option<(u32, u32)> {
            None
        }

        fn is_ignored(&self, _repo: &Path, _relpath: &str) -> bool {
            false
        }

        fn status_listing(&self, repo: &Path) -> Option<String> {
            self.visited.lock().unwrap().push(repo.to_path_buf());
            Some("?? scratch.txt\n".into())
        }
    }

    fn mkrepo(dir: &Path) {
        fs::create_dir_all(dir.join(".git")).unwrap();
    }

    #[test]
    fn test_finds_repositories_and_skips_their_subtrees() {
        let tree = TempDir::new().unwrap();
        mkrepo(&tree.path().join("alpha"));
        // Nested repository below another repository root is never reached
        mkrepo(&tree.path().join("alpha/vendor/inner"));
        fs::create_dir_all(tree.path().join("plain/nested")).unwrap();
        mkrepo(&tree.path().join("plain/nested/beta"));

        let git = RecordingGit::default();
        let report = scan_path(tree.path(), &git);

        assert_eq!(report.repos.len(), 2);
        let visited = git.visited.lock().unwrap();
        assert!(visited.iter().any(|p| p.ends_with("alpha")));
        assert!(visited.iter().any(|p| p.ends_with("beta")));
        assert!(!visited.iter().any(|p| p.ends_with("inner")));
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let tree = TempDir::new().unwrap();
        mkrepo(&tree.path().join(".config/hidden-repo"));
        mkrepo(&tree.path().join("visible"));

        let git = RecordingGit::default();
        let report = scan_path(tree.path(), &git);

        assert_eq!(report.repos.len(), 1);
        assert!(report.repos[0].path.ends_with("visible"));
    }

    #[test]
    fn test_start_directory_itself_can_be_a_repository() {
        let tree = TempDir::new().unwrap();
        mkrepo(tree.path());
        // Would be found if the walk continued past the root
        mkrepo(&tree.path().join("child"));

        let git = RecordingGit::default();
        let report = scan_path(tree.path(), &git);

        assert_eq!(report.repos.len(), 1);
        assert_eq!(report.repos[0].path, tree.path());
    }

    #[test]
    fn test_empty_tree_yields_empty_report() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("a/b/c")).unwrap();

        let git = RecordingGit::default();
        let report = scan_path(tree.path(), &git);

        assert!(report.is_empty());
        assert_eq!(report.total_staged(), 0);
    }
}
