// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Yardsweep library - sweep a directory yard for dirty repositories
//!
//! This crate walks a directory tree, finds git repositories, and builds a
//! report of their uncommitted changes, branch tracking state, and push
//! state against the conventional remote.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod git;
pub mod render;
pub mod scanner;
pub mod status;

/// Core data types for the scan report
pub mod types {
    use serde::Serialize;
    use std::path::PathBuf;

    // =========================================================================
    // File Changes
    // =========================================================================

    /// Classification of a single porcelain status character
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum StatusCode {
        /// Content differs from the comparison side (M)
        Modified,
        /// Newly recorded in the index (A)
        Added,
        /// Removed (D)
        Deleted,
        /// Present in the working tree but unknown to the index (?)
        Untracked,
        /// Moved to a new path (R)
        Renamed,
        /// Any status character outside the recognized set
        Unknown,
    }

    impl StatusCode {
        /// Map a porcelain status character to its classification
        #[must_use]
        pub fn from_porcelain(c: char) -> Self {
            match c {
                'M' => Self::Modified,
                'A' => Self::Added,
                'D' => Self::Deleted,
                'R' => Self::Renamed,
                '?' => Self::Untracked,
                _ => Self::Unknown,
            }
        }
    }

    /// One file's change state within a repository.
    ///
    /// A file with independent index and working-tree changes appears as two
    /// records, once staged and once unstaged. Untracked implies not staged.
    #[derive(Debug, Clone, Serialize)]
    pub struct FileChange {
        /// Relative path as reported by git
        pub filename: String,
        /// Status classification
        pub status: StatusCode,
        /// True when the change is recorded in the index
        pub staged: bool,
    }

    impl FileChange {
        /// True for a working-tree change that is neither staged nor untracked
        #[must_use]
        pub fn is_unstaged(&self) -> bool {
            !self.staged && self.status != StatusCode::Untracked
        }

        /// True for an untracked file
        #[must_use]
        pub fn is_untracked(&self) -> bool {
            self.status == StatusCode::Untracked
        }
    }

    // =========================================================================
    // Repository Status
    // =========================================================================

    /// Per-repository aggregate, immutable once built
    #[derive(Debug, Clone, Serialize)]
    pub struct RepoStatus {
        /// Absolute path to the repository root
        pub path: PathBuf,
        /// Current branch name, absent when detached or unresolvable
        pub branch: Option<String>,
        /// Upstream tracking branch, absent when none is configured
        pub remote_branch: Option<String>,
        /// True when the conventional remote resolves to a URL
        pub has_remote: bool,
        /// Resolved remote URL
        pub remote_url: Option<String>,
        /// True when the branch has an upstream or a cached remote-tracking ref
        pub is_pushed: bool,
        /// Commits reachable only from HEAD
        pub ahead: u32,
        /// Commits reachable only from the upstream
        pub behind: u32,
        /// File changes in git output order
        pub changes: Vec<FileChange>,
    }

    impl RepoStatus {
        /// Number of staged entries in `changes`
        #[must_use]
        pub fn staged_count(&self) -> usize {
            self.changes.iter().filter(|c| c.staged).count()
        }

        /// Number of unstaged entries in `changes`
        #[must_use]
        pub fn unstaged_count(&self) -> usize {
            self.changes.iter().filter(|c| c.is_unstaged()).count()
        }

        /// Number of untracked entries in `changes`
        #[must_use]
        pub fn untracked_count(&self) -> usize {
            self.changes.iter().filter(|c| c.is_untracked()).count()
        }
    }

    // =========================================================================
    // Scan Report
    // =========================================================================

    /// Repositories with changes, in discovery order
    #[derive(Debug, Clone, Default, Serialize)]
    pub struct ScanReport {
        /// One entry per dirty repository
        pub repos: Vec<RepoStatus>,
    }

    impl ScanReport {
        /// Append a repository record, preserving discovery order
        pub fn push(&mut self, repo: RepoStatus) {
            self.repos.push(repo);
        }

        /// True when no repository had anything to report
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.repos.is_empty()
        }

        /// Staged entries across all repositories
        #[must_use]
        pub fn total_staged(&self) -> usize {
            self.repos.iter().map(RepoStatus::staged_count).sum()
        }

        /// Unstaged entries across all repositories
        #[must_use]
        pub fn total_unstaged(&self) -> usize {
            self.repos.iter().map(RepoStatus::unstaged_count).sum()
        }

        /// Untracked entries across all repositories
        #[must_use]
        pub fn total_untracked(&self) -> usize {
            self.repos.iter().map(RepoStatus::untracked_count).sum()
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
