// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Subprocess adapter for read-only git queries

use std::path::Path;
use std::process::{Command, Stdio};

/// Conventional remote probed for a URL and for cached tracking refs
pub const DEFAULT_REMOTE: &str = "origin";

/// Narrow query interface over the git CLI.
///
/// Each method asks one read-only question about a repository. Absence of
/// an answer (no upstream, no remote, git not installed) is `None` or
/// `false`, never an error: a failed read means "no information".
pub trait GitQuery {
    /// Current branch name from HEAD
    fn current_branch(&self, repo: &Path) -> Option<String>;

    /// URL of the conventional remote
    fn remote_url(&self, repo: &Path) -> Option<String>;

    /// Symbolic name of the upstream tracking branch
    fn upstream_branch(&self, repo: &Path) -> Option<String>;

    /// Whether a cached remote-tracking ref exists for `branch`
    fn has_remote_ref(&self, repo: &Path, branch: &str) -> bool;

    /// Commits unique to HEAD and unique to the upstream, in that order
    fn ahead_behind(&self, repo: &Path) -> Option<(u32, u32)>;

    /// Whether `relpath` matches the repository's ignore rules
    fn is_ignored(&self, repo: &Path, relpath: &str) -> bool;

    /// Porcelain status listing, one `XY path` line per entry
    fn status_listing(&self, repo: &Path) -> Option<String>;
}

/// [`GitQuery`] implementation spawning one `git` process per query.
///
/// Every call is an independent, idempotent subprocess; no state is shared
/// between queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    fn output(repo: &Path, args: &[&str]) -> Option<std::process::Output> {
        Command::new("git")
            .arg("-C")
            .arg(repo)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()
    }

    /// First stdout line of a successful invocation, trimmed of terminators
    fn first_line(repo: &Path, args: &[&str]) -> Option<String> {
        let output = Self::output(repo, args)?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next()?.trim_end_matches('\r').to_string();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }
}

impl GitQuery for GitCli {
    fn current_branch(&self, repo: &Path) -> Option<String> {
        // rev-parse prints the literal string HEAD when detached
        Self::first_line(repo, &["rev-parse", "--abbrev-ref", "HEAD"])
            .filter(|name| name != "HEAD")
    }

    fn remote_url(&self, repo: &Path) -> Option<String> {
        Self::first_line(repo, &["remote", "get-url", DEFAULT_REMOTE])
    }

    fn upstream_branch(&self, repo: &Path) -> Option<String> {
        Self::first_line(
            repo,
            &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
        )
    }

    fn has_remote_ref(&self, repo: &Path, branch: &str) -> bool {
        let refname = format!("refs/remotes/{DEFAULT_REMOTE}/{branch}");
        Self::output(repo, &["rev-parse", "--verify", "--quiet", &refname])
            .is_some_and(|out| out.status.success() && !out.stdout.is_empty())
    }

    fn ahead_behind(&self, repo: &Path) -> Option<(u32, u32)> {
        let line = Self::first_line(repo, &["rev-list", "--left-right", "--count", "HEAD...@{u}"])?;
        let mut counts = line.split('\t');
        let ahead = counts.next()?.trim().parse().ok()?;
        let behind = counts.next()?.trim().parse().ok()?;
        Some((ahead, behind))
    }

    fn is_ignored(&self, repo: &Path, relpath: &str) -> bool {
        // --no-index applies the ignore rules even to tracked files
        Self::output(repo, &["check-ignore", "-q", "--no-index", relpath])
            .is_some_and(|out| out.status.success())
    }

    fn status_listing(&self, repo: &Path) -> Option<String> {
        let output = Self::output(repo, &["status", "--porcelain"])?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
