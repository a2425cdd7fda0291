// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Per-repository status aggregation

use crate::git::GitQuery;
use crate::status::parse_status_listing;
use crate::types::RepoStatus;
use std::path::Path;
use tracing::debug;

/// Build the full status record for one repository root.
///
/// Returns `None` when the repository has nothing to report. An individual
/// query failure degrades the matching field to its absent value; the
/// aggregation itself never fails for a reachable repository.
pub fn collect_repo_status<G: GitQuery + ?Sized>(git: &G, root: &Path) -> Option<RepoStatus> {
    let branch = git.current_branch(root);
    let remote_url = git.remote_url(root);
    let has_remote = remote_url.is_some();
    let remote_branch = git.upstream_branch(root);
    let mut is_pushed = remote_branch.is_some();

    // No live upstream link: a cached remote-tracking ref is still proof the
    // branch reached the remote at some point. Local refs only, so this can
    // be stale, but it never touches the network.
    if !is_pushed && has_remote {
        if let Some(branch) = branch.as_deref() {
            is_pushed = git.has_remote_ref(root, branch);
        }
    }

    let (ahead, behind) = if remote_branch.is_some() {
        git.ahead_behind(root).unwrap_or((0, 0))
    } else {
        (0, 0)
    };

    let listing = git.status_listing(root).unwrap_or_default();
    let changes = parse_status_listing(&listing, |path| git.is_ignored(root, path));

    if changes.is_empty() {
        debug!("clean repository, skipping: {}", root.display());
        return None;
    }

    debug!(
        "{}: {} changes on {}",
        root.display(),
        changes.len(),
        branch.as_deref().unwrap_or("(unknown)")
    );

    Some(RepoStatus {
        path: root.to_path_buf(),
        branch,
        remote_branch,
        has_remote,
        remote_url,
        is_pushed,
        ahead,
        behind,
        changes,
    })
}
