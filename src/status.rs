// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Porcelain status parsing

use crate::types::{FileChange, StatusCode};

// Two status bytes, a separator, and at least one path byte
const MIN_LINE_LEN: usize = 4;

const UNTRACKED_MARKER: u8 = b'?';

/// Parse a porcelain status listing into per-file change records.
///
/// Each line carries an index byte, a worktree byte, and a path. A single
/// line can yield a staged record, an unstaged record, both, or one
/// untracked record. Paths accepted by `is_ignored` are dropped entirely;
/// unrecognized status characters are kept as [`StatusCode::Unknown`] so no
/// line with a valid path is silently lost.
pub fn parse_status_listing<F>(listing: &str, is_ignored: F) -> Vec<FileChange>
where
    F: Fn(&str) -> bool,
{
    let mut changes = Vec::new();

    for line in listing.lines() {
        if line.len() < MIN_LINE_LEN {
            continue;
        }
        let bytes = line.as_bytes();
        let index = bytes[0];
        let worktree = bytes[1];
        let Some(filename) = line.get(3..) else {
            continue;
        };

        // The listing normally excludes ignored paths, but tracked-but-ignored
        // files can still surface
        if is_ignored(filename) {
            continue;
        }

        if index != b' ' && index != UNTRACKED_MARKER {
            changes.push(FileChange {
                filename: filename.to_string(),
                status: StatusCode::from_porcelain(index as char),
                staged: true,
            });
        }

        if worktree != b' ' && worktree != UNTRACKED_MARKER {
            changes.push(FileChange {
                filename: filename.to_string(),
                status: StatusCode::from_porcelain(worktree as char),
                staged: false,
            });
        }

        if index == UNTRACKED_MARKER && worktree == UNTRACKED_MARKER {
            changes.push(FileChange {
                filename: filename.to_string(),
                status: StatusCode::Untracked,
                staged: false,
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(listing: &str) -> Vec<FileChange> {
        parse_status_listing(listing, |_| false)
    }

    #[test]
    fn test_staged_modified() {
        let changes = parse("M  file.txt");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].filename, "file.txt");
        assert_eq!(changes[0].status, StatusCode::Modified);
        assert!(changes[0].staged);
    }

    #[test]
    fn test_unstaged_modified() {
        let changes = parse(" M file.txt");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, StatusCode::Modified);
        assert!(!changes[0].staged);
    }

    #[test]
    fn test_staged_and_unstaged_same_file() {
        let changes = parse("MM file.txt");
        assert_eq!(changes.len(), 2);
        assert!(changes[0].staged);
        assert!(!changes[1].staged);
        assert_eq!(changes[0].filename, changes[1].filename);
    }

    #[test]
    fn test_untracked() {
        let changes = parse("?? new.txt");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, StatusCode::Untracked);
        assert!(!changes[0].staged);
    }

    #[test]
    fn test_staged_added_and_deleted() {
        let changes = parse("A  new.rs\nD  gone.rs");
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].status, StatusCode::Added);
        assert_eq!(changes[1].status, StatusCode::Deleted);
        assert!(changes.iter().all(|c| c.staged));
    }

    #[test]
    fn test_unstaged_deleted() {
        let changes = parse(" D gone.rs");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, StatusCode::Deleted);
        assert!(!changes[0].staged);
    }

    #[test]
    fn test_rename_keeps_full_path_pair() {
        let changes = parse("R  old.rs -> new.rs");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, StatusCode::Renamed);
        assert_eq!(changes[0].filename, "old.rs -> new.rs");
    }

    #[test]
    fn test_unknown_status_character_is_kept() {
        let changes = parse("X  weird.txt");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, StatusCode::Unknown);
        assert!(changes[0].staged);
    }

    #[test]
    fn test_ignored_paths_are_dropped() {
        let changes = parse_status_listing("M  keep.rs\nM  drop.log\n?? drop2.log", |p| {
            p.ends_with(".log")
        });
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].filename, "keep.rs");
    }

    #[test]
    fn test_short_lines_are_skipped() {
        assert!(parse("").is_empty());
        assert!(parse("M\n??\nM  ").is_empty());
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let changes = parse("M  b.rs\n?? a.rs\nA  c.rs");
        let names: Vec<_> = changes.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(names, vec!["b.rs", "a.rs", "c.rs"]);
    }

    proptest! {
        #[test]
        fn prop_buckets_partition_the_change_set(
            lines in proptest::collection::vec(
                (
                    proptest::sample::select(vec![' ', '?', 'M', 'A', 'D', 'R', 'X']),
                    proptest::sample::select(vec![' ', '?', 'M', 'A', 'D', 'R', 'X']),
                    "[a-z]{1,12}(\\.[a-z]{1,3})?",
                ),
                0..20,
            )
        ) {
            let listing: String = lines
                .iter()
                .map(|(index, worktree, path)| format!("{index}{worktree} {path}\n"))
                .collect();
            let changes = parse(&listing);

            let staged = changes.iter().filter(|c| c.staged).count();
            let unstaged = changes.iter().filter(|c| c.is_unstaged()).count();
            let untracked = changes.iter().filter(|c| c.is_untracked()).count();

            // The three buckets cover every record exactly once
            prop_assert_eq!(staged + unstaged + untracked, changes.len());

            // Untracked implies not staged
            for change in &changes {
                prop_assert!(!(change.staged && change.status == StatusCode::Untracked));
            }
        }
    }
}
