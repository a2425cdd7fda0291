// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use yardsweep::status::parse_status_listing;
use yardsweep::types::StatusCode;

fuzz_target!(|data: &[u8]| {
    if let Ok(listing) = std::str::from_utf8(data) {
        let changes = parse_status_listing(listing, |path| path.ends_with(".log"));

        // Untracked and staged are mutually exclusive, and the three buckets
        // cover every record exactly once
        let staged = changes.iter().filter(|c| c.staged).count();
        let unstaged = changes.iter().filter(|c| c.is_unstaged()).count();
        let untracked = changes.iter().filter(|c| c.is_untracked()).count();
        assert_eq!(staged + unstaged + untracked, changes.len());
        for change in &changes {
            assert!(!(change.staged && change.status == StatusCode::Untracked));
        }
    }
});
