// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Read projection of remote metadata onto caller-declared kinds.
//!
//! The authority's metadata set for a zone routinely contains kinds the
//! caller never declared: defaults set by the authority itself, entries
//! managed by other tooling, or manual configuration. When the caller reads
//! its state back, only the kinds it declared are its business. This module
//! filters the remote set down to that owned subset.
//!
//! A kind added on the authority by some other actor stays invisible here
//! until the caller also declares it - dropped entries are logged, never
//! errors.

use crate::metadata::ZoneMetadataEntry;
use std::collections::HashSet;
use tracing::debug;

/// Filter a remote metadata set down to the caller-declared kinds.
///
/// An entry passes iff its kind is a member of `wanted_kinds`. Entries are
/// kept in the order they were encountered; multiple remote entries sharing
/// a kind each pass independently, unmerged. An empty `wanted_kinds` yields
/// an empty projection, which is a valid terminal state.
///
/// # Example
///
/// ```rust
/// use pdns_metadata::metadata::ZoneMetadataEntry;
/// use pdns_metadata::projection::project_metadata;
/// use std::collections::HashSet;
///
/// let remote = vec![
///     ZoneMetadataEntry::new("SOA-EDIT", vec!["INCEPTION-INCREMENT".into()]),
///     ZoneMetadataEntry::new("ALLOW-AXFR-FROM", vec!["AUTO-NS".into()]),
/// ];
/// let wanted: HashSet<String> = ["SOA-EDIT".to_string()].into();
///
/// let projected = project_metadata(&remote, &wanted);
/// assert_eq!(projected.len(), 1);
/// assert_eq!(projected[0].kind, "SOA-EDIT");
/// ```
#[must_use]
pub fn project_metadata(
    remote: &[ZoneMetadataEntry],
    wanted_kinds: &HashSet<String>,
) -> Vec<ZoneMetadataEntry> {
    let mut projected = Vec::new();

    for entry in remote {
        if wanted_kinds.contains(&entry.kind) {
            debug!(kind = %entry.kind, values = ?entry.values, "Projecting metadata entry");
            projected.push(entry.clone());
        } else {
            debug!(kind = %entry.kind, "Skipping metadata kind not present in declared set");
        }
    }

    projected
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod projection_tests;
