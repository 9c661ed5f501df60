// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone metadata data model.
//!
//! This module defines the strongly-typed shapes that flow through the
//! reconciliation engine:
//!
//! - [`ZoneMetadataEntry`] - one metadata kind and its values for a zone
//! - [`DeclaredSet`] - the validated set of entries a caller declares
//!   ownership of for a single zone
//!
//! The declared set is the unit of ownership: a caller only ever reads back
//! or deletes the metadata kinds it has declared here. Entries arriving from
//! external configuration are validated at construction, so malformed input
//! is rejected before it reaches any reconciler.
//!
//! # Example
//!
//! ```rust
//! use pdns_metadata::metadata::{DeclaredSet, ZoneMetadataEntry};
//!
//! let declared = DeclaredSet::new(vec![ZoneMetadataEntry {
//!     kind: "SOA-EDIT".to_string(),
//!     values: vec!["INCEPTION-INCREMENT".to_string()],
//! }])
//! .unwrap();
//!
//! assert!(declared.kinds().contains("SOA-EDIT"));
//! ```

use crate::errors::MetadataError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// One zone metadata entry: a kind and its values.
///
/// `kind` is a category label defined by the DNS authority (for example
/// `ALLOW-AXFR-FROM` or `SOA-EDIT`). `values` keeps the order it was
/// supplied in, but order carries no semantic weight: two entries with the
/// same kind and the same values in a different order describe the same
/// remote state. Use [`ZoneMetadataEntry::values_match`] for that comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMetadataEntry {
    /// Authority-defined metadata category (e.g. "SOA-EDIT")
    pub kind: String,
    /// Values for this kind, in the order they were supplied
    pub values: Vec<String>,
}

impl ZoneMetadataEntry {
    pub fn new(kind: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            values,
        }
    }

    /// Compare this entry's values with another set of values, ignoring
    /// order and repetition.
    ///
    /// The authority treats the values of one kind as a set of strings, so
    /// equality here is set equality.
    #[must_use]
    pub fn values_match(&self, other: &[String]) -> bool {
        let mine: BTreeSet<&str> = self.values.iter().map(String::as_str).collect();
        let theirs: BTreeSet<&str> = other.iter().map(String::as_str).collect();
        mine == theirs
    }
}

/// The full list of metadata entries a caller declares for one zone.
///
/// A `DeclaredSet` is supplied fresh on every reconciliation call; the engine
/// never diffs it against a previous run. Construction enforces that each
/// kind appears at most once - the remote authority keys its per-kind write
/// and delete primitives by kind, so a duplicate kind in one declared set
/// has no well-defined meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoneMetadataEntry>", into = "Vec<ZoneMetadataEntry>")]
pub struct DeclaredSet {
    entries: Vec<ZoneMetadataEntry>,
}

impl DeclaredSet {
    /// Build a declared set from raw entries, validating kind uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::DuplicateKind`] if two entries share a kind.
    pub fn new(entries: Vec<ZoneMetadataEntry>) -> Result<Self, MetadataError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.kind.as_str()) {
                return Err(MetadataError::DuplicateKind {
                    kind: entry.kind.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// An empty declared set. Valid: reconciling it is a no-op and a
    /// projection through its kinds is empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[ZoneMetadataEntry] {
        &self.entries
    }

    /// The set of kinds this caller owns, used to scope read projections.
    #[must_use]
    pub fn kinds(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.kind.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ZoneMetadataEntry> {
        self.entries.iter()
    }
}

impl TryFrom<Vec<ZoneMetadataEntry>> for DeclaredSet {
    type Error = MetadataError;

    fn try_from(entries: Vec<ZoneMetadataEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<DeclaredSet> for Vec<ZoneMetadataEntry> {
    fn from(set: DeclaredSet) -> Self {
        set.entries
    }
}

impl<'a> IntoIterator for &'a DeclaredSet {
    type Item = &'a ZoneMetadataEntry;
    type IntoIter = std::slice::Iter<'a, ZoneMetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod metadata_tests;
