// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zone metadata reconciliation.
//!
//! This module provides the error taxonomy surfaced to the configuration
//! engine driving the reconcilers:
//!
//! - Zone lookup failures on the read/query path
//! - Transport failures from the metadata client, wrapped with the zone and
//!   operation for logging and end-user reporting
//! - Validation failures for declared sets that break the kind-uniqueness
//!   invariant
//!
//! The engine never retries and never rolls back; every failure is returned
//! immediately with enough context to act on.

use crate::client::ClientError;
use thiserror::Error;

/// Errors returned by the zone metadata reconciliation engine.
#[derive(Error, Debug, Clone)]
pub enum MetadataError {
    /// Zone not known to the DNS authority.
    ///
    /// Raised only by the existence guard on the query path, before any
    /// metadata is fetched for presentation. The write paths do not check
    /// existence and surface the transport's own error instead.
    #[error("PowerDNS zone '{zone}' does not exist")]
    ZoneNotFound {
        /// The zone name that was not found
        zone: String,
    },

    /// A client operation against the DNS authority failed.
    ///
    /// The underlying cause (network, authentication, malformed authority
    /// response) is opaque to the engine and carried as a message, together
    /// with the zone and the operation that was attempted.
    #[error("{operation} for zone '{zone}' failed: {reason}")]
    Transport {
        /// The zone the operation targeted
        zone: String,
        /// The operation attempted (e.g. "metadata update")
        operation: String,
        /// Message from the underlying client failure
        reason: String,
    },

    /// A declared set contains the same kind twice.
    ///
    /// The authority keys its per-kind primitives by kind, so duplicate
    /// kinds in one declared set have no well-defined meaning. Rejected at
    /// the boundary where external configuration is parsed.
    #[error("duplicate metadata kind '{kind}' in declared set")]
    DuplicateKind {
        /// The kind that appeared more than once
        kind: String,
    },
}

impl MetadataError {
    /// Wrap a client failure with the zone and operation attempted.
    pub(crate) fn transport(zone: &str, operation: &str, err: &ClientError) -> Self {
        Self::Transport {
            zone: zone.to_string(),
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }

    /// Returns true if this error is transient and the caller may retry.
    ///
    /// Only transport failures qualify; a missing zone or an invalid
    /// declared set will not resolve itself.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The zone this error relates to, if any.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        match self {
            Self::ZoneNotFound { zone } | Self::Transport { zone, .. } => Some(zone),
            Self::DuplicateKind { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
