// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone metadata reconciler.
//!
//! [`ZoneMetadataReconciler`] is the boundary the declarative configuration
//! engine drives. It owns an injected [`ZoneMetadataClient`] and exposes the
//! four operations of the metadata lifecycle:
//!
//! - [`query`] - discovery read of the full remote set, guarded by zone
//!   existence
//! - [`apply`] - upsert of the declared set, returning the zone name as the
//!   tracking handle
//! - [`refresh`] - read of the remote set projected onto declared kinds
//! - [`destroy`] - scoped removal of exactly the declared kinds
//!
//! The reconciler never diffs against a previous run; the configuration
//! engine always supplies the full current declared set. A kind dropped from
//! the declaration without an explicit destroy is orphaned on the authority:
//! never deleted, never visible in refresh. Detecting that is the
//! configuration engine's job, not this reconciler's.
//!
//! [`query`]: ZoneMetadataReconciler::query
//! [`apply`]: ZoneMetadataReconciler::apply
//! [`refresh`]: ZoneMetadataReconciler::refresh
//! [`destroy`]: ZoneMetadataReconciler::destroy

use crate::client::{ClientError, ZoneMetadataClient};
use crate::errors::MetadataError;
use crate::metadata::{DeclaredSet, ZoneMetadataEntry};
use crate::projection::project_metadata;
use std::collections::HashSet;
use tracing::{debug, error, info};

/// Reconciles declared zone metadata against a DNS authority.
///
/// Generic over the client so tests can drive it with in-memory fakes. The
/// reconciler holds no state besides the client; every call is independent.
///
/// # Example
///
/// ```rust,no_run
/// use pdns_metadata::metadata::{DeclaredSet, ZoneMetadataEntry};
/// use pdns_metadata::pdns::PowerDnsClient;
/// use pdns_metadata::reconcilers::ZoneMetadataReconciler;
///
/// # async fn example() -> Result<(), pdns_metadata::errors::MetadataError> {
/// let client = PowerDnsClient::new("http://127.0.0.1:8081", "localhost", "secret").unwrap();
/// let reconciler = ZoneMetadataReconciler::new(client);
///
/// let declared = DeclaredSet::new(vec![ZoneMetadataEntry::new(
///     "SOA-EDIT",
///     vec!["INCEPTION-INCREMENT".to_string()],
/// )])?;
///
/// let tracking_id = reconciler.apply("example.org.", &declared).await?;
/// assert_eq!(tracking_id, "example.org.");
/// # Ok(())
/// # }
/// ```
pub struct ZoneMetadataReconciler<C> {
    client: C,
}

impl<C: ZoneMetadataClient> ZoneMetadataReconciler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The injected client capability.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Verify the zone is known to the authority.
    ///
    /// Precondition for reads that surface metadata as a queryable object.
    /// The write paths skip this and let the transport's own error propagate.
    async fn ensure_zone_exists(&self, zone: &str) -> Result<(), MetadataError> {
        let exists = self
            .client
            .zone_exists(zone)
            .await
            .map_err(|e| MetadataError::transport(zone, "zone lookup", &e))?;

        if exists {
            Ok(())
        } else {
            Err(MetadataError::ZoneNotFound {
                zone: zone.to_string(),
            })
        }
    }

    /// Fetch the authority's full metadata set for a zone, unfiltered.
    ///
    /// Used for discovery; the existence guard runs first, so a missing zone
    /// surfaces as [`MetadataError::ZoneNotFound`] rather than a transport
    /// error from the metadata endpoint.
    ///
    /// # Errors
    ///
    /// [`MetadataError::ZoneNotFound`] if the authority does not know the
    /// zone; [`MetadataError::Transport`] on any client failure.
    pub async fn query(&self, zone: &str) -> Result<Vec<ZoneMetadataEntry>, MetadataError> {
        self.ensure_zone_exists(zone).await?;

        let remote = self
            .client
            .get_zone_metadata(zone)
            .await
            .map_err(|e| MetadataError::transport(zone, "metadata read", &e))?;

        debug!(%zone, count = remote.len(), "Retrieved metadata for zone");
        Ok(remote)
    }

    /// Push the declared set to the authority as an upsert.
    ///
    /// The declared entries are written verbatim through the client's
    /// per-kind full-replace primitive. Kinds absent from `declared` are
    /// left untouched on the remote side - omission never implies deletion;
    /// that only happens through [`destroy`](Self::destroy).
    ///
    /// Returns the zone name, which becomes the caller's tracking handle
    /// for subsequent refresh and destroy calls.
    ///
    /// # Errors
    ///
    /// [`MetadataError::Transport`] on any client failure, surfaced
    /// unchanged with no retry.
    pub async fn apply(&self, zone: &str, declared: &DeclaredSet) -> Result<String, MetadataError> {
        for entry in declared {
            debug!(%zone, kind = %entry.kind, values = ?entry.values, "Declaring metadata for zone");
        }

        self.client
            .update_zone_metadata(zone, declared.entries())
            .await
            .map_err(|e| {
                error!(%zone, error = %e, "Failed to update metadata for zone");
                MetadataError::transport(zone, "metadata update", &e)
            })?;

        info!(%zone, kinds = declared.len(), "Applied declared metadata to zone");
        Ok(zone.to_string())
    }

    /// Read back the remote metadata restricted to the declared kinds.
    ///
    /// Kinds the caller never declared are dropped silently (logged at debug
    /// level). Multiple remote entries sharing a kind all pass through,
    /// unmerged and in remote order. An empty `declared_kinds` yields an
    /// empty result, which is a valid terminal state.
    ///
    /// # Errors
    ///
    /// [`MetadataError::Transport`] on any client failure.
    pub async fn refresh(
        &self,
        zone: &str,
        declared_kinds: &[String],
    ) -> Result<Vec<ZoneMetadataEntry>, MetadataError> {
        debug!(%zone, "Reading metadata for zone");

        let remote = self
            .client
            .get_zone_metadata(zone)
            .await
            .map_err(|e| MetadataError::transport(zone, "metadata read", &e))?;

        let wanted: HashSet<String> = declared_kinds.iter().cloned().collect();
        Ok(project_metadata(&remote, &wanted))
    }

    /// Remove exactly the declared kinds from the zone.
    ///
    /// Deletion is scoped to the kinds the caller declared ownership of;
    /// kinds present on the authority but never declared are never touched,
    /// even implicitly. A not-found answer from the transport means the
    /// metadata is already absent and counts as success.
    ///
    /// # Errors
    ///
    /// [`MetadataError::Transport`] on any other client failure.
    pub async fn destroy(&self, zone: &str, declared: &DeclaredSet) -> Result<(), MetadataError> {
        debug!(%zone, kinds = declared.len(), "Deleting declared metadata for zone");

        match self
            .client
            .delete_zone_metadata(zone, declared.entries())
            .await
        {
            Ok(()) => {
                info!(%zone, "Deleted declared metadata from zone");
                Ok(())
            }
            Err(ClientError::NotFound { what }) => {
                debug!(%zone, %what, "Metadata already absent, nothing to delete");
                Ok(())
            }
            Err(e) => {
                error!(%zone, error = %e, "Failed to delete metadata for zone");
                Err(MetadataError::transport(zone, "metadata delete", &e))
            }
        }
    }
}

#[cfg(test)]
#[path = "zone_metadata_tests.rs"]
mod zone_metadata_tests;
