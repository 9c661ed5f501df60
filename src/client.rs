// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone metadata client capability.
//!
//! The reconciliation engine depends on a single external capability: a
//! client that can check zone existence and read, write, and delete zone
//! metadata on the DNS authority. The engine holds the client as an explicit
//! value injected at construction - there is no ambient or global handle.
//!
//! [`crate::pdns::PowerDnsClient`] implements this trait against the
//! PowerDNS REST API; tests implement it with in-memory fakes.

use crate::metadata::ZoneMetadataEntry;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a [`ZoneMetadataClient`] implementation.
///
/// These are transport-side failures; the reconcilers wrap them into
/// [`crate::errors::MetadataError::Transport`] with the zone and operation
/// attempted. The one variant with engine-level meaning is [`NotFound`]:
/// the delete reconciler treats it as already-absent.
///
/// [`NotFound`]: ClientError::NotFound
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// The authority reported the target absent (HTTP 404).
    #[error("{what} not found on authority server")]
    NotFound {
        /// What was missing (zone or metadata kind)
        what: String,
    },

    /// The authority answered with a non-success status.
    #[error("authority API returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// The HTTP request could not be completed (connect, timeout, TLS).
    #[error("HTTP request failed: {reason}")]
    Http {
        /// Reason for the connection-level failure
        reason: String,
    },

    /// The authority answered 2xx but the payload could not be decoded.
    #[error("invalid authority response: {reason}")]
    InvalidResponse {
        /// What was wrong with the payload
        reason: String,
    },

    /// The client was configured with an unusable endpoint.
    #[error("invalid authority endpoint: {reason}")]
    InvalidEndpoint {
        /// What was wrong with the endpoint
        reason: String,
    },
}

/// Client capability for zone metadata operations on a DNS authority.
///
/// Each method is one synchronous request/response round trip; the client
/// owns timeouts and surfaces expiry as [`ClientError::Http`]. The engine
/// adds no retry or backoff of its own.
#[async_trait]
pub trait ZoneMetadataClient: Send + Sync {
    /// Check whether the authority knows the given zone.
    async fn zone_exists(&self, zone: &str) -> Result<bool, ClientError>;

    /// Fetch the authority's full metadata set for a zone.
    ///
    /// The result may contain kinds the caller never declared, and may
    /// contain multiple entries for one kind; the engine assumes neither
    /// uniqueness nor ordering.
    async fn get_zone_metadata(&self, zone: &str) -> Result<Vec<ZoneMetadataEntry>, ClientError>;

    /// Write the given entries, replacing each supplied kind in full.
    ///
    /// Kinds not present in `entries` must be left untouched.
    async fn update_zone_metadata(
        &self,
        zone: &str,
        entries: &[ZoneMetadataEntry],
    ) -> Result<(), ClientError>;

    /// Remove exactly the supplied kinds from the zone.
    ///
    /// Kinds not present in `entries` must be left untouched. An individual
    /// kind already absent is not an error for idempotent teardown; if the
    /// whole zone is absent, implementations should return
    /// [`ClientError::NotFound`].
    async fn delete_zone_metadata(
        &self,
        zone: &str,
        entries: &[ZoneMetadataEntry],
    ) -> Result<(), ClientError>;
}
