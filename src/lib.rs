// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # pdns-metadata - PowerDNS Zone Metadata Reconciliation
//!
//! This library reconciles a declared set of DNS zone metadata entries
//! against the authoritative metadata held by a PowerDNS server, on behalf
//! of a declarative infrastructure-management tool.
//!
//! ## Overview
//!
//! A caller declares the metadata kinds it owns for a zone; the engine
//! writes them, reads back only what was declared, and on teardown removes
//! only what was declared. Metadata kinds the caller never declared -
//! authority defaults, entries managed by other tooling, manual
//! configuration - are never read into the caller's view and never deleted.
//!
//! ## Modules
//!
//! - [`metadata`] - Data model: metadata entries and validated declared sets
//! - [`projection`] - Filtering remote metadata onto declared kinds
//! - [`reconcilers`] - Apply / refresh / destroy / query operations
//! - [`client`] - The zone metadata client capability trait
//! - [`pdns`] - PowerDNS REST API client implementing the capability
//! - [`errors`] - Error taxonomy surfaced to the configuration engine
//!
//! ## Example
//!
//! ```rust,no_run
//! use pdns_metadata::metadata::{DeclaredSet, ZoneMetadataEntry};
//! use pdns_metadata::pdns::PowerDnsClient;
//! use pdns_metadata::reconcilers::ZoneMetadataReconciler;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PowerDnsClient::new("http://127.0.0.1:8081", "localhost", "secret")?;
//! let reconciler = ZoneMetadataReconciler::new(client);
//!
//! let declared = DeclaredSet::new(vec![ZoneMetadataEntry::new(
//!     "SOA-EDIT",
//!     vec!["INCEPTION-INCREMENT".to_string()],
//! )])?;
//!
//! reconciler.apply("example.org.", &declared).await?;
//! let owned = reconciler
//!     .refresh("example.org.", &["SOA-EDIT".to_string()])
//!     .await?;
//! assert_eq!(owned.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod metadata;
pub mod pdns;
pub mod projection;
pub mod reconcilers;
