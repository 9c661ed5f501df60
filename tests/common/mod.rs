// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared test helpers: an in-memory DNS authority.

use async_trait::async_trait;
use pdns_metadata::client::{ClientError, ZoneMetadataClient};
use pdns_metadata::metadata::ZoneMetadataEntry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for a PowerDNS authority server.
///
/// Holds per-zone metadata and mimics the authority's primitives: per-kind
/// full-replace on update, per-kind removal on delete, not-found when a zone
/// is unknown. Read calls are counted so tests can assert the existence
/// guard short-circuits.
#[derive(Default)]
pub struct InMemoryAuthority {
    zones: Mutex<HashMap<String, Vec<ZoneMetadataEntry>>>,
    get_calls: AtomicUsize,
}

impl InMemoryAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zone with pre-existing metadata, as if set by the authority
    /// itself or by unrelated tooling.
    pub fn with_zone(self, zone: &str, entries: Vec<ZoneMetadataEntry>) -> Self {
        self.zones.lock().unwrap().insert(zone.to_string(), entries);
        self
    }

    /// Snapshot of a zone's metadata, bypassing the client contract.
    pub fn metadata_of(&self, zone: &str) -> Vec<ZoneMetadataEntry> {
        self.zones.lock().unwrap().get(zone).cloned().unwrap_or_default()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneMetadataClient for InMemoryAuthority {
    async fn zone_exists(&self, zone: &str) -> Result<bool, ClientError> {
        Ok(self.zones.lock().unwrap().contains_key(zone))
    }

    async fn get_zone_metadata(&self, zone: &str) -> Result<Vec<ZoneMetadataEntry>, ClientError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.zones
            .lock()
            .unwrap()
            .get(zone)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                what: format!("zone '{zone}'"),
            })
    }

    async fn update_zone_metadata(
        &self,
        zone: &str,
        entries: &[ZoneMetadataEntry],
    ) -> Result<(), ClientError> {
        let mut zones = self.zones.lock().unwrap();
        let stored = zones.entry(zone.to_string()).or_default();

        // Per-kind full replace; untouched kinds stay as they are.
        for entry in entries {
            stored.retain(|existing| existing.kind != entry.kind);
            stored.push(entry.clone());
        }
        Ok(())
    }

    async fn delete_zone_metadata(
        &self,
        zone: &str,
        entries: &[ZoneMetadataEntry],
    ) -> Result<(), ClientError> {
        let mut zones = self.zones.lock().unwrap();
        let stored = zones.get_mut(zone).ok_or_else(|| ClientError::NotFound {
            what: format!("zone '{zone}'"),
        })?;

        for entry in entries {
            stored.retain(|existing| existing.kind != entry.kind);
        }
        Ok(())
    }
}

pub fn entry(kind: &str, values: &[&str]) -> ZoneMetadataEntry {
    ZoneMetadataEntry::new(kind, values.iter().map(ToString::to_string).collect())
}
