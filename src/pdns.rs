// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! PowerDNS REST API client for zone metadata.
//!
//! This module implements [`ZoneMetadataClient`] against the PowerDNS
//! authority HTTP API (`/api/v1/servers/{server}/zones/{zone}/metadata`).
//! It covers exactly the four operations the reconciliation engine needs:
//!
//! - Zone existence lookup
//! - Full metadata read
//! - Per-kind full-replace write (`PUT .../metadata/{kind}`)
//! - Per-kind delete (`DELETE .../metadata/{kind}`)
//!
//! Requests authenticate with the authority's `X-API-Key` header. The key is
//! supplied by the caller at construction; how it is stored or rotated is
//! not this client's concern.
//!
//! # Example
//!
//! ```rust,no_run
//! use pdns_metadata::pdns::PowerDnsClient;
//!
//! let client = PowerDnsClient::new(
//!     "http://pdns.example.internal:8081",
//!     "localhost",
//!     "supersecret",
//! ).unwrap();
//! ```

use crate::client::{ClientError, ZoneMetadataClient};
use crate::metadata::ZoneMetadataEntry;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// Header carrying the PowerDNS API key.
const API_KEY_HEADER: &str = "X-API-Key";

/// Wire shape of one metadata item in the PowerDNS API.
///
/// The authority calls the value list `metadata`; the domain model calls it
/// `values`. The conversion lives here so the rest of the engine never sees
/// the wire names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiZoneMetadata {
    kind: String,
    metadata: Vec<String>,
}

impl From<&ZoneMetadataEntry> for ApiZoneMetadata {
    fn from(entry: &ZoneMetadataEntry) -> Self {
        Self {
            kind: entry.kind.clone(),
            metadata: entry.values.clone(),
        }
    }
}

impl From<ApiZoneMetadata> for ZoneMetadataEntry {
    fn from(api: ApiZoneMetadata) -> Self {
        Self {
            kind: api.kind,
            values: api.metadata,
        }
    }
}

/// HTTP client for the PowerDNS authority API.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct PowerDnsClient {
    http: reqwest::Client,
    base_url: Url,
    server_id: String,
    api_key: String,
}

impl PowerDnsClient {
    /// Create a client for the authority at `base_url`.
    ///
    /// `server_id` is the authority's server name in the API path (usually
    /// `localhost`); `api_key` is sent as `X-API-Key` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if `base_url` does not parse
    /// as an HTTP(S) URL.
    pub fn new(base_url: &str, server_id: &str, api_key: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidEndpoint {
            reason: format!("'{base_url}': {e}"),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint {
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            server_id: server_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build an API URL from path segments, percent-encoding each segment.
    ///
    /// Zone names end with a dot, which must survive as a path segment
    /// rather than being collapsed by URL joining.
    fn api_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidEndpoint {
                    reason: "endpoint cannot be a base URL".to_string(),
                })?;
            path.pop_if_empty();
            path.extend(["api", "v1", "servers", self.server_id.as_str()]);
            path.extend(segments);
        }
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                reason: e.to_string(),
            })
    }

    /// Map a non-success response to a [`ClientError`], consuming the body
    /// for the error message.
    async fn api_error(what: &str, response: Response) -> ClientError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound {
                what: what.to_string(),
            };
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ZoneMetadataClient for PowerDnsClient {
    async fn zone_exists(&self, zone: &str) -> Result<bool, ClientError> {
        let url = self.api_url(&["zones", zone])?;
        debug!(%zone, "Checking zone existence");

        let response = self.send(self.http.get(url)).await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::api_error(&format!("zone '{zone}'"), response).await),
        }
    }

    async fn get_zone_metadata(&self, zone: &str) -> Result<Vec<ZoneMetadataEntry>, ClientError> {
        let url = self.api_url(&["zones", zone, "metadata"])?;
        debug!(%zone, "Fetching zone metadata");

        let response = self.send(self.http.get(url)).await?;
        if !response.status().is_success() {
            return Err(Self::api_error(&format!("zone '{zone}'"), response).await);
        }

        let items: Vec<ApiZoneMetadata> =
            response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        Ok(items.into_iter().map(ZoneMetadataEntry::from).collect())
    }

    async fn update_zone_metadata(
        &self,
        zone: &str,
        entries: &[ZoneMetadataEntry],
    ) -> Result<(), ClientError> {
        // The authority's write primitive is a per-kind full replace. One
        // PUT per declared entry; kinds not mentioned are untouched.
        for entry in entries {
            let url = self.api_url(&["zones", zone, "metadata", &entry.kind])?;
            debug!(%zone, kind = %entry.kind, values = ?entry.values, "Updating zone metadata");

            let body = ApiZoneMetadata::from(entry);
            let response = self.send(self.http.put(url).json(&body)).await?;
            if !response.status().is_success() {
                return Err(Self::api_error(
                    &format!("metadata kind '{}' for zone '{zone}'", entry.kind),
                    response,
                )
                .await);
            }
        }
        Ok(())
    }

    async fn delete_zone_metadata(
        &self,
        zone: &str,
        entries: &[ZoneMetadataEntry],
    ) -> Result<(), ClientError> {
        for entry in entries {
            let url = self.api_url(&["zones", zone, "metadata", &entry.kind])?;
            debug!(%zone, kind = %entry.kind, "Deleting zone metadata");

            let response = self.send(self.http.delete(url)).await?;
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                // Already absent; idempotent teardown keeps going.
                warn!(%zone, kind = %entry.kind, "Metadata kind already absent, skipping");
                continue;
            }
            if !status.is_success() {
                return Err(Self::api_error(
                    &format!("metadata kind '{}' for zone '{zone}'", entry.kind),
                    response,
                )
                .await);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "pdns_tests.rs"]
mod pdns_tests;
