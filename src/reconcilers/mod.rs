// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for zone metadata.
//!
//! The engine follows a declare-to-own model:
//!
//! 1. **Apply** - push the declared set to the authority as a per-kind
//!    full-replace write
//! 2. **Refresh** - read back only the kinds the caller declared
//! 3. **Destroy** - remove exactly the declared kinds, never anything else
//!
//! Kinds the caller never declared are invisible to refresh and untouchable
//! by destroy, so one caller's teardown can never damage metadata owned by
//! other tooling. Each operation is a single request/response round trip
//! with no retry, no rollback, and no state held between calls.

pub mod zone_metadata;

pub use zone_metadata::ZoneMetadataReconciler;
