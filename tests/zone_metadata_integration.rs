// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests for the zone metadata reconciler.
//!
//! These drive the full apply / refresh / destroy / query lifecycle through
//! an in-memory authority, verifying the declare-to-own contract end to end.

mod common;

use common::{entry, InMemoryAuthority};
use pdns_metadata::errors::MetadataError;
use pdns_metadata::metadata::DeclaredSet;
use pdns_metadata::reconcilers::ZoneMetadataReconciler;

const ZONE: &str = "example.org.";

#[tokio::test]
async fn test_apply_then_refresh_round_trip() {
    let authority = InMemoryAuthority::new().with_zone(ZONE, vec![]);
    let reconciler = ZoneMetadataReconciler::new(authority);

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["INCEPTION-INCREMENT"])]).unwrap();
    let tracking_id = reconciler.apply(ZONE, &declared).await.unwrap();
    assert_eq!(tracking_id, ZONE);

    let owned = reconciler
        .refresh(ZONE, &["SOA-EDIT".to_string()])
        .await
        .unwrap();

    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].kind, "SOA-EDIT");
    assert!(owned[0].values_match(&["INCEPTION-INCREMENT".to_string()]));
}

#[tokio::test]
async fn test_apply_leaves_undeclared_kinds_untouched() {
    let authority = InMemoryAuthority::new().with_zone(
        ZONE,
        vec![
            entry("ALLOW-AXFR-FROM", &["AUTO-NS"]),
            entry("PRESIGNED", &["0"]),
        ],
    );
    let reconciler = ZoneMetadataReconciler::new(authority);

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["INCEPTION-INCREMENT"])]).unwrap();
    reconciler.apply(ZONE, &declared).await.unwrap();

    let all = reconciler.query(ZONE).await.unwrap();
    assert_eq!(all.len(), 3);

    let axfr = all.iter().find(|e| e.kind == "ALLOW-AXFR-FROM").unwrap();
    assert!(axfr.values_match(&["AUTO-NS".to_string()]));
    let presigned = all.iter().find(|e| e.kind == "PRESIGNED").unwrap();
    assert!(presigned.values_match(&["0".to_string()]));
}

#[tokio::test]
async fn test_apply_replaces_declared_kind_in_full() {
    let authority =
        InMemoryAuthority::new().with_zone(ZONE, vec![entry("SOA-EDIT", &["INCREMENT-WEEKS"])]);
    let reconciler = ZoneMetadataReconciler::new(authority);

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["INCEPTION-INCREMENT"])]).unwrap();
    reconciler.apply(ZONE, &declared).await.unwrap();

    let owned = reconciler
        .refresh(ZONE, &["SOA-EDIT".to_string()])
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert!(owned[0].values_match(&["INCEPTION-INCREMENT".to_string()]));
}

#[tokio::test]
async fn test_destroy_is_scoped_to_declared_kinds() {
    let authority = InMemoryAuthority::new().with_zone(
        ZONE,
        vec![
            entry("SOA-EDIT", &["INCEPTION-INCREMENT"]),
            entry("ALLOW-AXFR-FROM", &["AUTO-NS"]),
        ],
    );
    let reconciler = ZoneMetadataReconciler::new(authority);

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["INCEPTION-INCREMENT"])]).unwrap();
    reconciler.destroy(ZONE, &declared).await.unwrap();

    let remaining = reconciler.client().metadata_of(ZONE);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].kind, "ALLOW-AXFR-FROM");
}

#[tokio::test]
async fn test_destroy_twice_is_idempotent() {
    let authority =
        InMemoryAuthority::new().with_zone(ZONE, vec![entry("SOA-EDIT", &["NONE"])]);
    let reconciler = ZoneMetadataReconciler::new(authority);

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["NONE"])]).unwrap();
    reconciler.destroy(ZONE, &declared).await.unwrap();
    reconciler.destroy(ZONE, &declared).await.unwrap();

    assert!(reconciler.client().metadata_of(ZONE).is_empty());
}

#[tokio::test]
async fn test_destroy_on_missing_zone_is_already_absent() {
    let reconciler = ZoneMetadataReconciler::new(InMemoryAuthority::new());

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["NONE"])]).unwrap();
    assert!(reconciler.destroy("gone.example.", &declared).await.is_ok());
}

#[tokio::test]
async fn test_query_missing_zone_never_reads_metadata() {
    let reconciler = ZoneMetadataReconciler::new(InMemoryAuthority::new());

    let err = reconciler.query("nonexistent.example.").await.unwrap_err();
    assert!(matches!(err, MetadataError::ZoneNotFound { .. }));
    assert_eq!(reconciler.client().get_calls(), 0);
}

#[tokio::test]
async fn test_refresh_hides_kinds_added_by_other_actors() {
    let authority = InMemoryAuthority::new().with_zone(ZONE, vec![]);
    let reconciler = ZoneMetadataReconciler::new(authority);

    let declared = DeclaredSet::new(vec![entry("SOA-EDIT", &["NONE"])]).unwrap();
    reconciler.apply(ZONE, &declared).await.unwrap();

    // Another actor writes a kind this caller never declared.
    let other = DeclaredSet::new(vec![entry("NOTIFY-DNSUPDATE", &["1"])]).unwrap();
    reconciler.apply(ZONE, &other).await.unwrap();

    let owned = reconciler
        .refresh(ZONE, &["SOA-EDIT".to_string()])
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].kind, "SOA-EDIT");
}
