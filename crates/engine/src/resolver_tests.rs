// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rmig_storage::MemoryStore;

fn store_with(versions: Versions) -> MemoryStore {
    let store = MemoryStore::new();
    store.set_versions(&versions, true).unwrap();
    store
}

#[test]
fn resolve_reads_stored_version() {
    let store = store_with(Versions::from([("Alias", 1)]));
    assert_eq!(resolve(&store, Entity::Aliases).unwrap(), 1);
}

#[test]
fn resolve_without_vector_is_versions_not_defined() {
    let store = MemoryStore::new();
    let err = resolve(&store, Entity::Cdrs).unwrap_err();
    assert!(matches!(err, MigrateError::VersionsNotDefined(StoreFamily::Stor)), "{err}");
}

#[test]
fn resolve_missing_key_is_version_undefined() {
    let store = store_with(Versions::from([("Accounts", 3)]));
    let err = resolve(&store, Entity::Aliases).unwrap_err();
    assert!(matches!(err, MigrateError::VersionUndefined(Entity::Aliases)));
    assert_eq!(err.to_string(), "version for <Alias> is not defined");
}

#[yare::parameterized(
    current = { Entity::Filters, 5, Some(VersionStatus::Current) },
    stale   = { Entity::Filters, 2, Some(VersionStatus::Stale { from: 2 }) },
    too_new = { Entity::Filters, 6, None },
)]
fn status_compares_with_current(entity: Entity, stored: u64, expected: Option<VersionStatus>) {
    match (status(entity, stored), expected) {
        (Ok(got), Some(want)) => assert_eq!(got, want),
        (Err(MigrateError::VersionTooNew { stored: s, current, .. }), None) => {
            assert_eq!((s, current), (6, 5));
        }
        (got, want) => panic!("got {got:?}, want {want:?}"),
    }
}

#[test]
fn advance_merges_only_one_key() {
    let store = store_with(Versions::from([("Accounts", 1), ("Alias", 1)]));
    advance(&store, Entity::Aliases).unwrap();
    assert_eq!(
        store.get_versions(None).unwrap(),
        Versions::from([("Accounts", 1), ("Alias", 2)])
    );
}

#[test]
fn advance_creates_vector_when_absent() {
    let store = MemoryStore::new();
    advance(&store, Entity::DerivedChargers).unwrap();
    assert_eq!(
        store.get_versions(None).unwrap(),
        Versions::from([("DerivedChargers", 2)])
    );
}

#[test]
fn set_current_replaces_family_vector() {
    let store = store_with(Versions::from([("Legacy", 9)]));
    set_current(&store, StoreFamily::Stor).unwrap();
    let stored = store.get_versions(None).unwrap();
    assert_eq!(stored, Versions::current(StoreFamily::Stor));
    assert!(!stored.contains("Legacy"));
}

#[test]
fn check_versions_passes_when_current() {
    let store = store_with(Versions::current(StoreFamily::Data));
    check_versions(&store, StoreFamily::Data).unwrap();
}

#[test]
fn check_versions_reports_first_stale_entity() {
    let mut versions = Versions::current(StoreFamily::Data);
    versions.set("Alias", 1);
    versions.set("DerivedChargers", 1);
    let store = store_with(versions);

    let err = check_versions(&store, StoreFamily::Data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Migration needed: please backup data and run : <rmig migrate *aliases>"
    );
}

#[test]
fn check_versions_missing_key_needs_migration() {
    let mut versions = Versions::current(StoreFamily::Stor);
    versions.remove("CDRs");
    let store = store_with(versions);
    let err = check_versions(&store, StoreFamily::Stor).unwrap_err();
    assert!(matches!(err, MigrateError::MigrationNeeded { task: "*cdrs" }));
}

#[test]
fn check_versions_without_vector() {
    let err = check_versions(&MemoryStore::new(), StoreFamily::Data).unwrap_err();
    assert!(matches!(err, MigrateError::VersionsNotDefined(StoreFamily::Data)));
}
