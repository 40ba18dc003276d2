// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn catalogue_is_indexed_by_discriminant() {
    for (i, def) in CATALOGUE.iter().enumerate() {
        assert_eq!(def.entity as usize, i, "{} out of order", def.key);
    }
}

#[test]
fn task_and_version_keys_are_unique() {
    let mut tasks: Vec<_> = Entity::all().map(Entity::task_name).collect();
    let mut keys: Vec<_> = Entity::all().map(Entity::version_key).collect();
    let total = tasks.len();
    tasks.sort_unstable();
    tasks.dedup();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(tasks.len(), total);
    assert_eq!(keys.len(), total);
}

#[yare::parameterized(
    cdrs          = { "CDRs",          StoreFamily::Stor },
    session_costs = { "SessionSCosts", StoreFamily::Stor },
    tp_rates      = { "TpRates",       StoreFamily::Stor },
    tp_unknown    = { "TpWhatever",    StoreFamily::Stor },
    accounts      = { "Accounts",      StoreFamily::Data },
    alias         = { "Alias",         StoreFamily::Data },
    filters       = { "RQF",           StoreFamily::Data },
)]
fn family_of_key(key: &str, family: StoreFamily) {
    assert_eq!(StoreFamily::of_key(key), family);
}

#[test]
fn task_name_lookup() {
    assert_eq!(Entity::from_task_name("*aliases"), Some(Entity::Aliases));
    assert_eq!(
        Entity::from_task_name("*derived_chargers"),
        Some(Entity::DerivedChargers)
    );
    assert_eq!(Entity::from_task_name("*tp_rates"), Some(Entity::TpRates));
    assert_eq!(Entity::from_task_name("*nope"), None);
}

#[test]
fn every_stor_entity_has_row_layout() {
    for entity in Entity::all() {
        match (entity.family(), entity.layout()) {
            (StoreFamily::Stor, Layout::Rows { key_columns, .. }) => {
                assert!(!key_columns.is_empty(), "{entity} has no key columns")
            }
            (StoreFamily::Data, Layout::Documents(prefixes)) => {
                assert!(!prefixes.is_empty(), "{entity} has no prefixes")
            }
            (family, layout) => panic!("{entity}: {family} with {layout:?}"),
        }
    }
}

#[test]
fn entity_serializes_as_version_key() {
    let json = serde_json::to_string(&Entity::DerivedChargers).unwrap();
    assert_eq!(json, "\"DerivedChargers\"");
}
