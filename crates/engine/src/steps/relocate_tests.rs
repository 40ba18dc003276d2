// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rmig_storage::{MemoryStore, RecordStore, Row};
use serde_json::json;

fn ctx<'a>(source: &'a MemoryStore, dest: &'a MemoryStore, dry_run: bool) -> StepContext<'a> {
    StepContext {
        source,
        dest,
        dry_run,
        same_store: false,
        default_tenant: "cgrates.org",
    }
}

fn cdr(cgrid: &str, run_id: &str, origin_id: &str, cost: f64) -> Row {
    json!({"cgrid": cgrid, "run_id": run_id, "origin_id": origin_id, "cost": cost})
        .as_object()
        .cloned()
        .unwrap()
}

#[test]
fn documents_move_under_every_prefix() {
    let source = MemoryStore::new();
    let dest = MemoryStore::new();
    source.set_document("thp_cgrates.org:TH1", json!({"id": "TH1"})).unwrap();
    source.set_document("thd_cgrates.org:TH1", json!({"hits": 3})).unwrap();
    source.set_document("acc_cgrates.org:1001", json!({})).unwrap();

    let mut moved = 0;
    relocate(Entity::Thresholds, &ctx(&source, &dest, false), &mut moved).unwrap();

    assert_eq!(moved, 2);
    assert_eq!(
        dest.get_document("thd_cgrates.org:TH1").unwrap(),
        Some(json!({"hits": 3}))
    );
    assert!(dest.get_document("thp_cgrates.org:TH1").unwrap().is_some());
    assert!(source.keys_with_prefix("th").unwrap().is_empty());
    // other entities stay put
    assert!(source.get_document("acc_cgrates.org:1001").unwrap().is_some());
}

#[test]
fn rows_move_per_natural_key() {
    let source = MemoryStore::new();
    let dest = MemoryStore::new();
    source
        .set_rows(
            "cdrs",
            vec![
                cdr("c1", "*default", "o1", 1.0),
                cdr("c1", "*default", "o1", 2.0),
                cdr("c2", "*default", "o2", 3.0),
            ],
        )
        .unwrap();

    let mut moved = 0;
    relocate(Entity::Cdrs, &ctx(&source, &dest, false), &mut moved).unwrap();

    assert_eq!(moved, 2);
    assert_eq!(dest.get_rows("cdrs", &RowFilter::new()).unwrap().len(), 3);
    assert!(source.get_rows("cdrs", &RowFilter::new()).unwrap().is_empty());
}

#[test]
fn dry_run_counts_without_writing() {
    let source = MemoryStore::new();
    let dest = MemoryStore::new();
    source.set_document("acc_cgrates.org:1001", json!({"balance": 10})).unwrap();
    source.set_rows("cdrs", vec![cdr("c1", "*default", "o1", 0.5)]).unwrap();

    let mut moved = 0;
    relocate(Entity::Accounts, &ctx(&source, &dest, true), &mut moved).unwrap();
    assert_eq!(moved, 1);

    let before = source.snapshot();
    relocate(Entity::Cdrs, &ctx(&source, &dest, true), &mut moved).unwrap();
    assert_eq!(moved, 2);

    assert_eq!(source.snapshot(), before);
    assert_eq!(dest.snapshot(), rmig_storage::StoreState::default());
}

#[test]
fn empty_source_moves_nothing() {
    let source = MemoryStore::new();
    let dest = MemoryStore::new();
    let mut moved = 0;
    relocate(Entity::TpFilters, &ctx(&source, &dest, false), &mut moved).unwrap();
    relocate(Entity::Attributes, &ctx(&source, &dest, false), &mut moved).unwrap();
    assert_eq!(moved, 0);
}
