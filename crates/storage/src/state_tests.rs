// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn filter(pairs: &[(&str, &str)]) -> RowFilter {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn tp_state() -> StoreState {
    let mut state = StoreState::default();
    state.set_rows(
        "tp_rates",
        vec![
            row(json!({"tpid": "TP1", "id": "RT_1", "rate": 0.1})),
            row(json!({"tpid": "TP1", "id": "RT_1", "rate": 0.2})),
            row(json!({"tpid": "TP1", "id": "RT_2", "rate": 0.3})),
            row(json!({"tpid": "TP2", "id": "RT_1", "rate": 0.4})),
        ],
    );
    state
}

#[test]
fn versions_absent_is_not_found() {
    let state = StoreState::default();
    assert!(state.get_versions(None).unwrap_err().is_not_found());
}

#[test]
fn versions_item_missing_is_empty() {
    let mut state = StoreState::default();
    state.set_versions(&Versions::from([("Accounts", 3)]), true);
    assert!(state.get_versions(Some("Alias")).unwrap().is_empty());
    assert_eq!(state.get_versions(Some("Accounts")).unwrap().get("Accounts"), Some(3));
}

#[test]
fn set_versions_merge_keeps_other_keys() {
    let mut state = StoreState::default();
    state.set_versions(&Versions::from([("Accounts", 1), ("Alias", 1)]), true);
    state.set_versions(&Versions::from([("Alias", 2)]), false);

    let stored = state.get_versions(None).unwrap();
    assert_eq!(stored, Versions::from([("Accounts", 1), ("Alias", 2)]));

    state.set_versions(&Versions::from([("Alias", 2)]), true);
    assert_eq!(state.get_versions(None).unwrap(), Versions::from([("Alias", 2)]));
}

#[test]
fn remove_versions_item_and_whole() {
    let mut state = StoreState::default();
    state.set_versions(&Versions::from([("Accounts", 1), ("Alias", 1)]), true);
    state.remove_versions(Some("Alias"));
    assert_eq!(state.get_versions(None).unwrap(), Versions::from([("Accounts", 1)]));
    state.remove_versions(None);
    assert!(state.versions.is_none());
}

#[test]
fn keys_with_prefix_is_sorted_and_bounded() {
    let mut state = StoreState::default();
    for key in ["als_b", "alp_x", "als_a", "am"] {
        state.documents.insert(key.to_string(), json!({}));
    }
    assert_eq!(state.keys_with_prefix("als_"), vec!["als_a", "als_b"]);
    assert!(state.keys_with_prefix("dcs_").is_empty());
}

#[test]
fn distinct_ids_groups_by_key_columns() {
    let state = tp_state();
    let ids = state.distinct_ids("tp_rates", &["tpid", "id"], &RowFilter::new());
    assert_eq!(
        ids,
        vec![
            vec!["TP1".to_string(), "RT_1".to_string()],
            vec!["TP1".to_string(), "RT_2".to_string()],
            vec!["TP2".to_string(), "RT_1".to_string()],
        ]
    );

    let only_tp2 = state.distinct_ids("tp_rates", &["tpid", "id"], &filter(&[("tpid", "TP2")]));
    assert_eq!(only_tp2.len(), 1);
}

#[test]
fn get_and_remove_rows_by_filter() {
    let mut state = tp_state();
    let sel = filter(&[("tpid", "TP1"), ("id", "RT_1")]);
    assert_eq!(state.get_rows("tp_rates", &sel).len(), 2);

    assert_eq!(state.remove_rows("tp_rates", &sel), 2);
    assert_eq!(state.get_rows("tp_rates", &RowFilter::new()).len(), 2);
    assert_eq!(state.remove_rows("missing", &sel), 0);
}

#[test]
fn removing_last_row_drops_table() {
    let mut state = tp_state();
    state.remove_rows("tp_rates", &RowFilter::new());
    assert!(state.tables.is_empty());
}

#[yare::parameterized(
    string = { json!("TP1"), "TP1" },
    number = { json!(42),    "42" },
    null   = { json!(null),  "" },
)]
fn column_text_forms(value: Value, expected: &str) {
    assert_eq!(column_text(&value), expected);
}
