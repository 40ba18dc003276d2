// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn render_to_string(table: &Table) -> String {
    let mut buf = Vec::new();
    table.render(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn empty_table_prints_nothing() {
    let table = Table::plain(vec![Column::left("ENTITY"), Column::right("MOVED")]);
    assert!(table.is_empty());
    assert_eq!(render_to_string(&table), "");
}

#[test]
fn right_aligned_counts() {
    let mut table = Table::plain(vec![Column::left("ENTITY"), Column::right("MOVED")]);
    table.row(vec!["Alias".into(), "2".into()]);
    table.row(vec!["DerivedChargers".into(), "120".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ENTITY           MOVED");
    assert_eq!(lines[1], "Alias                2");
    assert_eq!(lines[2], "DerivedChargers    120");
}

#[test]
fn last_left_column_is_not_padded() {
    let mut table = Table::plain(vec![Column::left("KEY"), Column::status("STATUS")]);
    table.row(vec!["RQF".into(), "stale (v2)".into()]);
    table.row(vec!["Alias".into(), "current".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "KEY    STATUS");
    assert_eq!(lines[1], "RQF    stale (v2)");
    assert_eq!(lines[2], "Alias  current");
}

#[test]
fn missing_cells_render_empty() {
    let mut table = Table::plain(vec![Column::left("A"), Column::muted("B")]);
    table.row(vec!["x".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("x  "));
}
