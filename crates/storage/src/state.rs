// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process record state shared by the memory and file backends

use crate::store::{column_text, row_matches, Row, RowFilter};
use crate::StoreError;
use rmig_core::Versions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub versions: Option<Versions>,
    #[serde(default)]
    pub documents: BTreeMap<String, Value>,
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<Row>>,
}

impl StoreState {
    pub fn get_versions(&self, item: Option<&str>) -> Result<Versions, StoreError> {
        let versions = self.versions.as_ref().ok_or(StoreError::NotFound)?;
        Ok(match item {
            Some(key) => versions
                .get(key)
                .map(|v| Versions::from([(key, v)]))
                .unwrap_or_default(),
            None => versions.clone(),
        })
    }

    pub fn set_versions(&mut self, versions: &Versions, overwrite: bool) {
        match &mut self.versions {
            Some(stored) if !overwrite => stored.merge(versions),
            slot => *slot = Some(versions.clone()),
        }
    }

    pub fn remove_versions(&mut self, item: Option<&str>) {
        match (item, &mut self.versions) {
            (None, slot) => *slot = None,
            (Some(key), Some(stored)) => {
                stored.remove(key);
            }
            (Some(_), None) => {}
        }
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.documents
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn distinct_ids(
        &self,
        table: &str,
        key_columns: &[&str],
        filter: &RowFilter,
    ) -> Vec<Vec<String>> {
        let mut ids: Vec<Vec<String>> = Vec::new();
        for row in self.rows(table).filter(|r| row_matches(r, filter)) {
            let id: Vec<String> = key_columns
                .iter()
                .map(|c| row.get(*c).map(column_text).unwrap_or_default())
                .collect();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn get_rows(&self, table: &str, filter: &RowFilter) -> Vec<Row> {
        self.rows(table)
            .filter(|r| row_matches(r, filter))
            .cloned()
            .collect()
    }

    pub fn set_rows(&mut self, table: &str, rows: Vec<Row>) {
        self.tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub fn remove_rows(&mut self, table: &str, filter: &RowFilter) -> usize {
        let Some(rows) = self.tables.get_mut(table) else {
            return 0;
        };
        let before = rows.len();
        rows.retain(|r| !row_matches(r, filter));
        let removed = before - rows.len();
        if rows.is_empty() {
            self.tables.remove(table);
        }
        removed
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn rows(&self, table: &str) -> impl Iterator<Item = &Row> {
        self.tables.get(table).into_iter().flatten()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
