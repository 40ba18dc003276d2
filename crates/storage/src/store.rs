// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The capability surface every backend implements.
//!
//! A store exposes two shapes of data. Documents are JSON values addressed
//! by a prefixed key (`alp_cgrates.org:ATTR_1`). Rows live in named tables
//! and are addressed by column equality, the way a relational backend
//! would select them. Each store also holds one version vector.

use crate::StoreError;
use rmig_core::Versions;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One row of a table.
pub type Row = Map<String, Value>;

/// Column → required value. An empty filter selects every row.
pub type RowFilter = BTreeMap<String, String>;

/// Text form of a column value used for equality matching.
pub fn column_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// True when every filter column of `row` holds the required value.
pub fn row_matches(row: &Row, filter: &RowFilter) -> bool {
    filter.iter().all(|(column, want)| {
        row.get(column)
            .map(|v| column_text(v) == *want)
            .unwrap_or(want.is_empty())
    })
}

/// True when both handles reach one physical store.
pub fn same_store(a: &dyn RecordStore, b: &dyn RecordStore) -> bool {
    a.state_id() == b.state_id()
}

pub trait RecordStore: Send + Sync {
    /// Short backend name for logs.
    fn kind(&self) -> &'static str;

    /// Address of the backing state, equal for every handle on one store.
    fn state_id(&self) -> usize;

    /// Read the version vector, or only `item` when given.
    ///
    /// Fails with [`StoreError::NotFound`] when the store holds no vector at
    /// all. A vector lacking `item` yields an empty result.
    fn get_versions(&self, item: Option<&str>) -> Result<Versions, StoreError>;

    /// Write `versions`. With `overwrite` the stored vector is replaced,
    /// otherwise the given keys are merged into it.
    fn set_versions(&self, versions: &Versions, overwrite: bool) -> Result<(), StoreError>;

    /// Remove one key, or the whole vector when `item` is `None`.
    fn remove_versions(&self, item: Option<&str>) -> Result<(), StoreError>;

    /// Document keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn set_document(&self, key: &str, document: Value) -> Result<(), StoreError>;

    /// Removing an absent document is not an error.
    fn remove_document(&self, key: &str) -> Result<(), StoreError>;

    /// Distinct values of `key_columns` over the rows matching `filter`, in
    /// first-seen order. Each entry holds one value per key column.
    fn distinct_ids(
        &self,
        table: &str,
        key_columns: &[&str],
        filter: &RowFilter,
    ) -> Result<Vec<Vec<String>>, StoreError>;

    fn get_rows(&self, table: &str, filter: &RowFilter) -> Result<Vec<Row>, StoreError>;

    /// Append rows to `table`, creating it when needed.
    fn set_rows(&self, table: &str, rows: Vec<Row>) -> Result<(), StoreError>;

    /// Delete the rows matching `filter` and return how many went.
    fn remove_rows(&self, table: &str, filter: &RowFilter) -> Result<usize, StoreError>;

    /// Rename a table. Only relational backends support this.
    fn rename_table(&self, _from: &str, _to: &str) -> Result<(), StoreError> {
        Err(StoreError::NotImplemented("rename_table"))
    }

    /// Drop every record and the version vector.
    fn flush(&self) -> Result<(), StoreError>;
}

/// Typed access to documents over serde.
pub trait RecordStoreExt: RecordStore {
    fn get_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_document(key)? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    fn set_record<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        self.set_document(key, serde_json::to_value(record)?)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
