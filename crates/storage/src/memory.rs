// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory backend.

use crate::store::{RecordStore, Row, RowFilter};
use crate::{StoreError, StoreState};
use parking_lot::Mutex;
use rmig_core::Versions;
use serde_json::Value;
use std::sync::Arc;

/// A store living only in process memory.
///
/// Clones share the same physical store, which is how a single store is
/// handed out as both migration source and destination.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> StoreState {
        self.state.lock().clone()
    }
}

impl RecordStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn state_id(&self) -> usize {
        Arc::as_ptr(&self.state) as usize
    }

    fn get_versions(&self, item: Option<&str>) -> Result<Versions, StoreError> {
        self.state.lock().get_versions(item)
    }

    fn set_versions(&self, versions: &Versions, overwrite: bool) -> Result<(), StoreError> {
        self.state.lock().set_versions(versions, overwrite);
        Ok(())
    }

    fn remove_versions(&self, item: Option<&str>) -> Result<(), StoreError> {
        self.state.lock().remove_versions(item);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.state.lock().keys_with_prefix(prefix))
    }

    fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.state.lock().documents.get(key).cloned())
    }

    fn set_document(&self, key: &str, document: Value) -> Result<(), StoreError> {
        self.state.lock().documents.insert(key.to_string(), document);
        Ok(())
    }

    fn remove_document(&self, key: &str) -> Result<(), StoreError> {
        self.state.lock().documents.remove(key);
        Ok(())
    }

    fn distinct_ids(
        &self,
        table: &str,
        key_columns: &[&str],
        filter: &RowFilter,
    ) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.state.lock().distinct_ids(table, key_columns, filter))
    }

    fn get_rows(&self, table: &str, filter: &RowFilter) -> Result<Vec<Row>, StoreError> {
        Ok(self.state.lock().get_rows(table, filter))
    }

    fn set_rows(&self, table: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        self.state.lock().set_rows(table, rows);
        Ok(())
    }

    fn remove_rows(&self, table: &str, filter: &RowFilter) -> Result<usize, StoreError> {
        Ok(self.state.lock().remove_rows(table, filter))
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.state.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
