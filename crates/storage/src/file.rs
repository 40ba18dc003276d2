// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed key-value backend.
//!
//! The whole store is held in memory and written back as a compressed
//! snapshot after every mutation. Reads never touch the disk.

use crate::snapshot::{load_snapshot, save_snapshot, DEFAULT_COMPRESSION_LEVEL};
use crate::store::{RecordStore, Row, RowFilter};
use crate::{StoreError, StoreState};
use parking_lot::Mutex;
use rmig_core::Versions;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    compression_level: i32,
    state: Arc<Mutex<StoreState>>,
}

impl FileStore {
    /// Open the store at `path`, starting empty when the file is missing
    /// or corrupt.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = load_snapshot(&path)?
            .map(|snapshot| snapshot.state)
            .unwrap_or_default();
        debug!(
            path = %path.display(),
            documents = state.documents.len(),
            tables = state.tables.len(),
            "opened file store",
        );
        Ok(Self {
            path,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Set the zstd compression level (1-22, default 3).
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to the state and persist the result.
    fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> Result<T, StoreError> {
        let mut state = self.state.lock();
        let out = f(&mut state);
        let size = save_snapshot(&self.path, &state, self.compression_level)?;
        debug!(path = %self.path.display(), size_bytes = size, "persisted file store");
        Ok(out)
    }
}

impl RecordStore for FileStore {
    fn kind(&self) -> &'static str {
        "file"
    }

    fn state_id(&self) -> usize {
        Arc::as_ptr(&self.state) as usize
    }

    fn get_versions(&self, item: Option<&str>) -> Result<Versions, StoreError> {
        self.state.lock().get_versions(item)
    }

    fn set_versions(&self, versions: &Versions, overwrite: bool) -> Result<(), StoreError> {
        self.mutate(|s| s.set_versions(versions, overwrite))
    }

    fn remove_versions(&self, item: Option<&str>) -> Result<(), StoreError> {
        self.mutate(|s| s.remove_versions(item))
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.state.lock().keys_with_prefix(prefix))
    }

    fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.state.lock().documents.get(key).cloned())
    }

    fn set_document(&self, key: &str, document: Value) -> Result<(), StoreError> {
        self.mutate(|s| {
            s.documents.insert(key.to_string(), document);
        })
    }

    fn remove_document(&self, key: &str) -> Result<(), StoreError> {
        if !self.state.lock().documents.contains_key(key) {
            return Ok(());
        }
        self.mutate(|s| {
            s.documents.remove(key);
        })
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
        self.mutate(|s| s.set_rows(table, rows))
    }

    fn remove_rows(&self, table: &str, filter: &RowFilter) -> Result<usize, StoreError> {
        self.mutate(|s| s.remove_rows(table, filter))
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.mutate(StoreState::clear)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
