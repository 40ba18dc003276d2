// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Record store backends for the rating data migrator

mod error;
mod file;
mod memory;
mod snapshot;
mod state;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use snapshot::{load_snapshot, save_snapshot, Snapshot, DEFAULT_COMPRESSION_LEVEL};
pub use state::StoreState;
pub use store::{
    column_text, row_matches, same_store, RecordStore, RecordStoreExt, Row, RowFilter,
};
