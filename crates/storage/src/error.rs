// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by record store backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record (or the whole version vector) does not exist.
    #[error("not found")]
    NotFound,
    /// The backend does not support the capability.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("compression error: {0}")]
    Compress(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
