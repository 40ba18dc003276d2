// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot persistence for the file backend.
//!
//! A snapshot is the complete store state, JSON encoded and zstd
//! compressed. Saves go through a temp file that is fsynced and renamed
//! over the previous snapshot, followed by a directory fsync.

use crate::{StoreError, StoreState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// zstd level used for snapshots.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// A loaded snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub state: StoreState,
    /// When this snapshot was written
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    state: &'a StoreState,
    created_at: DateTime<Utc>,
}

/// Save `state` atomically and return the compressed size in bytes.
pub fn save_snapshot(path: &Path, state: &StoreState, level: i32) -> Result<u64, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json_bytes = serde_json::to_vec(&SnapshotRef {
        state,
        created_at: Utc::now(),
    })?;
    let compressed = zstd::encode_all(json_bytes.as_slice(), level)
        .map_err(|e| StoreError::Compress(e.to_string()))?;

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&compressed)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        File::open(parent)?.sync_all()?;
    }

    Ok(compressed.len() as u64)
}

/// Load a snapshot if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist or is corrupt. Corrupt
/// snapshots are moved to a `.bak` file so the store can start empty.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    match decode(path) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(e) => {
            let bak_path = rotate_bak_path(path);
            warn!(
                error = %e,
                path = %path.display(),
                bak = %bak_path.display(),
                "Corrupt snapshot, moving to .bak and starting fresh",
            );
            fs::rename(path, &bak_path)?;
            Ok(None)
        }
    }
}

fn decode(path: &Path) -> Result<Snapshot, StoreError> {
    let file = File::open(path)?;
    let decoder = zstd::stream::read::Decoder::new(BufReader::new(file))
        .map_err(|e| StoreError::Compress(e.to_string()))?;
    Ok(serde_json::from_reader(decoder)?)
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
