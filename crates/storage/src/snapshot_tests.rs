// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rmig_core::Versions;
use serde_json::json;
use std::io::Write;
use tempfile::tempdir;

fn create_test_state() -> StoreState {
    let mut state = StoreState::default();
    state.set_versions(&Versions::from([("Alias", 1)]), true);
    state
        .documents
        .insert("als_*out:cgrates.org:call:dan:dan:*rating".to_string(), json!({"values": []}));
    state
}

#[test]
fn test_snapshot_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.zst");

    let state = create_test_state();
    let size = save_snapshot(&path, &state, DEFAULT_COMPRESSION_LEVEL).unwrap();
    assert!(size > 0);

    let loaded = load_snapshot(&path).unwrap().unwrap();
    assert_eq!(loaded.state, state);
}

#[test]
fn test_load_nonexistent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nonexistent.zst");
    assert!(load_snapshot(&path).unwrap().is_none());
}

#[test]
fn test_snapshot_atomic_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.zst");
    let tmp_path = path.with_extension("tmp");

    save_snapshot(&path, &create_test_state(), DEFAULT_COMPRESSION_LEVEL).unwrap();

    assert!(!tmp_path.exists());
    assert!(path.exists());
}

#[test]
fn test_snapshot_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/data.zst");
    save_snapshot(&path, &StoreState::default(), DEFAULT_COMPRESSION_LEVEL).unwrap();
    assert!(path.exists());
}

#[test]
fn test_corrupt_snapshot_moves_to_bak() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.zst");
    {
        let mut file = File::create(&path).unwrap();
        file.write_all(b"not a zstd frame").unwrap();
    }

    assert!(load_snapshot(&path).unwrap().is_none());
    assert!(!path.exists());
    assert!(path.with_extension("bak").exists());
}

#[test]
fn test_bak_rotation_keeps_three() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.zst");

    for round in 0..4 {
        fs::write(&path, format!("garbage {round}")).unwrap();
        assert!(load_snapshot(&path).unwrap().is_none());
    }

    assert!(path.with_extension("bak").exists());
    assert!(path.with_extension("bak.2").exists());
    assert!(path.with_extension("bak.3").exists());
    assert!(!path.with_extension("bak.4").exists());
}
