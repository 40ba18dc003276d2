// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

/// Config file used when neither `--config` nor `RMIG_CONFIG` is given.
pub const DEFAULT_CONFIG_FILE: &str = "rmig.toml";

// --- Config ---

pub fn config_path() -> Option<PathBuf> {
    std::env::var("RMIG_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Logging ---

/// Whether `RUST_LOG` is set, in which case it wins over `-v`.
pub fn rust_log_set() -> bool {
    std::env::var("RUST_LOG").is_ok_and(|v| !v.is_empty())
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
