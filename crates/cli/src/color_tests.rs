// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    current = { "current", "\x1b[32m" },
    stale = { "stale (v2)", "\x1b[33m" },
    missing = { "missing", "\x1b[31m" },
    newer = { "newer (v9)", "\x1b[31m" },
)]
fn status_words_are_colored(text: &str, code: &str) {
    let out = apply_status(text);
    assert!(out.starts_with(code), "{out:?}");
    assert!(out.contains(text));
    assert!(out.ends_with(RESET));
}

#[test]
fn unknown_status_is_left_alone() {
    assert_eq!(apply_status("whatever"), "whatever");
}

#[test]
fn header_uses_header_code() {
    assert_eq!(apply_header("ENTITY"), "\x1b[38;5;74mENTITY\x1b[0m");
    assert_eq!(apply_muted("-"), "\x1b[38;5;240m-\x1b[0m");
}
