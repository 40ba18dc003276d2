// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specifications for the rmig CLI.
//!
//! These tests are black-box: they invoke the binary against file stores in
//! a temp directory and verify stdout, stderr, exit codes and store contents.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rmig_core::Versions;
use rmig_storage::{FileStore, RecordStore};
use serde_json::json;
use tempfile::TempDir;

const SEPARATE_STORES: &str = r#"
[data_db_in]
kind = "file"
path = "data-old.db"

[data_db_out]
kind = "file"
path = "data-new.db"

[stor_db_in]
kind = "file"
path = "stor.db"
"#;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new(config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rmig.toml"), config).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn store(&self, name: &str) -> FileStore {
        FileStore::open(self.path(name)).unwrap()
    }

    fn rmig(&self) -> Command {
        let mut cmd = Command::cargo_bin("rmig").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("RMIG_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn seed_alias(&self) {
        let store = self.store("data-old.db");
        store
            .set_versions(&Versions::from([("Alias", 1)]), true)
            .unwrap();
        store
            .set_document(
                "als_*out:cgrates.org:call:1001:1001:*rating",
                json!({
                    "direction": "*out",
                    "tenant": "cgrates.org",
                    "category": "call",
                    "account": "1001",
                    "subject": "1001",
                    "context": "*rating",
                    "values": [{
                        "destination_id": "*any",
                        "pairs": {"Account": {"1001": "1002"}},
                        "weight": 20.0
                    }]
                }),
            )
            .unwrap();
    }
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn file_bytes(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

#[test]
fn no_subcommand_prints_help() {
    let project = Project::new("");
    let output = project.rmig().assert().success().get_output().clone();
    assert!(stdout_of(&output).contains("Usage: rmig"));
}

#[test]
fn unsupported_task_fails_without_touching_stores() {
    let project = Project::new(SEPARATE_STORES);
    project.seed_alias();
    let before = file_bytes(&project.path("data-old.db"));

    let output = project
        .rmig()
        .args(["migrate", "*aliases", "*bogus"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();

    assert!(stderr_of(&output).contains("Error: unsupported task <*bogus>"));
    assert_eq!(file_bytes(&project.path("data-old.db")), before);
    assert!(!project.path("data-new.db").exists());
}

#[test]
fn migrate_aliases_between_file_stores() {
    let project = Project::new(SEPARATE_STORES);
    project.seed_alias();

    let output = project
        .rmig()
        .args(["migrate", "*aliases"])
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(stdout_of(&output).contains("1 record(s) moved"));

    let out = project.store("data-new.db");
    let keys = out.keys_with_prefix("alp_").unwrap();
    assert_eq!(keys.len(), 1);
    let profile = out.get_document(&keys[0]).unwrap().unwrap();
    assert_eq!(profile["attributes"][0]["path"], "*req.Account");
    assert_eq!(
        out.get_versions(Some("Alias")).unwrap().get("Alias"),
        Some(2)
    );
    assert!(project
        .store("data-old.db")
        .keys_with_prefix("als_")
        .unwrap()
        .is_empty());
}

#[test]
fn dry_run_reports_json_and_writes_nothing() {
    let project = Project::new(SEPARATE_STORES);
    project.seed_alias();
    let before = file_bytes(&project.path("data-old.db"));

    let output = project
        .rmig()
        .args(["migrate", "*aliases", "--dry-run", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .clone();

    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["moved"]["Alias"], 1);
    assert_eq!(file_bytes(&project.path("data-old.db")), before);
    assert!(!project.path("data-new.db").exists());
}

#[test]
fn failure_prints_partial_report_and_error() {
    let project = Project::new(SEPARATE_STORES);
    project.seed_alias();

    let output = project
        .rmig()
        .args(["migrate", "*aliases", "*cdrs"])
        .assert()
        .failure()
        .get_output()
        .clone();

    assert!(stdout_of(&output).contains("1 record(s) moved, stopped on error"));
    assert!(stderr_of(&output).contains("version number is not defined in stor_db"));
}

#[test]
fn check_reports_needed_migration() {
    let project = Project::new(SEPARATE_STORES);
    project.seed_alias();

    let output = project
        .rmig()
        .arg("check")
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(stderr_of(&output).contains("Migration needed: please backup data and run"));
}

#[test]
fn set_versions_then_check_passes_in_place() {
    let project = Project::new(
        r#"
[data_db_in]
kind = "file"
path = "data.db"

[stor_db_in]
kind = "file"
path = "stor.db"
"#,
    );

    project.rmig().args(["migrate", "*set_versions"]).assert().success();
    project.rmig().arg("check").assert().success();
}

#[test]
fn versions_lists_both_families() {
    let project = Project::new(SEPARATE_STORES);
    project.seed_alias();

    let output = project
        .rmig()
        .args(["versions", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .clone();

    let rows: Vec<serde_json::Value> = serde_json::from_str(&stdout_of(&output)).unwrap();
    let alias = rows.iter().find(|r| r["key"] == "Alias").unwrap();
    assert_eq!(alias["stored"], 1);
    assert_eq!(alias["current"], 2);
    let cdrs = rows.iter().find(|r| r["key"] == "CDRs").unwrap();
    assert_eq!(cdrs["family"], "stor");
    assert!(cdrs["stored"].is_null());
}

#[test]
fn config_env_var_is_honoured() {
    let project = Project::new("");
    let alt = project.path("alt.toml");
    std::fs::write(&alt, "[general]\nbogus = 1\n").unwrap();

    let output = project
        .rmig()
        .env("RMIG_CONFIG", &alt)
        .arg("versions")
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(stderr_of(&output).contains("invalid config"));
}
