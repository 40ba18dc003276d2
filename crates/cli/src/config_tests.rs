// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rmig_core::Versions;

fn parse(content: &str) -> Result<Config, ConfigError> {
    Config::parse(content, Path::new("/etc/rmig/rmig.toml"))
}

#[test]
fn empty_config_is_all_memory() {
    let config = parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.data_in(), StoreConfig::Memory);
    assert_eq!(config.general.default_tenant, "cgrates.org");
    assert!(config.same_data_db());
    assert!(config.same_stor_db());
}

#[test]
fn out_section_defaults_to_in_section() {
    let config = parse(
        r#"
        [data_db_in]
        kind = "file"
        path = "data.db"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.data_out(),
        StoreConfig::File {
            path: PathBuf::from("/etc/rmig/data.db"),
            compression_level: None,
        }
    );
    assert!(config.same_data_db());
}

#[test]
fn distinct_sections_are_not_shared() {
    let config = parse(
        r#"
        [general]
        default_tenant = "example.com"
        dry_run = true

        [data_db_in]
        kind = "file"
        path = "/var/lib/rmig/old.db"

        [data_db_out]
        kind = "file"
        path = "/var/lib/rmig/new.db"
        compression_level = 9
        "#,
    )
    .unwrap();
    assert!(!config.same_data_db());
    assert!(config.same_stor_db());

    let options = config.options(false);
    assert!(options.dry_run);
    assert!(!options.same_data_db);
    assert_eq!(options.default_tenant, "example.com");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = parse("[general]\ntenant = \"x\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("invalid config /etc/rmig/rmig.toml"));
}

#[test]
fn unknown_store_kind_is_rejected() {
    let err = parse("[stor_db_in]\nkind = \"mysql\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_explicit_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn same_file_in_both_families_is_rejected() {
    let config = parse(
        r#"
        [data_db_in]
        kind = "file"
        path = "shared.db"

        [stor_db_out]
        kind = "file"
        path = "shared.db"
        "#,
    )
    .unwrap();
    let err = config.open_stores().err().unwrap();
    assert!(matches!(err, ConfigError::SharedAcrossFamilies(_)));
}

#[test]
fn shared_sections_open_one_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rmig.toml");
    std::fs::write(&path, "[data_db_in]\nkind = \"file\"\npath = \"data.db\"\n").unwrap();
    let config = Config::load(Some(&path)).unwrap();

    let stores = config.open_stores().unwrap();
    stores
        .data_in
        .set_versions(&Versions::from([("Alias", 1)]), true)
        .unwrap();

    assert_eq!(
        stores.data_out.get_versions(None).unwrap(),
        Versions::from([("Alias", 1)])
    );
    assert!(dir.path().join("data.db").exists());
    // stor stays in memory and separate
    assert!(stores.stor_in.get_versions(None).is_err());
}

#[test]
fn different_spellings_of_one_file_are_one_store() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let path = dir.path().join("rmig.toml");
    std::fs::write(
        &path,
        r#"
        [data_db_in]
        kind = "file"
        path = "data.db"

        [data_db_out]
        kind = "file"
        path = "sub/../data.db"
        "#,
    )
    .unwrap();
    let config = Config::load(Some(&path)).unwrap();

    assert!(config.same_data_db());
    assert!(config.options(false).same_data_db);
    let stores = config.open_stores().unwrap();
    stores
        .data_in
        .set_versions(&Versions::from([("Alias", 1)]), true)
        .unwrap();
    assert_eq!(
        stores.data_out.get_versions(None).unwrap(),
        Versions::from([("Alias", 1)])
    );
}
