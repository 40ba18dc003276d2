// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmig versions`: stored version vectors next to the current ones.

use anyhow::Result;
use rmig_core::StoreFamily;

use crate::config::Config;
use crate::output::{version_rows, write_versions, OutputFormat};

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let stores = config.open_stores()?;
    let mut rows = Vec::new();
    for family in [StoreFamily::Data, StoreFamily::Stor] {
        let stored = match stores.input(family).get_versions(None) {
            Ok(v) => Some(v),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };
        rows.extend(version_rows(family, stored.as_ref()));
    }
    write_versions(&mut std::io::stdout().lock(), &rows, format)
}
