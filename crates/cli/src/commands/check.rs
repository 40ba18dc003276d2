// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmig check`: fail unless both input stores are current.

use anyhow::Result;
use rmig_engine::Migrator;

use crate::config::Config;
use crate::output::OutputFormat;

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let migrator = Migrator::new(config.open_stores()?, config.options(false));
    migrator.check_versions()?;
    match format {
        OutputFormat::Text => println!("All versions are current"),
        OutputFormat::Json => println!(r#"{{ "current": true }}"#),
    }
    Ok(())
}
