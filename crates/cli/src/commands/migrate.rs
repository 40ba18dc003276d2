// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmig migrate`: run migration tasks.

use anyhow::Result;
use clap::Args;
use rmig_engine::Migrator;

use crate::config::Config;
use crate::output::{write_stats, OutputFormat};

#[derive(Args)]
pub struct MigrateArgs {
    /// Tasks to run: entity tasks (`*aliases`, `*filters`, ...), `*datadb`,
    /// `*stordb` or `*set_versions`
    #[arg(required = true, value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Read and convert everything but write nothing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn handle(args: MigrateArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let options = config.options(args.dry_run);
    let dry_run = options.dry_run;
    let migrator = Migrator::new(config.open_stores()?, options);
    let tasks: Vec<&str> = args.tasks.iter().map(String::as_str).collect();

    let mut stdout = std::io::stdout().lock();
    match migrator.migrate(&tasks) {
        Ok(stats) => write_stats(&mut stdout, &stats, dry_run, None, format),
        Err(failure) => {
            let message = failure.to_string();
            write_stats(&mut stdout, &failure.stats, dry_run, Some(&message), format)?;
            Err(failure.into())
        }
    }
}
