// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON reports.

use std::io::Write;

use clap::ValueEnum;
use rmig_core::{Entity, StoreFamily, Versions};
use rmig_engine::MigrationStats;
use serde::Serialize;

use crate::table::{Column, Table};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct MigrateReport<'a> {
    dry_run: bool,
    moved: &'a MigrationStats,
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print per-entity move counts. `error` is set when the run stopped early.
pub fn write_stats(
    out: &mut impl Write,
    stats: &MigrationStats,
    dry_run: bool,
    error: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if dry_run {
                writeln!(out, "Dry run, no changes made\n")?;
            }
            let mut table = Table::new(vec![Column::left("ENTITY"), Column::right("MOVED")]);
            for (entity, moved) in stats.iter() {
                table.row(vec![entity.to_string(), moved.to_string()]);
            }
            table.render(out)?;
            let verb = if dry_run { "would be moved" } else { "moved" };
            let outcome = if error.is_some() { ", stopped on error" } else { "" };
            writeln!(out, "\n{} record(s) {}{}", stats.total(), verb, outcome)?;
        }
        OutputFormat::Json => {
            let report = MigrateReport {
                dry_run,
                moved: stats,
                total: stats.total(),
                error: error.map(str::to_string),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

/// One entity's stored version next to the current one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRow {
    pub family: StoreFamily,
    pub key: &'static str,
    pub stored: Option<u64>,
    pub current: u64,
}

impl VersionRow {
    pub fn status(&self) -> String {
        match self.stored {
            None => "missing".to_string(),
            Some(v) if v == self.current => "current".to_string(),
            Some(v) if v > self.current => format!("newer (v{v})"),
            Some(v) => format!("stale (v{v})"),
        }
    }
}

/// Rows for every entity of `family`, `stored` being the vector read from
/// the family's input store (`None` when it has no vector).
pub fn version_rows(family: StoreFamily, stored: Option<&Versions>) -> Vec<VersionRow> {
    Entity::of_family(family)
        .map(|entity| VersionRow {
            family,
            key: entity.version_key(),
            stored: stored.and_then(|v| v.get(entity.version_key())),
            current: entity.current_version(),
        })
        .collect()
}

pub fn write_versions(
    out: &mut impl Write,
    rows: &[VersionRow],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let mut table = Table::new(vec![
                Column::muted("STORE"),
                Column::left("ENTITY"),
                Column::right("STORED"),
                Column::right("CURRENT"),
                Column::status("STATUS"),
            ]);
            for row in rows {
                table.row(vec![
                    row.family.to_string(),
                    row.key.to_string(),
                    row.stored.map_or_else(|| "-".to_string(), |v| v.to_string()),
                    row.current.to_string(),
                    row.status(),
                ]);
            }
            table.render(out)?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
