// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{MigrationStep, StepContext};
use crate::error::StoreResultExt;
use crate::MigrateError;
use rmig_core::Entity;

const LEGACY_TABLE: &str = "cdrs_primary";
const TABLE: &str = "cdrs";

/// CDRs version 1 lived in `cdrs_primary`. The upgrade renames the table
/// in place on the source store.
pub struct CdrsV1;

impl MigrationStep for CdrsV1 {
    fn entity(&self) -> Entity {
        Entity::Cdrs
    }

    fn source_version(&self) -> u64 {
        1
    }

    fn target_version(&self) -> u64 {
        2
    }

    fn run(&self, ctx: &StepContext<'_>, _moved: &mut u64) -> Result<(), MigrateError> {
        if ctx.dry_run {
            return Ok(());
        }
        ctx.source
            .rename_table(LEGACY_TABLE, TABLE)
            .context(|| format!("renaming {LEGACY_TABLE} to {TABLE}"))
    }
}
