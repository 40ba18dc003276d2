// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Copy an entity that is already at the current version into the
//! destination store.

use super::{list_keys, remove_record, StepContext};
use crate::error::StoreResultExt;
use crate::MigrateError;
use rmig_core::{Entity, Layout};
use rmig_storage::RowFilter;

/// Move every record of `entity` from source to destination.
///
/// Documents move one key at a time. Rows move one natural-key group at a
/// time: the group is read, written, then deleted from the source with the
/// same filter it was read with.
pub fn relocate(
    entity: Entity,
    ctx: &StepContext<'_>,
    moved: &mut u64,
) -> Result<(), MigrateError> {
    match entity.layout() {
        Layout::Documents(prefixes) => {
            for prefix in prefixes {
                for key in list_keys(ctx.source, prefix)? {
                    let Some(doc) = ctx
                        .source
                        .get_document(&key)
                        .context(|| format!("reading <{key}>"))?
                    else {
                        continue;
                    };
                    if !ctx.dry_run {
                        ctx.dest
                            .set_document(&key, doc)
                            .context(|| format!("writing <{key}>"))?;
                        remove_record(ctx.source, &key)?;
                    }
                    tracing::debug!(%key, "relocated document");
                    *moved += 1;
                }
            }
        }
        Layout::Rows { table, key_columns } => {
            let ids = ctx
                .source
                .distinct_ids(table, key_columns, &RowFilter::new())
                .context(|| format!("listing {table} ids"))?;
            for id in ids {
                let filter: RowFilter = key_columns
                    .iter()
                    .map(|c| c.to_string())
                    .zip(id)
                    .collect();
                let rows = ctx
                    .source
                    .get_rows(table, &filter)
                    .context(|| format!("reading {table} {filter:?}"))?;
                if rows.is_empty() {
                    continue;
                }
                if !ctx.dry_run {
                    let count = rows.len();
                    ctx.dest
                        .set_rows(table, rows)
                        .context(|| format!("writing {table} {filter:?}"))?;
                    ctx.source
                        .remove_rows(table, &filter)
                        .context(|| format!("removing {table} {filter:?}"))?;
                    tracing::debug!(table, ?filter, rows = count, "relocated rows");
                }
                *moved += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "relocate_tests.rs"]
mod tests;
