// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{list_keys, read_record, remove_record, write_record, MigrationStep, StepContext};
use crate::convert::{
    filter_v1_to_v4, filter_v2_to_v4, filter_v3_to_v4, filter_v4_to_v5, inline_filter_v1,
    inline_filter_v2,
};
use crate::error::StoreResultExt;
use crate::MigrateError;
use rmig_core::meta::{CHARGER_PROFILE_PREFIX, FILTER_PREFIX, STAT_QUEUE_PROFILE_PREFIX};
use rmig_core::{Entity, Filter, V1Filter};
use serde_json::Value;

const ENTITY: Entity = Entity::Filters;

/// Profiles whose inline filters were written in the old field syntax.
const INLINE_FILTER_OWNERS: [&str; 2] = [CHARGER_PROFILE_PREFIX, STAT_QUEUE_PROFILE_PREFIX];

/// Filters at version 1 to 4 upgraded to the current version.
///
/// Every record passes through the version 4 shape in memory and only the
/// final filter is written, so a record that fails a later conversion is
/// left untouched in the source.
pub struct FiltersUpgrade {
    from: u64,
}

impl FiltersUpgrade {
    /// `from` must be 1, 2, 3 or 4.
    pub fn new(from: u64) -> Self {
        Self { from }
    }

    fn read_v4(&self, ctx: &StepContext<'_>, key: &str) -> Result<Option<Filter>, MigrateError> {
        let convert: fn(&V1Filter) -> Filter = match self.from {
            1 => filter_v1_to_v4,
            2 => filter_v2_to_v4,
            3 => filter_v3_to_v4,
            _ => return read_record::<Filter>(ctx.source, ENTITY, key),
        };
        Ok(read_record::<V1Filter>(ctx.source, ENTITY, key)?.map(|old| convert(&old)))
    }

    fn inline_rewrite(&self) -> Option<fn(&str) -> String> {
        match self.from {
            1 => Some(inline_filter_v1),
            2 => Some(inline_filter_v2),
            _ => None,
        }
    }
}

impl MigrationStep for FiltersUpgrade {
    fn entity(&self) -> Entity {
        ENTITY
    }

    fn source_version(&self) -> u64 {
        self.from
    }

    fn target_version(&self) -> u64 {
        ENTITY.current_version()
    }

    fn run(&self, ctx: &StepContext<'_>, moved: &mut u64) -> Result<(), MigrateError> {
        for key in list_keys(ctx.source, FILTER_PREFIX)? {
            let Some(v4) = self.read_v4(ctx, &key)? else {
                continue;
            };
            let new = filter_v4_to_v5(&v4).map_err(|e| MigrateError::transform(ENTITY, &key, e))?;
            store_filter(ctx, &key, &new)?;
            *moved += 1;
        }
        if ctx.dry_run {
            return Ok(());
        }
        if let Some(rewrite) = self.inline_rewrite() {
            for prefix in INLINE_FILTER_OWNERS {
                rewrite_inline_filters(ctx, prefix, rewrite)?;
            }
        }
        Ok(())
    }
}

/// Filters keep their key; the source copy goes only when it lives in
/// another store.
fn store_filter(ctx: &StepContext<'_>, key: &str, fl: &Filter) -> Result<(), MigrateError> {
    if ctx.dry_run {
        return Ok(());
    }
    write_record(ctx.dest, ENTITY, key, fl)?;
    if !ctx.same_store {
        remove_record(ctx.source, key)?;
    }
    tracing::debug!(%key, rules = fl.rules.len(), "upgraded filter");
    Ok(())
}

/// Rewrite the `filter_ids` of every source document under `prefix`.
///
/// Rewritten documents move to the destination; unchanged ones stay where
/// they are for their own entity's relocation.
fn rewrite_inline_filters(
    ctx: &StepContext<'_>,
    prefix: &str,
    rewrite: fn(&str) -> String,
) -> Result<(), MigrateError> {
    for key in list_keys(ctx.source, prefix)? {
        let Some(mut doc) = ctx
            .source
            .get_document(&key)
            .context(|| format!("reading <{key}>"))?
        else {
            continue;
        };
        let Some(Value::Array(ids)) = doc.get_mut("filter_ids") else {
            continue;
        };
        let mut changed = false;
        for id in ids.iter_mut() {
            if let Value::String(s) = id {
                let new = rewrite(s);
                if new != *s {
                    *s = new;
                    changed = true;
                }
            }
        }
        if !changed {
            continue;
        }
        ctx.dest
            .set_document(&key, doc)
            .context(|| format!("writing <{key}>"))?;
        if !ctx.same_store {
            remove_record(ctx.source, &key)?;
        }
        tracing::debug!(%key, "rewrote inline filters");
    }
    Ok(())
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;
