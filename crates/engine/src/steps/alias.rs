// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{list_keys, read_record, remove_record, write_record, MigrationStep, StepContext};
use crate::convert::alias_to_attribute_profile;
use crate::MigrateError;
use rmig_core::meta::{ALIAS_PREFIX, ATTRIBUTE_PROFILE_PREFIX};
use rmig_core::{Entity, V1Alias};

/// Legacy aliases become attribute profiles.
pub struct AliasV1;

impl MigrationStep for AliasV1 {
    fn entity(&self) -> Entity {
        Entity::Aliases
    }

    fn source_version(&self) -> u64 {
        1
    }

    fn target_version(&self) -> u64 {
        2
    }

    fn run(&self, ctx: &StepContext<'_>, moved: &mut u64) -> Result<(), MigrateError> {
        for key in list_keys(ctx.source, ALIAS_PREFIX)? {
            let Some(alias) = read_record::<V1Alias>(ctx.source, Entity::Aliases, &key)? else {
                continue;
            };
            let profile = alias_to_attribute_profile(&alias, ctx.default_tenant);
            if !ctx.dry_run {
                let out_key = format!("{}{}", ATTRIBUTE_PROFILE_PREFIX, profile.tenant_id());
                write_record(ctx.dest, Entity::Aliases, &out_key, &profile)?;
                remove_record(ctx.source, &key)?;
            }
            tracing::debug!(
                %key,
                attributes = profile.attributes.len(),
                "converted alias"
            );
            *moved += 1;
        }
        Ok(())
    }
}
