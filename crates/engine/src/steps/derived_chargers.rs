// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{list_keys, read_record, remove_record, write_record, MigrationStep, StepContext};
use crate::convert::derived_chargers_to_profiles;
use crate::MigrateError;
use rmig_core::meta::{ATTRIBUTE_PROFILE_PREFIX, CHARGER_PROFILE_PREFIX, DERIVED_CHARGERS_PREFIX};
use rmig_core::{DerivedChargerKey, Entity, V1DerivedChargers};

/// Legacy derived chargers become one attribute profile and one charger
/// profile per run.
pub struct DerivedChargersV1;

impl MigrationStep for DerivedChargersV1 {
    fn entity(&self) -> Entity {
        Entity::DerivedChargers
    }

    fn source_version(&self) -> u64 {
        1
    }

    fn target_version(&self) -> u64 {
        2
    }

    fn run(&self, ctx: &StepContext<'_>, moved: &mut u64) -> Result<(), MigrateError> {
        const ENTITY: Entity = Entity::DerivedChargers;
        for key in list_keys(ctx.source, DERIVED_CHARGERS_PREFIX)? {
            let dc_key = key
                .strip_prefix(DERIVED_CHARGERS_PREFIX)
                .and_then(DerivedChargerKey::parse)
                .ok_or_else(|| MigrateError::transform(ENTITY, &key, "malformed key"))?;
            let Some(record) = read_record::<V1DerivedChargers>(ctx.source, ENTITY, &key)? else {
                continue;
            };
            let pairs = derived_chargers_to_profiles(&dc_key, &record, ctx.default_tenant)
                .map_err(|e| MigrateError::transform(ENTITY, &key, e))?;

            if !ctx.dry_run {
                for pair in &pairs {
                    if pair.has_attributes() {
                        let attr_key =
                            format!("{}{}", ATTRIBUTE_PROFILE_PREFIX, pair.attribute.tenant_id());
                        write_record(ctx.dest, ENTITY, &attr_key, &pair.attribute)?;
                    }
                    let charger_key =
                        format!("{}{}", CHARGER_PROFILE_PREFIX, pair.charger.tenant_id());
                    write_record(ctx.dest, ENTITY, &charger_key, &pair.charger)?;
                }
                remove_record(ctx.source, &key)?;
            }
            tracing::debug!(%key, runs = pairs.len(), "converted derived chargers");
            *moved += 1;
        }
        Ok(())
    }
}
