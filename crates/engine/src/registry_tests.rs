// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::steps::StepContext;
use yare::parameterized;

fn planned(registry: &StepRegistry, entity: Entity, from: u64) -> Option<(u64, u64)> {
    registry
        .plan(entity, from)
        .ok()
        .flatten()
        .map(|s| (s.source_version(), s.target_version()))
}

#[parameterized(
    filters_v1 = { Entity::Filters, 1 },
    filters_v2 = { Entity::Filters, 2 },
    filters_v3 = { Entity::Filters, 3 },
    filters_v4 = { Entity::Filters, 4 },
    aliases = { Entity::Aliases, 1 },
    derived_chargers = { Entity::DerivedChargers, 1 },
    cdrs = { Entity::Cdrs, 1 },
)]
fn one_step_reaches_current(entity: Entity, from: u64) {
    let registry = StepRegistry::new();
    assert_eq!(
        planned(&registry, entity, from),
        Some((from, entity.current_version()))
    );
}

#[test]
fn current_version_needs_no_step() {
    let registry = StepRegistry::new();
    for entity in Entity::all() {
        let plan = registry.plan(entity, entity.current_version());
        assert!(matches!(plan, Ok(None)), "{entity}");
    }
}

#[test]
fn newer_version_is_rejected() {
    let err = StepRegistry::new().plan(Entity::Aliases, 3).err().unwrap();
    assert!(matches!(
        err,
        MigrateError::VersionTooNew {
            entity: Entity::Aliases,
            stored: 3,
            current: 2
        }
    ));
}

#[parameterized(
    accounts = { Entity::Accounts, 1 },
    attributes = { Entity::Attributes, 4 },
    filters_v0 = { Entity::Filters, 0 },
)]
fn missing_step_has_no_path(entity: Entity, from: u64) {
    let err = StepRegistry::new().plan(entity, from).err().unwrap();
    assert!(matches!(err, MigrateError::NoMigrationPath { from: f, .. } if f == from));
}

struct Partial;

impl MigrationStep for Partial {
    fn entity(&self) -> Entity {
        Entity::Accounts
    }
    fn source_version(&self) -> u64 {
        1
    }
    fn target_version(&self) -> u64 {
        2
    }
    fn run(&self, _ctx: &StepContext<'_>, _moved: &mut u64) -> Result<(), MigrateError> {
        Ok(())
    }
}

#[test]
fn step_stopping_short_of_current_is_not_a_path() {
    let mut registry = StepRegistry::empty();
    registry.register(Partial);
    let err = registry.plan(Entity::Accounts, 1).err().unwrap();
    assert!(matches!(
        err,
        MigrateError::NoMigrationPath { from: 1, to: 3, .. }
    ));
}
