// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of schema upgrade steps.
//!
//! Each step takes an entity from one stored version straight to the
//! current one, so an upgrade is always a single pass over the source.

use crate::steps::{AliasV1, CdrsV1, DerivedChargersV1, FiltersUpgrade, MigrationStep};
use crate::MigrateError;
use rmig_core::Entity;

pub struct StepRegistry {
    steps: Vec<Box<dyn MigrationStep>>,
}

impl StepRegistry {
    /// A registry with every known upgrade step.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(AliasV1);
        registry.register(DerivedChargersV1);
        for from in 1..=4 {
            registry.register(FiltersUpgrade::new(from));
        }
        registry.register(CdrsV1);
        registry
    }

    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn register(&mut self, step: impl MigrationStep + 'static) {
        self.steps.push(Box::new(step));
    }

    /// The step taking `entity` from version `from` to its current version.
    ///
    /// `None` when `from` is already current.
    pub fn plan(
        &self,
        entity: Entity,
        from: u64,
    ) -> Result<Option<&dyn MigrationStep>, MigrateError> {
        let current = entity.current_version();
        if from > current {
            return Err(MigrateError::VersionTooNew {
                entity,
                stored: from,
                current,
            });
        }
        if from == current {
            return Ok(None);
        }
        self.steps
            .iter()
            .find(|s| {
                s.entity() == entity && s.source_version() == from && s.target_version() == current
            })
            .map(|s| Some(s.as_ref()))
            .ok_or(MigrateError::NoMigrationPath {
                entity,
                from,
                to: current,
            })
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
