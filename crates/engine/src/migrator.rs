// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration orchestrator.
//!
//! Runs the requested tasks one entity at a time: resolve the stored
//! version in the input store, run the upgrade step (or a plain relocation
//! when already current), then advance the marker in the output store.

use crate::registry::StepRegistry;
use crate::resolver;
use crate::steps::{relocate, StepContext};
use crate::{MigrateError, MigrationFailure, MigrationStats};
use rmig_core::{Entity, StoreFamily};
use rmig_storage::{same_store, RecordStore};
use std::sync::Arc;
use std::time::Instant;

/// Writes the current version vectors to both output stores.
pub const SET_VERSIONS: &str = "*set_versions";
/// Every data-family entity.
pub const DATA_DB: &str = "*datadb";
/// Every stor-family entity.
pub const STOR_DB: &str = "*stordb";

pub const DEFAULT_TENANT: &str = "cgrates.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorOptions {
    pub dry_run: bool,
    /// `data_in` and `data_out` are one physical store. Forced on when the
    /// two handles share their state.
    pub same_data_db: bool,
    /// `stor_in` and `stor_out` are one physical store. Forced on when the
    /// two handles share their state.
    pub same_stor_db: bool,
    pub default_tenant: String,
}

impl Default for MigratorOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            same_data_db: false,
            same_stor_db: false,
            default_tenant: DEFAULT_TENANT.to_string(),
        }
    }
}

/// The four stores a migration works across.
#[derive(Clone)]
pub struct Stores {
    pub data_in: Arc<dyn RecordStore>,
    pub data_out: Arc<dyn RecordStore>,
    pub stor_in: Arc<dyn RecordStore>,
    pub stor_out: Arc<dyn RecordStore>,
}

impl Stores {
    /// Input and output of each family are the same store.
    pub fn in_place(data: Arc<dyn RecordStore>, stor: Arc<dyn RecordStore>) -> Self {
        Self {
            data_in: Arc::clone(&data),
            data_out: data,
            stor_in: Arc::clone(&stor),
            stor_out: stor,
        }
    }

    pub fn input(&self, family: StoreFamily) -> &dyn RecordStore {
        match family {
            StoreFamily::Data => self.data_in.as_ref(),
            StoreFamily::Stor => self.stor_in.as_ref(),
        }
    }

    pub fn output(&self, family: StoreFamily) -> &dyn RecordStore {
        match family {
            StoreFamily::Data => self.data_out.as_ref(),
            StoreFamily::Stor => self.stor_out.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    SetVersions,
    Entity(Entity),
}

/// Expand task names into tasks, rejecting unknown names before any work.
fn parse_tasks(names: &[&str]) -> Result<Vec<Task>, MigrateError> {
    let mut tasks = Vec::new();
    for name in names {
        match *name {
            SET_VERSIONS => tasks.push(Task::SetVersions),
            DATA_DB => tasks.extend(Entity::of_family(StoreFamily::Data).map(Task::Entity)),
            STOR_DB => tasks.extend(Entity::of_family(StoreFamily::Stor).map(Task::Entity)),
            other => {
                let entity = Entity::from_task_name(other)
                    .ok_or_else(|| MigrateError::UnsupportedTask(other.to_string()))?;
                tasks.push(Task::Entity(entity));
            }
        }
    }
    Ok(tasks)
}

pub struct Migrator {
    stores: Stores,
    options: MigratorOptions,
    registry: StepRegistry,
}

impl Migrator {
    pub fn new(stores: Stores, options: MigratorOptions) -> Self {
        Self::with_registry(stores, options, StepRegistry::new())
    }

    pub fn with_registry(
        stores: Stores,
        mut options: MigratorOptions,
        registry: StepRegistry,
    ) -> Self {
        options.same_data_db |= same_store(stores.data_in.as_ref(), stores.data_out.as_ref());
        options.same_stor_db |= same_store(stores.stor_in.as_ref(), stores.stor_out.as_ref());
        Self {
            stores,
            options,
            registry,
        }
    }

    /// Run `names` in order, stopping at the first failure.
    ///
    /// On failure the returned stats hold every entity finished so far plus
    /// the partial count of the one that failed.
    pub fn migrate(&self, names: &[&str]) -> Result<MigrationStats, MigrationFailure> {
        let mut stats = MigrationStats::new();
        let tasks = parse_tasks(names).map_err(|error| MigrationFailure {
            error,
            stats: MigrationStats::new(),
        })?;

        for task in tasks {
            let result = match task {
                Task::SetVersions => self.set_versions(),
                Task::Entity(entity) => {
                    let mut moved = 0;
                    let result = self.migrate_entity(entity, &mut moved);
                    stats.add(entity, moved);
                    result
                }
            };
            if let Err(error) = result {
                return Err(MigrationFailure { error, stats });
            }
        }
        Ok(stats)
    }

    /// Write the current vectors into both output stores. No-op in dry-run.
    pub fn set_versions(&self) -> Result<(), MigrateError> {
        if self.options.dry_run {
            tracing::info!("dry run, not writing versions");
            return Ok(());
        }
        resolver::set_current(self.stores.output(StoreFamily::Data), StoreFamily::Data)?;
        resolver::set_current(self.stores.output(StoreFamily::Stor), StoreFamily::Stor)?;
        tracing::info!("current versions written");
        Ok(())
    }

    /// Verify that both input stores are current.
    pub fn check_versions(&self) -> Result<(), MigrateError> {
        resolver::check_versions(self.stores.input(StoreFamily::Data), StoreFamily::Data)?;
        resolver::check_versions(self.stores.input(StoreFamily::Stor), StoreFamily::Stor)
    }

    fn same_store(&self, family: StoreFamily) -> bool {
        match family {
            StoreFamily::Data => self.options.same_data_db,
            StoreFamily::Stor => self.options.same_stor_db,
        }
    }

    fn migrate_entity(&self, entity: Entity, moved: &mut u64) -> Result<(), MigrateError> {
        let span = tracing::info_span!(
            "migrate",
            entity = %entity,
            from = tracing::field::Empty,
            to = entity.current_version()
        );
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.migrate_entity_inner(entity, moved, &span);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(()) => tracing::info!(
                moved = *moved,
                elapsed_ms,
                dry_run = self.options.dry_run,
                "completed"
            ),
            Err(e) => tracing::error!(moved = *moved, elapsed_ms, error = %e, "failed"),
        }
        result
    }

    fn migrate_entity_inner(
        &self,
        entity: Entity,
        moved: &mut u64,
        span: &tracing::Span,
    ) -> Result<(), MigrateError> {
        let family = entity.family();
        let source = self.stores.input(family);
        let dest = self.stores.output(family);

        let from = resolver::resolve(source, entity)?;
        span.record("from", from);
        let step = self.registry.plan(entity, from)?;

        let ctx = StepContext {
            source,
            dest,
            dry_run: self.options.dry_run,
            same_store: self.same_store(family),
            default_tenant: &self.options.default_tenant,
        };

        match step {
            Some(step) => {
                tracing::info!(
                    step_from = step.source_version(),
                    step_to = step.target_version(),
                    "running step"
                );
                step.run(&ctx, moved)?;
            }
            None if ctx.same_store => {
                tracing::warn!("source and destination are the same store, skipping relocation");
            }
            None => relocate(entity, &ctx, moved)?,
        }

        if !ctx.dry_run {
            resolver::advance(dest, entity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "migrator_tests.rs"]
mod tests;
