// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Version resolution: read, compare and advance per-entity markers.
//!
//! The caller picks the store by [`Entity::family`]; every function here
//! works against one store.

use crate::error::StoreResultExt;
use crate::MigrateError;
use rmig_core::{Entity, StoreFamily, Versions};
use rmig_storage::{RecordStore, StoreError};

/// Outcome of comparing a stored marker with the current release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    Current,
    Stale { from: u64 },
}

/// Read the stored version of `entity`.
pub fn resolve(store: &dyn RecordStore, entity: Entity) -> Result<u64, MigrateError> {
    let versions = match store.get_versions(Some(entity.version_key())) {
        Ok(v) => v,
        Err(StoreError::NotFound) => return Err(MigrateError::VersionsNotDefined(entity.family())),
        Err(e) => return Err(MigrateError::storage(format!("reading {entity} version"), e)),
    };
    versions
        .get(entity.version_key())
        .ok_or(MigrateError::VersionUndefined(entity))
}

/// Compare a stored version against the current one.
pub fn status(entity: Entity, stored: u64) -> Result<VersionStatus, MigrateError> {
    let current = entity.current_version();
    match stored {
        v if v == current => Ok(VersionStatus::Current),
        v if v > current => Err(MigrateError::VersionTooNew {
            entity,
            stored,
            current,
        }),
        from => Ok(VersionStatus::Stale { from }),
    }
}

/// Mark `entity` current without touching other entities' markers.
pub fn advance(store: &dyn RecordStore, entity: Entity) -> Result<(), MigrateError> {
    store
        .set_versions(&Versions::current_for(entity), false)
        .context(|| format!("setting {entity} version"))
}

/// Write the whole current vector of `family`, replacing what is stored.
pub fn set_current(store: &dyn RecordStore, family: StoreFamily) -> Result<(), MigrateError> {
    store
        .set_versions(&Versions::current(family), true)
        .context(|| format!("setting {family} versions"))
}

/// Verify that every entity of `family` is current in `store`.
///
/// Reports the first stale (or missing) entity in catalogue order.
pub fn check_versions(store: &dyn RecordStore, family: StoreFamily) -> Result<(), MigrateError> {
    let stored = match store.get_versions(None) {
        Ok(v) if v.is_empty() => return Err(MigrateError::VersionsNotDefined(family)),
        Ok(v) => v,
        Err(StoreError::NotFound) => return Err(MigrateError::VersionsNotDefined(family)),
        Err(e) => return Err(MigrateError::storage(format!("reading {family} versions"), e)),
    };
    for entity in Entity::of_family(family) {
        match stored.get(entity.version_key()) {
            Some(v) => {
                if let VersionStatus::Stale { .. } = status(entity, v)? {
                    return Err(MigrateError::MigrationNeeded {
                        task: entity.task_name(),
                    });
                }
            }
            None => {
                return Err(MigrateError::MigrationNeeded {
                    task: entity.task_name(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
