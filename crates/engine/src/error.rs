// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the migration engine

use crate::MigrationStats;
use rmig_core::{Entity, StoreFamily};
use rmig_storage::StoreError;
use thiserror::Error;

/// Errors that abort a migration
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("unsupported task <{0}>")]
    UnsupportedTask(String),
    #[error("version number is not defined in {0}")]
    VersionsNotDefined(StoreFamily),
    #[error("version for <{0}> is not defined")]
    VersionUndefined(Entity),
    #[error("{entity} version {stored} is newer than supported ({current})")]
    VersionTooNew {
        entity: Entity,
        stored: u64,
        current: u64,
    },
    #[error("no migration path for {entity} from v{from} to v{to}")]
    NoMigrationPath { entity: Entity, from: u64, to: u64 },
    #[error("Migration needed: please backup data and run : <rmig migrate {task}>")]
    MigrationNeeded { task: &'static str },
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StoreError,
    },
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("invalid {entity} record <{key}>: {reason}")]
    Transform {
        entity: Entity,
        key: String,
        reason: String,
    },
}

impl MigrateError {
    /// Wrap a store error with the operation that failed. Unsupported
    /// capabilities are surfaced as they are.
    pub fn storage(context: impl Into<String>, source: StoreError) -> Self {
        match source {
            StoreError::NotImplemented(what) => MigrateError::NotImplemented(what),
            source => MigrateError::Storage {
                context: context.into(),
                source,
            },
        }
    }

    pub fn transform(entity: Entity, key: impl Into<String>, reason: impl ToString) -> Self {
        MigrateError::Transform {
            entity,
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Attach operation context to store results.
pub(crate) trait StoreResultExt<T> {
    fn context(self, f: impl FnOnce() -> String) -> Result<T, MigrateError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn context(self, f: impl FnOnce() -> String) -> Result<T, MigrateError> {
        self.map_err(|e| MigrateError::storage(f(), e))
    }
}

/// A failed [`crate::Migrator::migrate`] call: the first error and the
/// counts reached before it, including the failing entity's partial count.
#[derive(Debug)]
pub struct MigrationFailure {
    pub error: MigrateError,
    pub stats: MigrationStats,
}

impl std::fmt::Display for MigrationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for MigrationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}
