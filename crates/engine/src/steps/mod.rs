// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration steps: one schema upgrade of one entity.
//!
//! A step reads from `source`, writes to `dest` and removes what it moved
//! from `source`. With `dry_run` set it reads and converts everything but
//! writes nothing; the move counter still advances.

mod alias;
mod cdrs;
mod derived_chargers;
mod filters;
mod relocate;

pub use alias::AliasV1;
pub use cdrs::CdrsV1;
pub use derived_chargers::DerivedChargersV1;
pub use filters::FiltersUpgrade;
pub use relocate::relocate;

use crate::error::StoreResultExt;
use crate::MigrateError;
use rmig_core::Entity;
use rmig_storage::RecordStore;
use serde::de::DeserializeOwned;

/// Everything a step needs for one run.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub source: &'a dyn RecordStore,
    pub dest: &'a dyn RecordStore,
    pub dry_run: bool,
    /// `source` and `dest` are the same physical store.
    pub same_store: bool,
    /// Tenant for legacy records scoped to no tenant or to `*any`.
    pub default_tenant: &'a str,
}

/// One upgrade from `source_version` to `target_version` of `entity`.
pub trait MigrationStep: Send + Sync {
    fn entity(&self) -> Entity;
    fn source_version(&self) -> u64;
    fn target_version(&self) -> u64;

    /// Run the step, adding one to `moved` per migrated record. The count
    /// reached so far stays visible when the step fails.
    fn run(&self, ctx: &StepContext<'_>, moved: &mut u64) -> Result<(), MigrateError>;
}

/// Read and decode one document. Undecodable documents are transform
/// errors, not storage errors.
pub(crate) fn read_record<T: DeserializeOwned>(
    store: &dyn RecordStore,
    entity: Entity,
    key: &str,
) -> Result<Option<T>, MigrateError> {
    let Some(doc) = store
        .get_document(key)
        .context(|| format!("reading <{key}>"))?
    else {
        return Ok(None);
    };
    serde_json::from_value(doc)
        .map(Some)
        .map_err(|e| MigrateError::transform(entity, key, e))
}

pub(crate) fn write_record<T: serde::Serialize>(
    store: &dyn RecordStore,
    entity: Entity,
    key: &str,
    record: &T,
) -> Result<(), MigrateError> {
    let doc = serde_json::to_value(record).map_err(|e| MigrateError::transform(entity, key, e))?;
    store
        .set_document(key, doc)
        .context(|| format!("writing <{key}>"))
}

pub(crate) fn remove_record(store: &dyn RecordStore, key: &str) -> Result<(), MigrateError> {
    store
        .remove_document(key)
        .context(|| format!("removing <{key}>"))
}

pub(crate) fn list_keys(
    store: &dyn RecordStore,
    prefix: &str,
) -> Result<Vec<String>, MigrateError> {
    store
        .keys_with_prefix(prefix)
        .context(|| format!("listing <{prefix}> keys"))
}
