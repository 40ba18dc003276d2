// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation move counters.

use rmig_core::Entity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Records moved (or, in dry-run, that would move) per entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MigrationStats(BTreeMap<Entity, u64>);

impl MigrationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `entity`; zero when it was not processed.
    pub fn get(&self, entity: Entity) -> u64 {
        self.0.get(&entity).copied().unwrap_or(0)
    }

    /// Whether `entity` was processed at all.
    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains_key(&entity)
    }

    pub fn add(&mut self, entity: Entity, moved: u64) {
        *self.0.entry(entity).or_default() += moved;
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Entities in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, u64)> + '_ {
        self.0.iter().map(|(e, n)| (*e, *n))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
