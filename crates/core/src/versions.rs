// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Version vectors.

use crate::entity::{Entity, StoreFamily};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema version per entity key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Versions(BTreeMap<String, u64>);

impl Versions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.get(key).copied()
    }

    pub fn set(&mut self, key: impl Into<String>, version: u64) {
        self.0.insert(key.into(), version);
    }

    pub fn remove(&mut self, key: &str) -> Option<u64> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Copy every entry of `other` into `self`, overwriting shared keys.
    pub fn merge(&mut self, other: &Versions) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), *v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A vector holding only `entity` at its current version.
    pub fn current_for(entity: Entity) -> Self {
        std::iter::once((entity.version_key().to_string(), entity.current_version())).collect()
    }

    /// Current versions of every entity in one family.
    pub fn current(family: StoreFamily) -> Self {
        Entity::of_family(family)
            .map(|e| (e.version_key().to_string(), e.current_version()))
            .collect()
    }
}

impl FromIterator<(String, u64)> for Versions {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, u64); N]> for Versions {
    fn from(entries: [(&str, u64); N]) -> Self {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

#[cfg(test)]
#[path = "versions_tests.rs"]
mod tests;
