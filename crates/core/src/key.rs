// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy key fields and concatenated keys.

use crate::meta::{ANY, CONCATENATED_KEY_SEP};
use serde::{Deserialize, Serialize};

/// One dimension of a legacy composite key.
///
/// Legacy records encoded three different states in a single string: the
/// empty string (unset), the `*any` wildcard, and a concrete value. Most
/// conversion rules only care whether the field is [`KeyField::Value`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyField {
    #[default]
    Empty,
    Any,
    Value(String),
}

impl KeyField {
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            KeyField::Empty
        } else if s == ANY {
            KeyField::Any
        } else {
            KeyField::Value(s)
        }
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            KeyField::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, KeyField::Value(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            KeyField::Empty => "",
            KeyField::Any => ANY,
            KeyField::Value(v) => v,
        }
    }
}

impl From<String> for KeyField {
    fn from(s: String) -> Self {
        KeyField::new(s)
    }
}

impl From<&str> for KeyField {
    fn from(s: &str) -> Self {
        KeyField::new(s)
    }
}

impl From<KeyField> for String {
    fn from(k: KeyField) -> Self {
        match k {
            KeyField::Empty => String::new(),
            KeyField::Any => ANY.to_string(),
            KeyField::Value(v) => v,
        }
    }
}

impl std::fmt::Display for KeyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join key parts with `:`.
pub fn concatenated_key<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CONCATENATED_KEY_SEP)
}

/// Split a `:` joined key into exactly `N` parts.
///
/// Returns `None` when the part count differs.
pub fn split_concatenated_key<const N: usize>(key: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = key.split(CONCATENATED_KEY_SEP).collect();
    parts.try_into().ok()
}

/// Build a `<tenant>:<id>` key.
pub fn tenant_id(tenant: &str, id: &str) -> String {
    concatenated_key(&[tenant, id])
}

/// Split a `<tenant>:<id>` key. The ID part may itself contain `:`.
pub fn split_tenant_id(key: &str) -> Option<(&str, &str)> {
    key.split_once(CONCATENATED_KEY_SEP)
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
