// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filters: stored filter documents and inline filter expressions.

use crate::meta::{
    req_path, req_ref, CONCATENATED_KEY_SEP, DESTINATION, DYNAMIC_DATA_PREFIX, META_DESTINATIONS,
    META_RSR, META_STRING, PIPE_SEP,
};
use serde::{Deserialize, Serialize};

/// A filter document as stored by the current release.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub tenant: String,
    pub id: String,
    pub rules: Vec<FilterRule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    #[serde(rename = "type")]
    pub kind: String,
    pub element: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// `*string:~*req.<field>:<value>`
pub fn string_filter(field: &str, value: &str) -> String {
    format!("{}:{}:{}", META_STRING, req_ref(field), value)
}

/// `*destinations:~*req.Destination:<id1>|<id2>|…`
pub fn destinations_filter<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let ids: Vec<&str> = ids.into_iter().collect();
    format!(
        "{}:{}:{}",
        META_DESTINATIONS,
        req_ref(DESTINATION),
        ids.join(PIPE_SEP)
    )
}

/// `*rsr::~*req.<expr>`; the `*req.` namespace is not doubled.
pub fn rsr_filter(expr: &str) -> String {
    let expr = expr.strip_prefix(DYNAMIC_DATA_PREFIX).unwrap_or(expr);
    let path = if expr.starts_with('*') {
        expr.to_string()
    } else {
        req_path(expr)
    };
    format!("{}::{}{}", META_RSR, DYNAMIC_DATA_PREFIX, path)
}

/// An inline filter ID of the form `<type>:<element>:<values>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineFilter {
    pub kind: String,
    pub element: String,
    /// Everything after the second separator, unsplit.
    pub values: String,
}

impl InlineFilter {
    /// Parse an inline filter. Returns `None` for plain filter IDs (no `*`
    /// type prefix) or fewer than three parts.
    pub fn parse(s: &str) -> Option<Self> {
        if !s.starts_with('*') {
            return None;
        }
        let mut parts = s.splitn(3, CONCATENATED_KEY_SEP);
        let kind = parts.next()?;
        let element = parts.next()?;
        let values = parts.next()?;
        Some(Self {
            kind: kind.to_string(),
            element: element.to_string(),
            values: values.to_string(),
        })
    }
}

impl std::fmt::Display for InlineFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.element, self.values)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
