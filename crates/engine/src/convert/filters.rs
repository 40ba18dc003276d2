// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filter document upgrades and inline filter rewrites.
//!
//! Versions 1 to 3 stored a plain field name per rule; version 4 stores a
//! dynamic element (`~*req.Account`). Version 5 splits `*rsr` rules into
//! one rule per element.

use rmig_core::meta::{
    req_ref, AND_SEP, DYNAMIC_DATA_PREFIX, DYNAMIC_NAMESPACES, META_NOT_RESOURCES, META_NOT_RSR,
    META_NOT_STATS, META_RESOURCES, META_RSR, META_STATS,
};
use rmig_core::{Filter, FilterRule, InlineFilter, V1Filter, V1FilterRule};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid RSRFilter start rule in string: <{0}>")]
    InvalidRsrStart(String),
    #[error("invalid converter terminator in rule: <{0}>")]
    InvalidConverter(String),
}

/// Types whose field name is not a request field.
const NON_FIELD_TYPES: [&str; 6] = [
    META_RSR,
    META_STATS,
    META_RESOURCES,
    META_NOT_RSR,
    META_NOT_STATS,
    META_NOT_RESOURCES,
];

const FILTER_VAL_START: char = '(';
const FILTER_VAL_END: char = ')';

fn has_dynamic_namespace(field: &str) -> bool {
    field
        .strip_prefix(DYNAMIC_DATA_PREFIX)
        .is_some_and(|rest| DYNAMIC_NAMESPACES.iter().any(|ns| rest.starts_with(ns)))
}

fn strip_dynamic(s: &str) -> &str {
    s.strip_prefix(DYNAMIC_DATA_PREFIX).unwrap_or(s)
}

fn upgrade(fl: &V1Filter, rule: impl Fn(&V1FilterRule) -> FilterRule) -> Filter {
    Filter {
        tenant: fl.tenant.clone(),
        id: fl.id.clone(),
        rules: fl.rules.iter().map(rule).collect(),
    }
}

fn renamed(rule: &V1FilterRule) -> FilterRule {
    FilterRule {
        kind: rule.kind.clone(),
        element: rule.field_name.clone(),
        values: rule.values.clone(),
    }
}

/// Version 1: bare field names gain the `~*req.` prefix.
pub fn filter_v1_to_v4(fl: &V1Filter) -> Filter {
    upgrade(fl, |rule| {
        let mut out = renamed(rule);
        if !rule.field_name.is_empty()
            && !rule.field_name.starts_with(DYNAMIC_DATA_PREFIX)
            && !NON_FIELD_TYPES.contains(&rule.kind.as_str())
        {
            out.element = req_ref(&rule.field_name);
        }
        out
    })
}

/// Version 2: fields already under a dynamic namespace are kept, `*rsr`
/// rules have their values moved under `~*req.`.
pub fn filter_v2_to_v4(fl: &V1Filter) -> Filter {
    upgrade(fl, |rule| {
        let mut out = renamed(rule);
        let keep = (rule.field_name.is_empty() && rule.kind != META_RSR)
            || has_dynamic_namespace(&rule.field_name);
        if keep {
            return out;
        }
        if rule.kind != META_RSR {
            out.element = req_ref(strip_dynamic(&rule.field_name));
        } else {
            out.values = rule
                .values
                .iter()
                .map(|v| req_ref(strip_dynamic(v)))
                .collect();
        }
        out
    })
}

/// Version 3: only the field name is renamed to element.
pub fn filter_v3_to_v4(fl: &V1Filter) -> Filter {
    upgrade(fl, renamed)
}

/// Split every `*rsr`/`*notrsr` rule into one rule per filtered element.
pub fn filter_v4_to_v5(fl: &Filter) -> Result<Filter, FilterError> {
    let mut rules = Vec::with_capacity(fl.rules.len());
    for rule in &fl.rules {
        if rule.kind != META_RSR && rule.kind != META_NOT_RSR {
            rules.push(rule.clone());
            continue;
        }
        for value in &rule.values {
            if let Some((element, values)) = migrate_rsr_filter_v4(value)? {
                rules.push(FilterRule {
                    kind: rule.kind.clone(),
                    element,
                    values,
                });
            }
        }
    }
    Ok(Filter {
        tenant: fl.tenant.clone(),
        id: fl.id.clone(),
        rules,
    })
}

/// Parse a version 4 RSR filter value `<element>(<v1>&<v2>…)`.
///
/// Values not ending in `)` carry no filter and yield `None`. Converters
/// and search/replace rules are dropped from dynamic elements.
pub fn migrate_rsr_filter_v4(rsr: &str) -> Result<Option<(String, Vec<String>)>, FilterError> {
    let Some(body) = rsr.strip_suffix(FILTER_VAL_END) else {
        return Ok(None);
    };
    let start = match body.find(FILTER_VAL_START) {
        Some(idx) if idx > 0 => idx,
        _ => return Err(FilterError::InvalidRsrStart(rsr.to_string())),
    };
    let values = body[start + 1..]
        .split(AND_SEP)
        .map(str::to_string)
        .collect();
    let mut element = &body[..start];

    if let Some(idx) = element.find("{*") {
        if !element.ends_with('}') {
            return Err(FilterError::InvalidConverter(element.to_string()));
        }
        element = &element[..idx];
    }
    if element.starts_with(DYNAMIC_DATA_PREFIX) && element.len() > 1 {
        element = element.split(":s/").next().unwrap_or(element);
    }
    Ok(Some((element.to_string(), values)))
}

/// Inline filter rewrite for data migrated from filters version 1.
pub fn inline_filter_v1(fl: &str) -> String {
    let Some(mut inline) = InlineFilter::parse(fl) else {
        return fl.to_string();
    };
    if inline.element.starts_with(DYNAMIC_DATA_PREFIX)
        || NON_FIELD_TYPES.contains(&inline.kind.as_str())
    {
        return fl.to_string();
    }
    inline.element = req_ref(&inline.element);
    inline.to_string()
}

/// Inline filter rewrite for data migrated from filters version 2.
pub fn inline_filter_v2(fl: &str) -> String {
    let Some(mut inline) = InlineFilter::parse(fl) else {
        return fl.to_string();
    };
    if has_dynamic_namespace(&inline.element) {
        return fl.to_string();
    }
    if inline.kind != META_RSR {
        inline.element = req_ref(strip_dynamic(&inline.element));
        return inline.to_string();
    }
    // *rsr keeps its expression in the values part
    format!("{}::{}", inline.kind, req_ref(strip_dynamic(&inline.values)))
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;
