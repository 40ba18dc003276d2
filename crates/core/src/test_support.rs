// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::filter::{Filter, FilterRule};
use crate::key::KeyField;
use crate::legacy::{
    AliasValue, V1Alias, V1DerivedCharger, V1DerivedChargers, V1Filter, V1FilterRule,
};
use crate::profile::{Attribute, AttributeProfile, AttributeType, ChargerProfile};
use crate::rsr::RsrParsers;
use std::collections::BTreeMap;

pub const TENANT: &str = "cgrates.org";

// ── Legacy records ──────────────────────────────────────────────────────────

/// Alias keyed `*out:<tenant>:call:<account>:<subject>:*rating` with no blocks.
pub fn alias(tenant: &str, account: &str, subject: &str) -> V1Alias {
    V1Alias {
        direction: KeyField::new("*out"),
        tenant: KeyField::new(tenant),
        category: KeyField::new("call"),
        account: KeyField::new(account),
        subject: KeyField::new(subject),
        context: KeyField::new("*rating"),
        values: Vec::new(),
    }
}

/// One alias block. `pairs` is `(target field, original, replacement)`.
pub fn alias_value(destination: &str, weight: f64, pairs: &[(&str, &str, &str)]) -> AliasValue {
    let mut map: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for (field, original, replacement) in pairs {
        map.entry(field.to_string())
            .or_default()
            .insert(original.to_string(), replacement.to_string());
    }
    AliasValue {
        destination_id: KeyField::new(destination),
        pairs: map,
        weight,
    }
}

pub fn derived_charger_run(run_id: &str) -> V1DerivedCharger {
    V1DerivedCharger {
        run_id: run_id.to_string(),
        ..Default::default()
    }
}

pub fn derived_chargers(destinations: &[&str], runs: Vec<V1DerivedCharger>) -> V1DerivedChargers {
    V1DerivedChargers {
        destination_ids: destinations.iter().map(|d| d.to_string()).collect(),
        chargers: runs,
    }
}

pub fn v1_filter(id: &str, rules: &[(&str, &str, &[&str])]) -> V1Filter {
    V1Filter {
        tenant: TENANT.to_string(),
        id: id.to_string(),
        rules: rules
            .iter()
            .map(|(kind, field, values)| V1FilterRule {
                kind: kind.to_string(),
                field_name: field.to_string(),
                values: values.iter().map(|v| v.to_string()).collect(),
            })
            .collect(),
        activation_interval: None,
    }
}

// ── Current records ─────────────────────────────────────────────────────────

pub fn filter(id: &str, rules: &[(&str, &str, &[&str])]) -> Filter {
    Filter {
        tenant: TENANT.to_string(),
        id: id.to_string(),
        rules: rules
            .iter()
            .map(|(kind, element, values)| FilterRule {
                kind: kind.to_string(),
                element: element.to_string(),
                values: values.iter().map(|v| v.to_string()).collect(),
            })
            .collect(),
    }
}

pub fn attribute_profile(id: &str, attrs: &[(&str, &str)]) -> AttributeProfile {
    AttributeProfile {
        tenant: TENANT.to_string(),
        id: id.to_string(),
        contexts: vec!["*any".to_string()],
        filter_ids: Vec::new(),
        activation_interval: None,
        attributes: attrs
            .iter()
            .map(|(path, value)| Attribute {
                filter_ids: Vec::new(),
                path: path.to_string(),
                kind: AttributeType::Variable,
                value: RsrParsers::literal(*value),
            })
            .collect(),
        blocker: false,
        weight: 20.0,
    }
}

pub fn charger_profile(id: &str, filter_ids: &[&str]) -> ChargerProfile {
    ChargerProfile {
        tenant: TENANT.to_string(),
        id: id.to_string(),
        filter_ids: filter_ids.iter().map(|f| f.to_string()).collect(),
        activation_interval: None,
        run_id: "*default".to_string(),
        attribute_ids: Vec::new(),
        weight: 10.0,
    }
}
