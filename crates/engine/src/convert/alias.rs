// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy alias rule → attribute profile.

use rmig_core::filter::{destinations_filter, string_filter};
use rmig_core::legacy::DEFAULT_ALIAS_WEIGHT;
use rmig_core::meta::{req_path, ACCOUNT, ANY, CATEGORY, SUBJECT};
use rmig_core::{Attribute, AttributeProfile, AttributeType, KeyField, RsrParsers, V1Alias};
use std::collections::BTreeMap;

/// Convert one legacy alias rule.
///
/// Category, account and subject become string filters, the first concrete
/// destination becomes a destination filter. Only the highest weighted value
/// block (the first one on ties) is turned into attributes.
pub fn alias_to_attribute_profile(alias: &V1Alias, default_tenant: &str) -> AttributeProfile {
    let mut filter_ids: Vec<String> = [
        (CATEGORY, &alias.category),
        (ACCOUNT, &alias.account),
        (SUBJECT, &alias.subject),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.value().map(|v| string_filter(field, v)))
    .collect();

    if let Some(dest) = alias.values.iter().find_map(|av| av.destination_id.value()) {
        filter_ids.push(destinations_filter([dest]));
    }

    let mut selected = None;
    for block in &alias.values {
        match selected {
            Some((_, best)) if block.weight <= best => {}
            _ => selected = Some((block, block.weight)),
        }
    }

    // One attribute per (path, filters); later pairs replace earlier ones.
    let mut attributes: BTreeMap<(String, Vec<String>), Attribute> = BTreeMap::new();
    if let Some((block, _)) = selected {
        for (field, substitutions) in &block.pairs {
            for (original, replacement) in substitutions {
                let attr_filters = match KeyField::new(original.as_str()) {
                    KeyField::Value(v) => vec![string_filter(field, &v)],
                    KeyField::Empty | KeyField::Any => Vec::new(),
                };
                let path = req_path(field);
                attributes.insert(
                    (path.clone(), attr_filters.clone()),
                    Attribute {
                        filter_ids: attr_filters,
                        path,
                        kind: AttributeType::Variable,
                        value: RsrParsers::literal(replacement.as_str()),
                    },
                );
            }
        }
    }

    let mut profile = AttributeProfile {
        tenant: alias.tenant.value().unwrap_or(default_tenant).to_string(),
        id: alias.id(),
        contexts: vec![ANY.to_string()],
        filter_ids,
        activation_interval: None,
        attributes: attributes.into_values().collect(),
        blocker: false,
        weight: selected.map_or(DEFAULT_ALIAS_WEIGHT, |(_, w)| w),
    };
    profile.sort_attributes();
    profile
}

#[cfg(test)]
#[path = "alias_tests.rs"]
mod tests;
