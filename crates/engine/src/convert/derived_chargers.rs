// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy derived chargers → attribute profile + charger profile per run.

use rmig_core::filter::{destinations_filter, rsr_filter, string_filter};
use rmig_core::meta::{
    req_path, ACCOUNT, CATEGORY, DYNAMIC_DATA_PREFIX, META_CHARGERS, STATIC_VALUE_PREFIX, SUBJECT,
};
use rmig_core::{
    Attribute, AttributeProfile, AttributeType, ChargerProfile, DerivedChargerKey, FieldOverride,
    RsrError, RsrParsers, V1DerivedCharger, V1DerivedChargers,
};

/// Weight of every profile produced from a legacy run.
pub const CHARGER_PROFILE_WEIGHT: f64 = 10.0;

/// The two profiles produced for one legacy run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargerPair {
    pub attribute: AttributeProfile,
    pub charger: ChargerProfile,
}

impl ChargerPair {
    /// Attribute profiles without attributes are not stored.
    pub fn has_attributes(&self) -> bool {
        !self.attribute.attributes.is_empty()
    }
}

/// Convert every run registered under `key`, in run order.
pub fn derived_chargers_to_profiles(
    key: &DerivedChargerKey,
    record: &V1DerivedChargers,
    default_tenant: &str,
) -> Result<Vec<ChargerPair>, RsrError> {
    let tenant = key.tenant.value().unwrap_or(default_tenant);
    let shared = shared_filters(key, record);
    record
        .chargers
        .iter()
        .enumerate()
        .map(|(i, run)| convert_run(&format!("{key}_{i}"), tenant, &shared, run))
        .collect()
}

fn shared_filters(key: &DerivedChargerKey, record: &V1DerivedChargers) -> Vec<String> {
    let mut filters = Vec::new();
    if !record.destination_ids.is_empty() {
        filters.push(destinations_filter(
            record.destination_ids.iter().map(String::as_str),
        ));
    }
    for (field, value) in [
        (CATEGORY, &key.category),
        (ACCOUNT, &key.account),
        (SUBJECT, &key.subject),
    ] {
        if let Some(v) = value.value() {
            filters.push(string_filter(field, v));
        }
    }
    filters
}

fn convert_run(
    id: &str,
    tenant: &str,
    shared: &[String],
    run: &V1DerivedCharger,
) -> Result<ChargerPair, RsrError> {
    let mut attributes = Vec::new();
    for (field, override_) in run.overrides() {
        let value = match override_ {
            FieldOverride::Default => continue,
            FieldOverride::Static(v) => RsrParsers::literal(v.as_str()),
            FieldOverride::Dynamic(rules) => RsrParsers::compile_legacy(rules)?,
        };
        attributes.push(Attribute {
            filter_ids: Vec::new(),
            path: req_path(field),
            kind: AttributeType::Variable,
            value,
        });
    }

    let attribute = AttributeProfile {
        tenant: tenant.to_string(),
        id: id.to_string(),
        contexts: vec![META_CHARGERS.to_string()],
        filter_ids: shared.to_vec(),
        activation_interval: None,
        attributes,
        blocker: false,
        weight: CHARGER_PROFILE_WEIGHT,
    };

    let mut filter_ids = shared.to_vec();
    if !run.run_filters.is_empty() {
        let expr = run
            .run_filters
            .strip_prefix(DYNAMIC_DATA_PREFIX)
            .unwrap_or(&run.run_filters);
        let expr = expr.strip_prefix(STATIC_VALUE_PREFIX).unwrap_or(expr);
        filter_ids.push(rsr_filter(expr));
    }

    let attribute_ids = if attribute.attributes.is_empty() {
        Vec::new()
    } else {
        vec![attribute.id.clone()]
    };

    let charger = ChargerProfile {
        tenant: tenant.to_string(),
        id: id.to_string(),
        filter_ids,
        activation_interval: None,
        run_id: run.run_id.clone(),
        attribute_ids,
        weight: CHARGER_PROFILE_WEIGHT,
    };

    Ok(ChargerPair { attribute, charger })
}

#[cfg(test)]
#[path = "derived_chargers_tests.rs"]
mod tests;
