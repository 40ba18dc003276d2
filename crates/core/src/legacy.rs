// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy record shapes read by the upgrade steps.
//!
//! These types only exist to be read from a source store and converted.
//! Nothing writes them except test fixtures.

use crate::key::{concatenated_key, split_concatenated_key, KeyField};
use crate::meta::{
    ACCOUNT, ANSWER_TIME, CATEGORY, COST, DEFAULT, DESTINATION, DIRECTION, DISCONNECT_CAUSE,
    PDD, PRE_RATED, REQUEST_TYPE, SETUP_TIME, STATIC_VALUE_PREFIX, SUBJECT, SUPPLIER, TENANT,
    USAGE,
};
use crate::profile::ActivationInterval;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weight given to alias profiles whose record carries no value blocks.
pub const DEFAULT_ALIAS_WEIGHT: f64 = 20.0;

// ── Aliases ─────────────────────────────────────────────────────────────────

/// A legacy alias rule, scoped by six key dimensions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct V1Alias {
    #[serde(default)]
    pub direction: KeyField,
    #[serde(default)]
    pub tenant: KeyField,
    #[serde(default)]
    pub category: KeyField,
    #[serde(default)]
    pub account: KeyField,
    #[serde(default)]
    pub subject: KeyField,
    #[serde(default)]
    pub context: KeyField,
    #[serde(default)]
    pub values: Vec<AliasValue>,
}

impl V1Alias {
    /// `direction:tenant:category:account:subject:context`
    pub fn id(&self) -> String {
        concatenated_key(&[
            self.direction.as_str(),
            self.tenant.as_str(),
            self.category.as_str(),
            self.account.as_str(),
            self.subject.as_str(),
            self.context.as_str(),
        ])
    }
}

/// One block of substitutions inside an alias rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasValue {
    #[serde(default)]
    pub destination_id: KeyField,
    /// target field → (original value → replacement value)
    #[serde(default)]
    pub pairs: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub weight: f64,
}

// ── Derived chargers ────────────────────────────────────────────────────────

/// The composite key a legacy derived-charger record is stored under.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedChargerKey {
    pub direction: KeyField,
    pub tenant: KeyField,
    pub category: KeyField,
    pub account: KeyField,
    pub subject: KeyField,
}

impl DerivedChargerKey {
    /// Parse `direction:tenant:category:account:subject`.
    pub fn parse(key: &str) -> Option<Self> {
        let [direction, tenant, category, account, subject] = split_concatenated_key::<5>(key)?;
        Some(Self {
            direction: direction.into(),
            tenant: tenant.into(),
            category: category.into(),
            account: account.into(),
            subject: subject.into(),
        })
    }
}

impl std::fmt::Display for DerivedChargerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&concatenated_key(&[
            self.direction.as_str(),
            self.tenant.as_str(),
            self.category.as_str(),
            self.account.as_str(),
            self.subject.as_str(),
        ]))
    }
}

/// All charging runs registered under one [`DerivedChargerKey`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct V1DerivedChargers {
    #[serde(default)]
    pub destination_ids: BTreeSet<String>,
    #[serde(default)]
    pub chargers: Vec<V1DerivedCharger>,
}

/// How a legacy run overrides one request field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldOverride {
    /// Empty or `*default`: keep the request value.
    #[default]
    Default,
    /// `^value`: set a literal.
    Static(String),
    /// Anything else: an RSR expression in the legacy grammar.
    Dynamic(String),
}

impl FieldOverride {
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() || s == DEFAULT {
            return FieldOverride::Default;
        }
        match s.strip_prefix(STATIC_VALUE_PREFIX) {
            Some(value) => FieldOverride::Static(value.to_string()),
            None => FieldOverride::Dynamic(s),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, FieldOverride::Default)
    }
}

impl From<String> for FieldOverride {
    fn from(s: String) -> Self {
        FieldOverride::new(s)
    }
}

impl From<&str> for FieldOverride {
    fn from(s: &str) -> Self {
        FieldOverride::new(s)
    }
}

impl From<FieldOverride> for String {
    fn from(o: FieldOverride) -> Self {
        match o {
            FieldOverride::Default => String::new(),
            FieldOverride::Static(value) => format!("{}{}", STATIC_VALUE_PREFIX, value),
            FieldOverride::Dynamic(rules) => rules,
        }
    }
}

/// One legacy charging run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct V1DerivedCharger {
    pub run_id: String,
    pub run_filters: String,
    pub request_type_field: FieldOverride,
    pub direction_field: FieldOverride,
    pub tenant_field: FieldOverride,
    pub category_field: FieldOverride,
    pub account_field: FieldOverride,
    pub subject_field: FieldOverride,
    pub destination_field: FieldOverride,
    pub setup_time_field: FieldOverride,
    pub pdd_field: FieldOverride,
    pub answer_time_field: FieldOverride,
    pub usage_field: FieldOverride,
    pub supplier_field: FieldOverride,
    pub disconnect_cause_field: FieldOverride,
    pub cost_field: FieldOverride,
    pub pre_rated_field: FieldOverride,
}

impl V1DerivedCharger {
    /// Every override paired with the request field it targets, in the
    /// order attributes are emitted.
    pub fn overrides(&self) -> [(&'static str, &FieldOverride); 15] {
        [
            (REQUEST_TYPE, &self.request_type_field),
            (DIRECTION, &self.direction_field),
            (TENANT, &self.tenant_field),
            (CATEGORY, &self.category_field),
            (ACCOUNT, &self.account_field),
            (SUBJECT, &self.subject_field),
            (DESTINATION, &self.destination_field),
            (SETUP_TIME, &self.setup_time_field),
            (PDD, &self.pdd_field),
            (ANSWER_TIME, &self.answer_time_field),
            (USAGE, &self.usage_field),
            (SUPPLIER, &self.supplier_field),
            (DISCONNECT_CAUSE, &self.disconnect_cause_field),
            (COST, &self.cost_field),
            (PRE_RATED, &self.pre_rated_field),
        ]
    }
}

// ── Filters ─────────────────────────────────────────────────────────────────

/// Filter document as stored by versions 1 to 3.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct V1Filter {
    pub tenant: String,
    pub id: String,
    #[serde(default)]
    pub rules: Vec<V1FilterRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_interval: Option<ActivationInterval>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct V1FilterRule {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
