// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Current-model attribute and charger profiles.

use crate::key::tenant_id;
use crate::meta::{META_CONSTANT, META_VARIABLE};
use crate::rsr::RsrParsers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Window in which a profile is active. Open ends are unbounded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationInterval {
    pub activation_time: Option<DateTime<Utc>>,
    pub expiry_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "*constant")]
    Constant,
    #[serde(rename = "*variable")]
    Variable,
}

impl AttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Constant => META_CONSTANT,
            AttributeType::Variable => META_VARIABLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub filter_ids: Vec<String>,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub value: RsrParsers,
}

impl Attribute {
    fn first_filter(&self) -> &str {
        self.filter_ids.first().map(String::as_str).unwrap_or_default()
    }

    /// Ordering used for deterministic attribute lists: path, then first
    /// filter ID (no filter sorts first).
    pub fn sort_order(&self, other: &Attribute) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.first_filter().cmp(other.first_filter()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeProfile {
    pub tenant: String,
    pub id: String,
    pub contexts: Vec<String>,
    pub filter_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_interval: Option<ActivationInterval>,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub blocker: bool,
    pub weight: f64,
}

impl AttributeProfile {
    pub fn tenant_id(&self) -> String {
        tenant_id(&self.tenant, &self.id)
    }

    pub fn sort_attributes(&mut self) {
        self.attributes.sort_by(Attribute::sort_order);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargerProfile {
    pub tenant: String,
    pub id: String,
    pub filter_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_interval: Option<ActivationInterval>,
    pub run_id: String,
    pub attribute_ids: Vec<String>,
    pub weight: f64,
}

impl ChargerProfile {
    pub fn tenant_id(&self) -> String {
        tenant_id(&self.tenant, &self.id)
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
