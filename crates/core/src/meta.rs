// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markers and separators shared with the rating platform's data formats.

/// Wildcard value in legacy keys.
pub const ANY: &str = "*any";
/// "Keep whatever the request already has" in legacy field overrides.
pub const DEFAULT: &str = "*default";

/// Prefix marking a literal (static) value.
pub const STATIC_VALUE_PREFIX: &str = "^";
/// Prefix marking a dynamic field reference.
pub const DYNAMIC_DATA_PREFIX: &str = "~";

pub const META_REQ: &str = "*req";
pub const META_VARS: &str = "*vars";
pub const META_CGREQ: &str = "*cgreq";
pub const META_CGREP: &str = "*cgrep";
pub const META_REP: &str = "*rep";
pub const META_ACT: &str = "*act";

/// Namespaces a dynamic field reference may already start with.
pub const DYNAMIC_NAMESPACES: [&str; 6] =
    [META_REQ, META_VARS, META_CGREQ, META_CGREP, META_REP, META_ACT];

pub const NESTING_SEP: &str = ".";
pub const CONCATENATED_KEY_SEP: &str = ":";
pub const INFIELD_SEP: &str = ";";
pub const PIPE_SEP: &str = "|";
pub const AND_SEP: &str = "&";

// Data store key prefixes
pub const ALIAS_PREFIX: &str = "als_";
pub const DERIVED_CHARGERS_PREFIX: &str = "dcs_";
pub const ATTRIBUTE_PROFILE_PREFIX: &str = "alp_";
pub const CHARGER_PROFILE_PREFIX: &str = "cpp_";
pub const FILTER_PREFIX: &str = "ftr_";
pub const STAT_QUEUE_PROFILE_PREFIX: &str = "sqp_";

// Filter types
pub const META_STRING: &str = "*string";
pub const META_DESTINATIONS: &str = "*destinations";
pub const META_RSR: &str = "*rsr";
pub const META_NOT_RSR: &str = "*notrsr";
pub const META_STATS: &str = "*stats";
pub const META_NOT_STATS: &str = "*notstats";
pub const META_RESOURCES: &str = "*resources";
pub const META_NOT_RESOURCES: &str = "*notresources";

// Profile contexts and attribute types
pub const META_CHARGERS: &str = "*chargers";
pub const META_VARIABLE: &str = "*variable";
pub const META_CONSTANT: &str = "*constant";

// Request field names
pub const REQUEST_TYPE: &str = "RequestType";
pub const DIRECTION: &str = "Direction";
pub const TENANT: &str = "Tenant";
pub const CATEGORY: &str = "Category";
pub const ACCOUNT: &str = "Account";
pub const SUBJECT: &str = "Subject";
pub const DESTINATION: &str = "Destination";
pub const SETUP_TIME: &str = "SetupTime";
pub const PDD: &str = "PDD";
pub const ANSWER_TIME: &str = "AnswerTime";
pub const USAGE: &str = "Usage";
pub const SUPPLIER: &str = "Supplier";
pub const DISCONNECT_CAUSE: &str = "DisconnectCause";
pub const COST: &str = "Cost";
pub const PRE_RATED: &str = "PreRated";

/// Build a `*req.<field>` path.
pub fn req_path(field: &str) -> String {
    format!("{}{}{}", META_REQ, NESTING_SEP, field)
}

/// Build a `~*req.<field>` dynamic reference.
pub fn req_ref(field: &str) -> String {
    format!("{}{}", DYNAMIC_DATA_PREFIX, req_path(field))
}
