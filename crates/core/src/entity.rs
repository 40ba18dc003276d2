// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalogue of migratable entities.
//!
//! Every entity has a version-vector key, a task name used on the command
//! line, the store family its data lives in, the schema version this release
//! expects, and the layout of its records.

use crate::meta::{
    ALIAS_PREFIX, ATTRIBUTE_PROFILE_PREFIX, CHARGER_PROFILE_PREFIX, DERIVED_CHARGERS_PREFIX,
    FILTER_PREFIX, STAT_QUEUE_PROFILE_PREFIX,
};
use serde::{Serialize, Serializer};

/// Which pair of stores an entity lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFamily {
    /// Key-value/document store holding profiles, filters, aliases, chargers.
    Data,
    /// Transactional store holding CDRs, session costs and tariff-plan tables.
    Stor,
}

/// Version keys starting with this marker belong to the stor family.
pub const TRANSFER_TABLE_MARKER: &str = "Tp";

impl StoreFamily {
    /// Family of a version-vector key.
    pub fn of_key(key: &str) -> Self {
        if key == "CDRs" || key == "SessionSCosts" || key.starts_with(TRANSFER_TABLE_MARKER) {
            StoreFamily::Stor
        } else {
            StoreFamily::Data
        }
    }
}

impl std::fmt::Display for StoreFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreFamily::Data => f.write_str("data_db"),
            StoreFamily::Stor => f.write_str("stor_db"),
        }
    }
}

/// Where an entity's records are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Documents in the key-value space under any of these key prefixes.
    Documents(&'static [&'static str]),
    /// Rows of a table grouped by a natural key.
    Rows {
        table: &'static str,
        key_columns: &'static [&'static str],
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entity {
    Accounts,
    Actions,
    ActionTriggers,
    ActionPlans,
    SharedGroups,
    Destinations,
    ReverseDestinations,
    RatingPlans,
    RatingProfiles,
    Timings,
    Filters,
    Thresholds,
    Stats,
    Resources,
    Routes,
    Attributes,
    Chargers,
    Dispatchers,
    Aliases,
    DerivedChargers,
    Cdrs,
    SessionsCosts,
    TpTimings,
    TpDestinations,
    TpRates,
    TpDestinationRates,
    TpRatingPlans,
    TpRatingProfiles,
    TpSharedGroups,
    TpActions,
    TpActionPlans,
    TpActionTriggers,
    TpAccountActions,
    TpResources,
    TpStats,
    TpThresholds,
    TpFilters,
    TpRoutes,
    TpAttributes,
    TpChargers,
    TpDispatchers,
}

struct EntityDef {
    entity: Entity,
    key: &'static str,
    task: &'static str,
    current: u64,
    layout: Layout,
}

const TP_ID: &[&str] = &["tpid", "id"];
const TP_TENANT_ID: &[&str] = &["tpid", "tenant", "id"];

const fn docs(
    entity: Entity,
    key: &'static str,
    task: &'static str,
    current: u64,
    prefixes: &'static [&'static str],
) -> EntityDef {
    EntityDef {
        entity,
        key,
        task,
        current,
        layout: Layout::Documents(prefixes),
    }
}

const fn rows(
    entity: Entity,
    key: &'static str,
    task: &'static str,
    current: u64,
    table: &'static str,
    key_columns: &'static [&'static str],
) -> EntityDef {
    EntityDef {
        entity,
        key,
        task,
        current,
        layout: Layout::Rows { table, key_columns },
    }
}

// Indexed by `Entity as usize`; order must follow the enum.
const CATALOGUE: &[EntityDef] = &[
    docs(Entity::Accounts, "Accounts", "*accounts", 3, &["acc_"]),
    docs(Entity::Actions, "Actions", "*actions", 2, &["act_"]),
    docs(Entity::ActionTriggers, "ActionTriggers", "*action_triggers", 2, &["atr_"]),
    docs(Entity::ActionPlans, "ActionPlans", "*action_plans", 3, &["apl_", "aap_"]),
    docs(Entity::SharedGroups, "SharedGroups", "*shared_groups", 2, &["shg_"]),
    docs(Entity::Destinations, "Destinations", "*destinations", 1, &["dst_"]),
    docs(Entity::ReverseDestinations, "ReverseDestinations", "*reverse_destinations", 1, &["rds_"]),
    docs(Entity::RatingPlans, "RatingPlan", "*rating_plans", 1, &["rpl_"]),
    docs(Entity::RatingProfiles, "RatingProfile", "*rating_profiles", 1, &["rpf_"]),
    docs(Entity::Timings, "Timing", "*timings", 1, &["tmg_"]),
    docs(Entity::Filters, "RQF", "*filters", 5, &[FILTER_PREFIX]),
    docs(Entity::Thresholds, "Thresholds", "*thresholds", 3, &["thp_", "thd_"]),
    docs(Entity::Stats, "Stats", "*stats", 2, &[STAT_QUEUE_PROFILE_PREFIX, "stq_"]),
    docs(Entity::Resources, "Resource", "*resources", 1, &["rsp_", "res_"]),
    docs(Entity::Routes, "Routes", "*routes", 1, &["rpp_"]),
    docs(Entity::Attributes, "Attributes", "*attributes", 5, &[ATTRIBUTE_PROFILE_PREFIX]),
    docs(Entity::Chargers, "Chargers", "*chargers", 1, &[CHARGER_PROFILE_PREFIX]),
    docs(Entity::Dispatchers, "Dispatchers", "*dispatchers", 2, &["dpp_", "dph_"]),
    docs(Entity::Aliases, "Alias", "*aliases", 2, &[ALIAS_PREFIX]),
    docs(
        Entity::DerivedChargers,
        "DerivedChargers",
        "*derived_chargers",
        2,
        &[DERIVED_CHARGERS_PREFIX],
    ),
    rows(Entity::Cdrs, "CDRs", "*cdrs", 2, "cdrs", &["cgrid", "run_id", "origin_id"]),
    rows(
        Entity::SessionsCosts,
        "SessionSCosts",
        "*sessions_costs",
        2,
        "session_costs",
        &["cgrid", "run_id"],
    ),
    rows(Entity::TpTimings, "TpTiming", "*tp_timings", 1, "tp_timings", TP_ID),
    rows(Entity::TpDestinations, "TpDestinations", "*tp_destinations", 1, "tp_destinations", TP_ID),
    rows(Entity::TpRates, "TpRates", "*tp_rates", 1, "tp_rates", TP_ID),
    rows(
        Entity::TpDestinationRates,
        "TpDestinationRates",
        "*tp_destination_rates",
        1,
        "tp_destination_rates",
        TP_ID,
    ),
    rows(Entity::TpRatingPlans, "TpRatingPlans", "*tp_rating_plans", 1, "tp_rating_plans", TP_ID),
    rows(
        Entity::TpRatingProfiles,
        "TpRatingProfiles",
        "*tp_rating_profiles",
        1,
        "tp_rating_profiles",
        &["tpid", "loadid", "tenant", "category", "subject"],
    ),
    rows(
        Entity::TpSharedGroups,
        "TpSharedGroups",
        "*tp_shared_groups",
        1,
        "tp_shared_groups",
        TP_ID,
    ),
    rows(Entity::TpActions, "TpActions", "*tp_actions", 1, "tp_actions", TP_ID),
    rows(Entity::TpActionPlans, "TpActionPlans", "*tp_action_plans", 1, "tp_action_plans", TP_ID),
    rows(
        Entity::TpActionTriggers,
        "TpActionTriggers",
        "*tp_action_triggers",
        1,
        "tp_action_triggers",
        TP_ID,
    ),
    rows(
        Entity::TpAccountActions,
        "TpAccountActions",
        "*tp_account_actions",
        1,
        "tp_account_actions",
        &["tpid", "loadid", "tenant", "account"],
    ),
    rows(Entity::TpResources, "TpResources", "*tp_resources", 1, "tp_resources", TP_TENANT_ID),
    rows(Entity::TpStats, "TpStats", "*tp_stats", 1, "tp_stats", TP_TENANT_ID),
    rows(Entity::TpThresholds, "TpThresholds", "*tp_thresholds", 1, "tp_thresholds", TP_TENANT_ID),
    rows(Entity::TpFilters, "TpFilters", "*tp_filters", 1, "tp_filters", TP_TENANT_ID),
    rows(Entity::TpRoutes, "TpRoutes", "*tp_routes", 1, "tp_routes", TP_TENANT_ID),
    rows(Entity::TpAttributes, "TpAttributes", "*tp_attributes", 1, "tp_attributes", TP_TENANT_ID),
    rows(Entity::TpChargers, "TpChargers", "*tp_chargers", 1, "tp_chargers", TP_TENANT_ID),
    rows(
        Entity::TpDispatchers,
        "TpDispatchers",
        "*tp_dispatchers",
        1,
        "tp_dispatchers",
        TP_TENANT_ID,
    ),
];

impl Entity {
    fn def(self) -> &'static EntityDef {
        &CATALOGUE[self as usize]
    }

    /// Every entity, in catalogue order.
    pub fn all() -> impl Iterator<Item = Entity> {
        CATALOGUE.iter().map(|d| d.entity)
    }

    /// Every entity of one family, in catalogue order.
    pub fn of_family(family: StoreFamily) -> impl Iterator<Item = Entity> {
        Self::all().filter(move |e| e.family() == family)
    }

    /// Look up an entity by its task name (e.g. `*aliases`).
    pub fn from_task_name(name: &str) -> Option<Entity> {
        CATALOGUE.iter().find(|d| d.task == name).map(|d| d.entity)
    }

    /// Key of this entity in a version vector.
    pub fn version_key(self) -> &'static str {
        self.def().key
    }

    pub fn task_name(self) -> &'static str {
        self.def().task
    }

    /// Schema version expected by this release.
    pub fn current_version(self) -> u64 {
        self.def().current
    }

    pub fn layout(self) -> Layout {
        self.def().layout
    }

    pub fn family(self) -> StoreFamily {
        StoreFamily::of_key(self.version_key())
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.version_key())
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.version_key())
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
