// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure conversions from legacy record shapes to current ones

mod alias;
mod derived_chargers;
mod filters;

pub use alias::alias_to_attribute_profile;
pub use derived_chargers::{derived_chargers_to_profiles, ChargerPair, CHARGER_PROFILE_WEIGHT};
pub use filters::{
    filter_v1_to_v4, filter_v2_to_v4, filter_v3_to_v4, filter_v4_to_v5, inline_filter_v1,
    inline_filter_v2, migrate_rsr_filter_v4, FilterError,
};
