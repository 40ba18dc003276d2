// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rmig-core: data model for the rating data migrator

pub mod entity;
pub mod filter;
pub mod key;
pub mod legacy;
pub mod meta;
pub mod profile;
pub mod rsr;
pub mod versions;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use entity::{Entity, Layout, StoreFamily};
pub use filter::{Filter, FilterRule, InlineFilter};
pub use key::{concatenated_key, split_tenant_id, tenant_id, KeyField};
pub use legacy::{
    AliasValue, DerivedChargerKey, FieldOverride, V1Alias, V1DerivedCharger, V1DerivedChargers,
    V1Filter, V1FilterRule,
};
pub use profile::{ActivationInterval, Attribute, AttributeProfile, AttributeType, ChargerProfile};
pub use rsr::{RsrError, RsrParser, RsrParsers};
pub use versions::Versions;
