// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Rating data migration engine

pub mod convert;
mod error;
mod migrator;
mod registry;
pub mod resolver;
mod stats;
pub mod steps;

pub use error::{MigrateError, MigrationFailure};
pub use migrator::{
    Migrator, MigratorOptions, Stores, DATA_DB, DEFAULT_TENANT, SET_VERSIONS, STOR_DB,
};
pub use registry::StepRegistry;
pub use resolver::VersionStatus;
pub use stats::MigrationStats;
