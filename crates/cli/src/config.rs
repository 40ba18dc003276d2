// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmig.toml` loading and store wiring.
//!
//! ```toml
//! [general]
//! default_tenant = "cgrates.org"
//!
//! [data_db_in]
//! kind = "file"
//! path = "data.db"
//!
//! [data_db_out]
//! kind = "file"
//! path = "data-v2.db"
//! ```
//!
//! A missing store section is in-memory; a missing `_out` section reuses its
//! `_in` section. Sections of one family that name the same store share it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rmig_engine::{MigratorOptions, Stores, DEFAULT_TENANT};
use rmig_storage::{FileStore, MemoryStore, RecordStore, StoreError};
use serde::Deserialize;
use thiserror::Error;

use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("data_db and stor_db cannot share the store at {}", .0.display())]
    SharedAcrossFamilies(PathBuf),
    #[error("failed to open [{section}] store: {source}")]
    Open {
        section: &'static str,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    pub data_db_in: Option<StoreConfig>,
    pub data_db_out: Option<StoreConfig>,
    pub stor_db_in: Option<StoreConfig>,
    pub stor_db_out: Option<StoreConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct General {
    pub default_tenant: String,
    pub dry_run: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            default_tenant: DEFAULT_TENANT.to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    #[default]
    Memory,
    File {
        path: PathBuf,
        #[serde(default)]
        compression_level: Option<i32>,
    },
}

impl StoreConfig {
    /// Two configs with the same identity open the same physical store.
    fn identity(&self) -> Option<PathBuf> {
        match self {
            StoreConfig::Memory => None,
            StoreConfig::File { path, .. } => Some(canonical(path)),
        }
    }

    fn open(&self, section: &'static str) -> Result<Arc<dyn RecordStore>, ConfigError> {
        match self {
            StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreConfig::File {
                path,
                compression_level,
            } => {
                let mut store = FileStore::open(path)
                    .map_err(|source| ConfigError::Open { section, source })?;
                if let Some(level) = compression_level {
                    store = store.with_compression_level(*level);
                }
                tracing::debug!(section, path = %path.display(), "opened file store");
                Ok(Arc::new(store))
            }
        }
    }

    fn resolve_relative(&mut self, base: &Path) {
        if let StoreConfig::File { path, .. } = self {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Resolve `..` and symlinks so two spellings of one file compare equal.
/// A file that does not exist yet is resolved through its directory.
fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    parent
        .canonicalize()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Config {
    /// Load the config: `--config` flag, then `RMIG_CONFIG`, then
    /// `./rmig.toml` when present. With none of them, all stores are
    /// in-memory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit.map(Path::to_path_buf).or_else(env::config_path) {
            Some(path) => path,
            None => {
                let default = PathBuf::from(env::DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("no config file, using in-memory stores");
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse `content` read from `path`. Relative store paths are taken
    /// relative to the config file's directory.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new(""));
        for section in [
            &mut config.data_db_in,
            &mut config.data_db_out,
            &mut config.stor_db_in,
            &mut config.stor_db_out,
        ]
        .into_iter()
        .flatten()
        {
            section.resolve_relative(base);
        }
        Ok(config)
    }

    pub fn data_in(&self) -> StoreConfig {
        self.data_db_in.clone().unwrap_or_default()
    }

    pub fn data_out(&self) -> StoreConfig {
        self.data_db_out.clone().unwrap_or_else(|| self.data_in())
    }

    pub fn stor_in(&self) -> StoreConfig {
        self.stor_db_in.clone().unwrap_or_default()
    }

    pub fn stor_out(&self) -> StoreConfig {
        self.stor_db_out.clone().unwrap_or_else(|| self.stor_in())
    }

    pub fn same_data_db(&self) -> bool {
        self.data_in().identity() == self.data_out().identity()
    }

    pub fn same_stor_db(&self) -> bool {
        self.stor_in().identity() == self.stor_out().identity()
    }

    /// Migrator options; `dry_run` on the command line adds to the config's.
    pub fn options(&self, dry_run: bool) -> MigratorOptions {
        MigratorOptions {
            dry_run: dry_run || self.general.dry_run,
            same_data_db: self.same_data_db(),
            same_stor_db: self.same_stor_db(),
            default_tenant: self.general.default_tenant.clone(),
        }
    }

    /// Open the four stores, sharing one store wherever a family's in and
    /// out sections name the same one.
    pub fn open_stores(&self) -> Result<Stores, ConfigError> {
        let data = [self.data_in(), self.data_out()];
        let stor = [self.stor_in(), self.stor_out()];
        for d in data.iter().filter_map(StoreConfig::identity) {
            if stor.iter().filter_map(StoreConfig::identity).any(|s| s == d) {
                return Err(ConfigError::SharedAcrossFamilies(d));
            }
        }

        let data_in = data[0].open("data_db_in")?;
        let data_out = if self.same_data_db() {
            Arc::clone(&data_in)
        } else {
            data[1].open("data_db_out")?
        };
        let stor_in = stor[0].open("stor_db_in")?;
        let stor_out = if self.same_stor_db() {
            Arc::clone(&stor_in)
        } else {
            stor[1].open("stor_db_out")?
        };
        Ok(Stores {
            data_in,
            data_out,
            stor_in,
            stor_out,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
