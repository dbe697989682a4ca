// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The loaded configuration together with the store it came from.

use crate::config::{ConfigStore, Configuration};
use crate::error::ConfigError;

/// Mutable bootstrap state passed to every operation that reads or updates
/// the configuration.
#[derive(Debug, Clone)]
pub struct BootstrapContext {
    /// The in-memory configuration.
    pub config: Configuration,
    store: ConfigStore,
}

impl BootstrapContext {
    /// Wrap an already loaded configuration.
    pub fn new(config: Configuration, store: ConfigStore) -> Self {
        Self { config, store }
    }

    /// Load the configuration from `store`.
    pub fn load(store: ConfigStore) -> Result<Self, ConfigError> {
        let config = store.load()?;
        Ok(Self::new(config, store))
    }

    /// Write the configuration back to its file.
    pub fn persist(&self) -> Result<(), ConfigError> {
        self.store.save(&self.config)
    }

    /// The store the configuration is persisted to.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Configured region, or the default.
    pub fn region(&self) -> &str {
        self.config.region()
    }

    /// Configured project name, or the default.
    pub fn project_name(&self) -> &str {
        self.config.project_name()
    }
}
