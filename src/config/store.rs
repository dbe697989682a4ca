// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration loading from and saving to disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::types::Configuration;

/// Config file name inside the configuration directory.
pub const CONFIG_FILE: &str = "config.json";

/// Reads and writes the configuration document at a fixed path.
///
/// Writes replace the whole file and are not atomic.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `config.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(CONFIG_FILE))
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the configuration file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Load the configuration, or an empty one if the file does not exist.
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file, starting empty");
            return Ok(Configuration::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Configuration::default());
        }
        serde_json::from_str(&content).map_err(ConfigError::from)
    }

    /// Overwrite the file with pretty-printed JSON.
    pub fn save(&self, config: &Configuration) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(temp.path());
        let config = store.load().unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(temp.path());

        let mut config = Configuration {
            project_name: Some("demo".to_string()),
            secret_name: Some("demo/credentials".to_string()),
            ..Default::default()
        };
        config.cognito.client_id = Some("abc123".to_string());
        store.save(&config).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"projectName\": \"demo\""));

        let loaded = store.load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(temp.path());
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_store_paths() {
        let store = ConfigStore::in_dir("/opt/app");
        assert_eq!(store.path(), Path::new("/opt/app/config.json"));
        assert_eq!(store.dir(), Path::new("/opt/app"));
    }
}
