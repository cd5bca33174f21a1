// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! avcfg configuration file.
//!
//! ```toml
//! [store]
//! dir = "/var/lib/avcfg"
//! key = 0xFFFF
//!
//! [log]
//! level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use nvram::{SettingKey, EEPROM_KEY};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AVCFG_CONFIG";
/// Environment variable overriding the store directory.
pub const STORE_DIR_ENV: &str = "AVCFG_STORE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
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
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding one `<key>.nvs` file per setting block.
    pub dir: Option<PathBuf>,
    /// Store key of the settings blob.
    pub key: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub level: Option<String>,
}

impl Config {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load `path`. No path means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(path, &text)
    }

    pub fn key(&self) -> SettingKey {
        self.store.key.map(SettingKey).unwrap_or(EEPROM_KEY)
    }

    /// Store directory: `override_dir` (flag or env), then the config file,
    /// then the per-user data directory.
    pub fn store_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.store.dir {
            return dir.clone();
        }
        dirs_next::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("avcfg")
    }
}
