//! Application settings and their discovery
//!
//! Settings come from one of three places, first hit wins:
//! 1. An explicit file passed on the command line
//! 2. `<vault>/.atlas/config.toml`
//! 3. Built-in defaults
//!
//! Every section is optional in the file; absent keys take their defaults.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory inside the vault holding Atlas files
pub const ATLAS_DIR: &str = ".atlas";
/// Settings file name inside [`ATLAS_DIR`]
pub const CONFIG_FILE: &str = "config.toml";
/// Schema document file name inside [`ATLAS_DIR`]
pub const SCHEMAS_FILE: &str = "schemas.json";

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub vault: VaultConfig,
    pub schemas: SchemaConfig,
    pub logging: LoggingConfig,
}

/// Which files of the vault are considered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// File extensions to include, without the dot
    pub extensions: Vec<String>,
    /// Folder names skipped wherever they appear
    pub exclude_folders: Vec<String>,
    /// Whether dot-prefixed files and folders are visited
    pub include_hidden: bool,
    pub max_depth: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            exclude_folders: vec![
                ATLAS_DIR.to_string(),
                ".obsidian".to_string(),
                ".trash".to_string(),
            ],
            include_hidden: false,
            max_depth: 32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Schema document location; relative paths are taken from the vault root
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AtlasConfig {
    /// Parse settings from TOML text
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Location of the schema document for a vault
    pub fn schema_path(&self, vault_root: &Path) -> PathBuf {
        match &self.schemas.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => vault_root.join(path),
            None => vault_root.join(ATLAS_DIR).join(SCHEMAS_FILE),
        }
    }
}

/// Reject settings the vault walker cannot work with
pub fn validate_config(config: &AtlasConfig) -> ConfigResult<()> {
    if config.vault.extensions.is_empty() {
        return Err(ConfigError::invalid_value(
            "vault.extensions",
            "at least one extension is required",
        ));
    }
    if config.vault.extensions.iter().any(|e| e.trim().is_empty()) {
        return Err(ConfigError::invalid_value(
            "vault.extensions",
            "extensions must not be blank",
        ));
    }
    if config.vault.max_depth == 0 {
        return Err(ConfigError::invalid_value(
            "vault.max_depth",
            "must be greater than zero",
        ));
    }
    Ok(())
}

/// Where the active settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Discovered(PathBuf),
    Defaults,
}

/// Settings plus their origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AtlasConfig,
    pub source: ConfigSource,
}

/// Resolves settings for a vault
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discovered settings path for a vault
    pub fn vault_config_path(vault_root: &Path) -> PathBuf {
        vault_root.join(ATLAS_DIR).join(CONFIG_FILE)
    }

    /// Load settings for `vault_root`
    ///
    /// An `explicit` path that does not exist is an error. A missing
    /// `.atlas/config.toml` falls back to defaults. The result is validated.
    pub fn load(vault_root: &Path, explicit: Option<&Path>) -> ConfigResult<LoadedConfig> {
        let loaded = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                LoadedConfig {
                    config: Self::read(path)?,
                    source: ConfigSource::Explicit(path.to_path_buf()),
                }
            }
            None => {
                let discovered = Self::vault_config_path(vault_root);
                if discovered.exists() {
                    LoadedConfig {
                        config: Self::read(&discovered)?,
                        source: ConfigSource::Discovered(discovered),
                    }
                } else {
                    LoadedConfig {
                        config: AtlasConfig::default(),
                        source: ConfigSource::Defaults,
                    }
                }
            }
        };

        validate_config(&loaded.config)?;
        debug!(source = ?loaded.source, "loaded settings");
        Ok(loaded)
    }

    fn read(path: &Path) -> ConfigResult<AtlasConfig> {
        let contents = fs::read_to_string(path)?;
        AtlasConfig::from_toml(&contents)
    }
}
