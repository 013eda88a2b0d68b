//! Configuration management.
//!
//! Stores configuration in JSON format at `~/.portscope/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::{DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_ATTEMPTS};
use crate::error::{Error, Result};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Host the service's own listener binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// First port tried for the service's own listener.
    #[serde(default = "default_preferred_port")]
    pub preferred_port: u16,

    /// Number of consecutive ports probed before giving up.
    #[serde(default = "default_max_port_attempts")]
    pub max_port_attempts: u32,

    /// Time budget for each lsof/ps invocation, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Maximum number of memoized process detail lookups.
    #[serde(default = "default_detail_cache_capacity")]
    pub detail_cache_capacity: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_preferred_port() -> u16 {
    5000
}

fn default_max_port_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_command_timeout_secs() -> u64 {
    10
}

fn default_detail_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            preferred_port: default_preferred_port(),
            max_port_attempts: default_max_port_attempts(),
            command_timeout_secs: default_command_timeout_secs(),
            detail_cache_capacity: default_detail_cache_capacity(),
        }
    }
}

impl Config {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    /// Set one field by its JSON key (e.g. `preferredPort`).
    ///
    /// `value` is read as JSON first, so `8080` is a number and `"8080"` a
    /// string. Anything that is not valid JSON is taken as a plain string.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut fields = serde_json::to_value(&*self)?;
        let slot = fields
            .get_mut(key)
            .ok_or_else(|| Error::Config(format!("Unknown config key '{}'", key)))?;

        *slot = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

        *self = serde_json::from_value(fields)?;
        Ok(())
    }
}

/// Configuration store.
///
/// Handles reading and writing configuration to `~/.portscope/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.portscope/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".portscope").join("config.json"),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).await.map_err(|e| {
                    Error::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}
