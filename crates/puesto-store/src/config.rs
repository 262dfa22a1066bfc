//! # Store Configuration
//!
//! Configuration for the synchronization store and the transport driver
//! the bootstrap layer wires in front of it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PUESTO_DATABASE_URL=https://...                                    │
//! │     PUESTO_NAMESPACE=sucursal-centro                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/puesto/store.toml (Linux)                                │
//! │     ~/Library/Application Support/co.puesto.puesto/store.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # store.toml
//! [database]
//! url = "https://puesto-demo-default-rtdb.example.com"
//! namespace = ""   # optional path prefix for multi-tenant hosting
//!
//! [store]
//! event_buffer = 64
//! command_buffer = 64
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Database Settings
// =============================================================================

/// Settings for the remote document store the transport driver talks to.
///
/// The driver itself is an external collaborator; the store only carries
/// its addressing so the bootstrap layer has one config surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Base URL of the hosted document store.
    #[serde(default)]
    pub url: Option<String>,

    /// Optional path prefix prepended to every collection path.
    #[serde(default)]
    pub namespace: String,
}

// =============================================================================
// Store Settings
// =============================================================================

/// Channel sizing for the store's event loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Buffer for decoded snapshot events (five listeners feed it).
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Buffer for presentation-layer commands.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

fn default_event_buffer() -> usize {
    64
}

fn default_command_buffer() -> usize {
    64
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            event_buffer: default_event_buffer(),
            command_buffer: default_command_buffer(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Remote document store addressing.
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Event-loop channel sizing.
    #[serde(default)]
    pub store: StoreSettings,
}

impl StoreConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (store.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(ref url) = self.database.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StoreError::InvalidConfig(format!(
                    "Database URL must start with http:// or https://, got: {url}"
                )));
            }
        }

        if self.store.event_buffer == 0 {
            return Err(StoreError::InvalidConfig(
                "event_buffer must be greater than 0".into(),
            ));
        }

        if self.store.command_buffer == 0 {
            return Err(StoreError::InvalidConfig(
                "command_buffer must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PUESTO_DATABASE_URL") {
            debug!(url = %url, "Overriding database URL from environment");
            self.database.url = Some(url);
        }

        if let Ok(namespace) = std::env::var("PUESTO_NAMESPACE") {
            self.database.namespace = namespace;
        }

        if let Ok(buffer) = std::env::var("PUESTO_EVENT_BUFFER") {
            if let Ok(n) = buffer.parse::<usize>() {
                self.store.event_buffer = n;
            }
        }

        if let Ok(buffer) = std::env::var("PUESTO_COMMAND_BUFFER") {
            if let Ok(n) = buffer.parse::<usize>() {
                self.store.command_buffer = n;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("co", "puesto", "puesto")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.event_buffer, 64);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = StoreConfig::default();
        config.database.url = Some("ftp://nope".into());
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.store.event_buffer = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = StoreConfig::default();
        config.database.url = Some("https://puesto-demo.example.com".into());
        config.database.namespace = "sucursal-centro".into();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[store]"));

        let parsed: StoreConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.database.namespace, "sucursal-centro");
        assert_eq!(parsed.store.command_buffer, 64);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");

        let mut config = StoreConfig::default();
        config.database.url = Some("https://puesto-demo.example.com".into());
        config.save(Some(path.clone())).unwrap();

        let loaded = StoreConfig::load(Some(path)).unwrap();
        assert_eq!(
            loaded.database.url.as_deref(),
            Some("https://puesto-demo.example.com")
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.store.event_buffer, 64);
    }
}
