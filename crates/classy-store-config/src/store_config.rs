//! Store configuration
//!
//! Configuration loaded from .classy-store.toml.

use serde::{Deserialize, Serialize};

/// What to do when two reducers claim the same stateName
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Abort assembly with an error
    #[default]
    Reject,
    /// Keep the reducer listed last, warn about the one it replaces
    LastWins,
}

/// Store configuration loaded from .classy-store.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// How colliding stateNames are resolved during assembly
    #[serde(default)]
    pub duplicate_state_names: DuplicatePolicy,

    /// Install the action logging middleware
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,

    /// Level at which dispatched actions are logged
    #[serde(default = "default_action_log_level")]
    pub action_log_level: log::Level,
}

fn default_log_actions() -> bool {
    true
}

fn default_action_log_level() -> log::Level {
    log::Level::Debug
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            duplicate_state_names: DuplicatePolicy::default(),
            log_actions: default_log_actions(),
            action_log_level: default_action_log_level(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded store config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default store config");
        Self::default()
    }
}
