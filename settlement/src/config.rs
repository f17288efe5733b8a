//! Configuration for settlement engine

use serde::{Deserialize, Serialize};

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Group notification configuration
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Collect Prometheus metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "settlement-engine".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            notifications: NotificationConfig::default(),
            metrics_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Group notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Publish a settlement event after each run
    pub enabled: bool,

    /// Minimum seconds between notifications with the same key
    pub debounce_seconds: u64,

    /// First line of every message
    #[serde(default)]
    pub heading: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_seconds: 60,
            heading: None,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`
    pub fn with_env_overrides(mut self) -> crate::Result<Self> {
        if let Ok(name) = std::env::var("SETTLEMENT_SERVICE_NAME") {
            self.service_name = name;
        }

        if let Ok(secs) = std::env::var("SETTLEMENT_NOTIFY_DEBOUNCE_SECS") {
            self.notifications.debounce_seconds = secs.parse().map_err(|e| {
                crate::Error::Config(format!("SETTLEMENT_NOTIFY_DEBOUNCE_SECS: {}", e))
            })?;
        }

        if let Ok(enabled) = std::env::var("SETTLEMENT_NOTIFY_ENABLED") {
            self.notifications.enabled = enabled.parse().map_err(|e| {
                crate::Error::Config(format!("SETTLEMENT_NOTIFY_ENABLED: {}", e))
            })?;
        }

        Ok(self)
    }
}
