//! Configuration for the clipboard monitor
//!
//! Loading, validating, and defaulting the monitor settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Validation error
    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Delay between clipboard polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum clipboard text size accepted by the monitor, in bytes
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_size: default_max_size(),
        }
    }
}

impl MonitorConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_size == 0 {
            return Err(ConfigError::Validation(
                "max_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_size() -> usize {
    crate::clipboard::MAX_CLIPBOARD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.max_size, crate::clipboard::MAX_CLIPBOARD_SIZE);
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let config = MonitorConfig::from_toml_str(
            r#"
            poll_interval_ms = 250
            max_size = 1024
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            MonitorConfig {
                poll_interval_ms: 250,
                max_size: 1024,
            }
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = MonitorConfig::from_toml_str("poll_interval_ms = 50").unwrap();
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.max_size, crate::clipboard::MAX_CLIPBOARD_SIZE);

        let config = MonitorConfig::from_toml_str("").unwrap();
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = MonitorConfig::from_toml_str("poll_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = MonitorConfig::from_toml_str("poll_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
