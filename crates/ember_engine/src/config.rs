//! Engine configuration loading
//!
//! Configuration is TOML with serde-derived types and sensible defaults, so
//! an empty file (or no file at all) yields a runnable engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::WindowConfig;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Log filter applied at startup (e.g. `"info,ember_engine=debug"`);
    /// `None` defers to the `RUST_LOG` environment variable
    pub log_filter: Option<String>,
}

impl EngineConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file contents are not valid TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_partial_window_section() {
        let config = EngineConfig::from_toml_str(
            r#"
            log_filter = "debug"

            [window]
            title = "Sandbox"
            width = 800
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Sandbox");
        assert_eq!(config.window.width, 800);
        // Unspecified fields keep their defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = EngineConfig::from_toml_str("window = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
