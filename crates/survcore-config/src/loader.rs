//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading or writing a configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for survcore_common::SurvCoreError {
    fn from(err: ConfigError) -> Self {
        survcore_common::SurvCoreError::config(err.to_string())
    }
}

/// Configuration loader for the plugin core
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from the conventional locations, falling back
    /// to defaults when no file is present
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var("SURVCORE_CONFIG_PATH") {
            return Self::load_config(&config_path);
        }
        if Path::new("config.yaml").exists() {
            return Self::load_config("config.yaml");
        }
        if Path::new("config.yml").exists() {
            return Self::load_config("config.yml");
        }

        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to a file, for first-boot setup
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(&Config::default())?;
        std::fs::write(path.as_ref(), yaml)?;
        info!(
            "Wrote default configuration to {}",
            path.as_ref().display()
        );
        Ok(())
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(timeout) = env::var("SURVCORE_REQUEST_TIMEOUT") {
            config.requests.timeout_seconds =
                timeout.parse().map_err(|e| ConfigError::EnvParse {
                    var: "SURVCORE_REQUEST_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(interval) = env::var("SURVCORE_SWEEP_INTERVAL") {
            config.maintenance.sweep_interval_seconds =
                interval.parse().map_err(|e| ConfigError::EnvParse {
                    var: "SURVCORE_SWEEP_INTERVAL".to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(())
    }
}
