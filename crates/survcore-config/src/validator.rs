//! Runtime sanity checks for loaded configurations.

use crate::loader::ConfigError;
use crate::schema::{Config, Feature};

impl Config {
    /// Validate the configuration, rejecting values that would make the
    /// coordination core misbehave rather than merely look odd.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requests.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "requests.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        if self.maintenance.sweep_interval_seconds == 0 {
            return Err(ConfigError::Validation(
                "maintenance.sweep_interval_seconds must be greater than zero".to_string(),
            ));
        }

        for feature in Feature::ALL {
            let settings = self.features.get(feature);
            if settings.teleport_delay_seconds > 3600 {
                return Err(ConfigError::Validation(format!(
                    "features.{}.teleport_delay_seconds must be at most 3600",
                    feature.key()
                )));
            }
        }

        for (key, template) in self.messages.iter() {
            if template.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }

        Ok(())
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> survcore_common::Result<()> {
        config.validate().map_err(Into::into)
    }
}
