//! Configuration for the survcore plugin core: serde schema, defaults
//! matching the shipped config files, YAML loading with environment
//! overrides, validation, and a hot-reload cache.

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::ConfigCache;
pub use loader::{ConfigError, ConfigLoader};
pub use schema::{
    Config, Feature, FeatureConfig, FeaturesConfig, MaintenanceConfig, MessagesConfig,
    RequestsConfig,
};
pub use validator::ConfigValidator;
