//! Thread-safe configuration caching with arc-swap for lock-free reads.
//!
//! Command handlers read settings on every invocation; a reload replaces
//! the whole snapshot atomically without stalling those readers.

use crate::schema::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Lock-free configuration cache.
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a new cache holding the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Gets the current configuration snapshot.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Replaces the configuration atomically.
    pub fn update(&self, config: Config) {
        self.config.store(Arc::new(config));
        info!("Configuration reloaded");
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
