//! Common types and utilities shared across the survcore workspace

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, SurvCoreError};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::*;
