//! Configuration loading and management for the sales ingestion engine.
//!
//! This module loads the import settings and the operator roster from YAML
//! files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use sales_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sample").unwrap();
//! println!("Reference year: {}", config.settings().year());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_DELIMITER, EngineConfig, ImportSettings, RosterConfig, SUPPORTED_DELIMITERS,
};
