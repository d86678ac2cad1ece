//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading import settings
//! and the operator roster from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::OperatorRoster;

use super::types::{EngineConfig, ImportSettings, RosterConfig, SUPPORTED_DELIMITERS};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/sample/
/// ├── import.yaml   # Reference year, delimiter, error cap
/// └── roster.yaml   # Stores and operators with monthly targets
/// ```
///
/// # Example
///
/// ```no_run
/// use sales_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sample")?;
/// println!("{} operators", loader.roster().len());
/// # Ok::<(), sales_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or malformed, if the
    /// delimiter is unsupported, or if the roster fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let import_path = path.join("import.yaml");
        let settings = Self::load_yaml::<ImportSettings>(&import_path)?;
        if !SUPPORTED_DELIMITERS.contains(&settings.delimiter) {
            return Err(EngineError::ConfigParseError {
                path: import_path.display().to_string(),
                message: format!("unsupported delimiter {:?}", settings.delimiter),
            });
        }

        let roster_path = path.join("roster.yaml");
        let roster_config = Self::load_yaml::<RosterConfig>(&roster_path)?;
        let roster = OperatorRoster::new(roster_config.stores, roster_config.operators)?;

        tracing::debug!(
            config_dir = %path.display(),
            operators = roster.len(),
            stores = roster.stores().len(),
            "Loaded configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, roster),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Returns the import settings.
    pub fn settings(&self) -> &ImportSettings {
        self.config.settings()
    }

    /// Returns the operator roster.
    pub fn roster(&self) -> &OperatorRoster {
        self.config.roster()
    }
}
