//! Configuration types for sales ingestion.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{OperatorRoster, RosterEntry, Store};

/// Delimiter used by the sales export.
pub const DEFAULT_DELIMITER: char = ',';

/// Delimiters the importer accepts.
pub const SUPPORTED_DELIMITERS: [char; 3] = [',', ';', '\t'];

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

/// Import behaviour, loaded from `import.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Year applied to `<dia> de <mês>` dates; the current year when absent.
    #[serde(default)]
    pub reference_year: Option<i32>,
    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Maximum number of messages kept in the summary's `erros` list.
    #[serde(default)]
    pub max_reported_errors: Option<usize>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            reference_year: None,
            delimiter: DEFAULT_DELIMITER,
            max_reported_errors: None,
        }
    }
}

impl ImportSettings {
    /// Returns settings fixed to a reference year.
    pub fn for_year(year: i32) -> Self {
        Self {
            reference_year: Some(year),
            ..Self::default()
        }
    }

    /// Returns the reference year, falling back to the current year.
    pub fn year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Returns the delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        if SUPPORTED_DELIMITERS.contains(&self.delimiter) {
            self.delimiter as u8
        } else {
            DEFAULT_DELIMITER as u8
        }
    }
}

/// Roster configuration file structure, loaded from `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Stores operators can be assigned to.
    pub stores: Vec<Store>,
    /// Known operators.
    pub operators: Vec<RosterEntry>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: ImportSettings,
    roster: OperatorRoster,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: ImportSettings, roster: OperatorRoster) -> Self {
        Self { settings, roster }
    }

    /// Returns the import settings.
    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Returns the operator roster.
    pub fn roster(&self) -> &OperatorRoster {
        &self.roster
    }

    /// Overrides the reference year.
    pub fn set_reference_year(&mut self, year: i32) {
        self.settings.reference_year = Some(year);
    }
}
