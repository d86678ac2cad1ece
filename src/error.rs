//! Error types for the sales ingestion engine.
//!
//! Two families live here. [`EngineError`] covers the conditions that abort an
//! import outright (or stop configuration from loading). [`RowError`] covers
//! the row-scoped problems that are recorded in the import summary and never
//! propagate past the orchestrator.

use thiserror::Error;

/// The main error type for the sales ingestion engine.
///
/// Only run-fatal and configuration problems are expressed here; a malformed
/// or unmatched row is a [`RowError`] instead.
///
/// # Example
///
/// ```
/// use sales_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roster.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roster.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input contained no data at all.
    #[error("Import file is empty")]
    EmptyFile,

    /// The input stream could not be read or was not valid UTF-8.
    #[error("Import stream could not be read: {message}")]
    UnreadableStream {
        /// A description of the read failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Two roster entries share an id or normalize to the same name.
    #[error("Duplicate operator in roster: {name}")]
    DuplicateOperator {
        /// The duplicated id or normalized name.
        name: String,
    },

    /// Two stores share an id.
    #[error("Duplicate store in roster: {id}")]
    DuplicateStore {
        /// The duplicated store id.
        id: String,
    },

    /// An operator references a store that is not in the roster.
    #[error("Operator '{operator_id}' references unknown store '{store_id}'")]
    UnknownStore {
        /// The operator carrying the bad reference.
        operator_id: String,
        /// The store id that could not be found.
        store_id: String,
    },

    /// A monthly target was negative.
    #[error("Invalid monthly target for '{id}': {value}")]
    InvalidTarget {
        /// The operator or store id.
        id: String,
        /// The rejected target value.
        value: String,
    },

    /// The aggregate store failed to read or write a running total.
    #[error("Aggregate store error: {message}")]
    Persistence {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// The reason a single CSV row was excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorKind {
    /// A money field did not hold a valid non-negative amount.
    #[error("valor inválido em '{field}': '{value}'")]
    MalformedCurrency {
        /// The column name (e.g. "comissao").
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The date field did not match `<dia> de <mês>` or named an impossible day.
    #[error("data inválida '{value}' ({reason})")]
    MalformedDate {
        /// The raw text that failed to parse.
        value: String,
        /// Why the date was rejected.
        reason: String,
    },

    /// The row did not have exactly five non-empty fields.
    #[error("linha com formato inválido ({found})")]
    RowShape {
        /// What was found instead.
        found: String,
    },

    /// The operator name is not in the roster.
    #[error("funcionário não encontrado: {name}")]
    UnresolvedOperator {
        /// The name as written in the file.
        name: String,
    },
}

/// A row-scoped failure with the 1-based line it came from.
///
/// # Example
///
/// ```
/// use sales_engine::error::{RowError, RowErrorKind};
///
/// let error = RowError::new(4, RowErrorKind::UnresolvedOperator { name: "FULANO".to_string() });
/// assert_eq!(error.to_string(), "Linha 4: funcionário não encontrado: FULANO");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Linha {row}: {kind}")]
pub struct RowError {
    /// 1-based line number in the source file.
    pub row: u64,
    /// What went wrong.
    pub kind: RowErrorKind,
}

impl RowError {
    /// Creates a row error for the given line.
    pub fn new(row: u64, kind: RowErrorKind) -> Self {
        Self { row, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/import.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/import.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/roster.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/roster.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_empty_file_display() {
        assert_eq!(EngineError::EmptyFile.to_string(), "Import file is empty");
    }

    #[test]
    fn test_unknown_store_displays_both_ids() {
        let error = EngineError::UnknownStore {
            operator_id: "op-01".to_string(),
            store_id: "loja-99".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Operator 'op-01' references unknown store 'loja-99'"
        );
    }

    #[test]
    fn test_malformed_currency_row_error_message() {
        let error = RowError::new(
            7,
            RowErrorKind::MalformedCurrency {
                field: "comissao",
                value: "R$ 1,2,3".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Linha 7: valor inválido em 'comissao': 'R$ 1,2,3'"
        );
    }

    #[test]
    fn test_malformed_date_row_error_message() {
        let error = RowError::new(
            2,
            RowErrorKind::MalformedDate {
                value: "32 de Setembro".to_string(),
                reason: "dia fora do intervalo".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Linha 2: data inválida '32 de Setembro' (dia fora do intervalo)"
        );
    }

    #[test]
    fn test_duplicate_store_displays_id() {
        let error = EngineError::DuplicateStore {
            id: "betim".to_string(),
        };
        assert_eq!(error.to_string(), "Duplicate store in roster: betim");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<RowError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_empty_file() -> EngineResult<()> {
            Err(EngineError::EmptyFile)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_empty_file()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
