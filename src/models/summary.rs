//! Import summary model.

use serde::{Deserialize, Serialize};

/// The outcome counts and messages of one import run.
///
/// Serialized with the Portuguese keys the dashboard expects. The counts
/// always satisfy `total_processados = vendas_importadas +
/// funcionarios_nao_encontrados + parse errors`.
///
/// # Example
///
/// ```
/// use sales_engine::models::ImportSummary;
///
/// let summary = ImportSummary {
///     total_rows_processed: 3,
///     records_imported: 1,
///     operators_matched: 1,
///     operators_unmatched: 1,
///     parse_errors: 1,
///     errors: vec!["Linha 3: funcionário não encontrado: FULANO".to_string()],
/// };
/// let json = serde_json::to_value(&summary).unwrap();
/// assert_eq!(json["vendas_importadas"], 1);
/// assert!(json.get("parse_errors").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Data rows seen, excluding header, footer and blank lines.
    #[serde(rename = "total_processados")]
    pub total_rows_processed: u64,
    /// Rows credited to a known operator.
    #[serde(rename = "vendas_importadas")]
    pub records_imported: u64,
    /// Distinct operators credited in this run.
    #[serde(rename = "funcionarios_encontrados")]
    pub operators_matched: u64,
    /// Rows whose operator name was not in the roster.
    #[serde(rename = "funcionarios_nao_encontrados")]
    pub operators_unmatched: u64,
    /// Rows rejected by the parser.
    #[serde(skip)]
    pub parse_errors: u64,
    /// Row-level messages, in file order.
    #[serde(rename = "erros")]
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// Returns true when the counts add up.
    pub fn is_consistent(&self) -> bool {
        self.total_rows_processed
            == self.records_imported + self.operators_unmatched + self.parse_errors
    }
}
