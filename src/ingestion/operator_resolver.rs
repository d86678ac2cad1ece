//! Operator name resolution against the roster.
//!
//! Matching is exact after normalization. There is no fuzzy or partial
//! matching, and an unknown name never creates a roster entry.

use crate::models::{OperatorRoster, ParsedSalesRecord, ResolvedSalesRecord};

/// The outcome of resolving a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The name matched a roster entry.
    Matched {
        /// The operator's roster id.
        operator_id: String,
        /// The operator's store.
        store_id: String,
    },
    /// No roster entry has this name.
    Unmatched,
}

/// Normalizes a name for comparison: trims, collapses internal whitespace
/// and case-folds.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::normalize_name;
///
/// assert_eq!(normalize_name("  Josiane   DE Paula "), "josiane de paula");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a name against the roster.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::{resolve, Resolution};
/// use sales_engine::models::{OperatorRoster, RosterEntry, Store};
/// use rust_decimal::Decimal;
///
/// let roster = OperatorRoster::new(
///     vec![Store { id: "belvedere".to_string(), name: "Belvedere".to_string(), monthly_target: None }],
///     vec![RosterEntry {
///         id: "op-renato".to_string(),
///         name: "RENATO".to_string(),
///         store_id: "belvedere".to_string(),
///         monthly_target: Decimal::from(2000),
///     }],
/// )
/// .unwrap();
///
/// assert!(matches!(resolve(" renato", &roster), Resolution::Matched { .. }));
/// assert_eq!(resolve("FULANO", &roster), Resolution::Unmatched);
/// ```
pub fn resolve(name: &str, roster: &OperatorRoster) -> Resolution {
    match roster.lookup(&normalize_name(name)) {
        Some(entry) => Resolution::Matched {
            operator_id: entry.id.clone(),
            store_id: entry.store_id.clone(),
        },
        None => Resolution::Unmatched,
    }
}

/// Resolves a parsed record, attaching its operator and store ids.
///
/// Returns the record back unchanged when the name is not in the roster.
pub fn resolve_record(
    record: ParsedSalesRecord,
    roster: &OperatorRoster,
) -> Result<ResolvedSalesRecord, ParsedSalesRecord> {
    match resolve(&record.operator_name, roster) {
        Resolution::Matched {
            operator_id,
            store_id,
        } => Ok(ResolvedSalesRecord {
            record,
            operator_id,
            store_id,
        }),
        Resolution::Unmatched => Err(record),
    }
}
