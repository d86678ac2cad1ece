//! Sales record models for each stage of the ingestion pipeline.
//!
//! A line moves through three fixed shapes: [`RawRow`] as read from the file,
//! [`ParsedSalesRecord`] once its fields are typed, and
//! [`ResolvedSalesRecord`] once its operator is found in the roster.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of positional columns in the sales export.
pub const EXPECTED_FIELDS: usize = 5;

/// One CSV line split into fields, before any typing.
///
/// Fields are positional: date, operator name, cost, commission, sale value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: u64,
    /// The trimmed fields of the line.
    pub fields: Vec<String>,
}

impl RawRow {
    /// Creates a raw row from a line number and its fields.
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Returns true when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    /// Returns the first field, or an empty string.
    pub fn first_field(&self) -> &str {
        self.fields.first().map(|f| f.trim()).unwrap_or("")
    }
}

/// A sales row whose fields have been converted to typed values.
///
/// All money fields are non-negative.
///
/// # Example
///
/// ```
/// use sales_engine::models::ParsedSalesRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = ParsedSalesRecord {
///     line: 2,
///     date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
///     operator_name: "RENATO".to_string(),
///     cost_value: Decimal::new(3370, 2),
///     commission_value: Decimal::new(1181, 2),
///     sale_value: Decimal::new(4551, 2),
/// };
/// assert_eq!(record.commission_value.to_string(), "11.81");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSalesRecord {
    /// 1-based line number in the source file.
    pub line: u64,
    /// The day of the sale.
    pub date: NaiveDate,
    /// The operator name exactly as written in the file (trimmed).
    pub operator_name: String,
    /// Cost value of the sale.
    pub cost_value: Decimal,
    /// Commission value, the figure tracked against the monthly target.
    pub commission_value: Decimal,
    /// Sale value.
    pub sale_value: Decimal,
}

/// A parsed record whose operator is known to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSalesRecord {
    /// The parsed record.
    pub record: ParsedSalesRecord,
    /// The roster id of the operator credited with the sale.
    pub operator_id: String,
    /// The store the operator is assigned to.
    pub store_id: String,
}

impl ResolvedSalesRecord {
    /// Returns the commission value credited by this record.
    pub fn commission(&self) -> Decimal {
        self.record.commission_value
    }
}
