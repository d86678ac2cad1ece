//! Aggregate and target-performance models.
//!
//! These are the shapes handed to the dashboard renderer: running totals per
//! operator and store, each paired with its percentage of the monthly target
//! and a status classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of an accumulated total relative to its monthly target.
///
/// Serialized as the label shown on the dashboard.
///
/// # Example
///
/// ```
/// use sales_engine::models::TargetStatus;
///
/// assert_eq!(TargetStatus::NearTarget.label(), "Próxima da Meta");
/// assert_eq!(
///     serde_json::to_string(&TargetStatus::TargetReached).unwrap(),
///     "\"Meta Atingida\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetStatus {
    /// 100% or more of the target.
    #[serde(rename = "Meta Atingida")]
    TargetReached,
    /// From 80% up to, but excluding, 100%.
    #[serde(rename = "Próxima da Meta")]
    NearTarget,
    /// Below 80%.
    #[serde(rename = "Abaixo da Meta")]
    BelowTarget,
}

impl TargetStatus {
    /// Returns the dashboard label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            TargetStatus::TargetReached => "Meta Atingida",
            TargetStatus::NearTarget => "Próxima da Meta",
            TargetStatus::BelowTarget => "Abaixo da Meta",
        }
    }
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of target reached and the resulting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEvaluation {
    /// Percentage of the target, rounded to one decimal place.
    pub percentage: Decimal,
    /// The status band the percentage falls in.
    pub status: TargetStatus,
}

/// Commission accumulated by one operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorAggregate {
    /// The operator's roster id.
    pub operator_id: String,
    /// Accumulated commission.
    pub accumulated_commission: Decimal,
}

/// Commission accumulated by every operator currently assigned to a store.
///
/// Always derived from [`OperatorAggregate`] values, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAggregate {
    /// The store's id.
    pub store_id: String,
    /// Sum of its operators' accumulated commission.
    pub accumulated_commission: Decimal,
}

/// One operator's line on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorPerformance {
    /// The operator's roster id.
    pub operator_id: String,
    /// The operator's display name.
    pub name: String,
    /// The store the operator is assigned to.
    pub store_id: String,
    /// The operator's monthly target.
    pub monthly_target: Decimal,
    /// Accumulated commission after the import.
    pub accumulated_total: Decimal,
    /// Percentage of target reached.
    pub percentage: Decimal,
    /// Status classification.
    pub status: TargetStatus,
}

/// One store's line on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePerformance {
    /// The store's id.
    pub store_id: String,
    /// The store's display name.
    pub name: String,
    /// The store's monthly target.
    pub monthly_target: Decimal,
    /// Sum of the accumulated totals of the store's operators.
    pub accumulated_total: Decimal,
    /// Percentage of target reached.
    pub percentage: Decimal,
    /// Status classification.
    pub status: TargetStatus,
    /// Number of operators assigned to the store.
    pub operator_count: usize,
}

/// Everything the dashboard renderer needs after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Operators, best percentage first.
    pub operators: Vec<OperatorPerformance>,
    /// Stores, best percentage first.
    pub stores: Vec<StorePerformance>,
}

impl PerformanceReport {
    /// Finds an operator's line by id.
    pub fn operator(&self, operator_id: &str) -> Option<&OperatorPerformance> {
        self.operators.iter().find(|o| o.operator_id == operator_id)
    }

    /// Finds a store's line by id.
    pub fn store(&self, store_id: &str) -> Option<&StorePerformance> {
        self.stores.iter().find(|s| s.store_id == store_id)
    }
}
