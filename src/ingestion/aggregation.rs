//! Commission aggregation.
//!
//! Only the commission value of a resolved record counts toward a target;
//! cost and sale value are never summed. Per-run totals are purely additive
//! on top of the prior running totals read from the [`AggregateStore`] before
//! the run. Store totals are always derived from operator totals using the
//! roster's current store assignments.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{EngineResult, RowErrorKind};
use crate::models::{OperatorAggregate, OperatorRoster, ResolvedSalesRecord, StoreAggregate};
use crate::store::AggregateStore;

use super::row_parser::FIELD_NAMES;

/// In-memory commission totals for one import run.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::Aggregator;
///
/// let aggregator = Aggregator::new();
/// assert!(aggregator.is_empty());
/// assert_eq!(aggregator.record_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    priors: BTreeMap<String, Decimal>,
    totals: BTreeMap<String, Decimal>,
    records: u64,
}

impl Aggregator {
    /// Creates an empty aggregator with no prior totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator on top of prior running totals.
    pub fn with_priors(priors: BTreeMap<String, Decimal>) -> Self {
        Self {
            priors,
            ..Self::default()
        }
    }

    /// Reads the prior running total of every roster operator.
    ///
    /// Every read happens here, before anything is accumulated or written.
    pub fn from_store<S: AggregateStore + ?Sized>(
        roster: &OperatorRoster,
        store: &S,
    ) -> EngineResult<Self> {
        let priors = roster
            .operators()
            .iter()
            .map(|operator| -> EngineResult<(String, Decimal)> {
                Ok((operator.id.clone(), store.running_total(&operator.id)?))
            })
            .collect::<EngineResult<BTreeMap<_, _>>>()?;
        Ok(Self::with_priors(priors))
    }

    /// Adds a record's commission value to its operator's run total.
    ///
    /// A commission that would push the run total or the merged running
    /// total past what [`Decimal`] can hold is rejected and leaves every
    /// total unchanged.
    pub fn accumulate(&mut self, record: &ResolvedSalesRecord) -> Result<(), RowErrorKind> {
        let commission = record.commission();
        let run_total = self
            .run_total(&record.operator_id)
            .checked_add(commission)
            .filter(|total| self.prior(&record.operator_id).checked_add(*total).is_some())
            .ok_or_else(|| RowErrorKind::MalformedCurrency {
                field: FIELD_NAMES[3],
                value: commission.to_string(),
            })?;

        self.totals.insert(record.operator_id.clone(), run_total);
        self.records += 1;
        Ok(())
    }

    /// Returns the prior running total of an operator.
    pub fn prior(&self, operator_id: &str) -> Decimal {
        self.priors
            .get(operator_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the commission accumulated this run for an operator.
    pub fn run_total(&self, operator_id: &str) -> Decimal {
        self.totals
            .get(operator_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of records accumulated.
    pub fn record_count(&self) -> u64 {
        self.records
    }

    /// Number of distinct operators credited.
    pub fn operator_count(&self) -> usize {
        self.totals.len()
    }

    /// Returns true when nothing was accumulated.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Returns this run's totals, ordered by operator id.
    pub fn run_totals(&self) -> Vec<OperatorAggregate> {
        self.totals
            .iter()
            .map(|(operator_id, total)| OperatorAggregate {
                operator_id: operator_id.clone(),
                accumulated_commission: *total,
            })
            .collect()
    }

    /// Returns prior plus run total for each operator credited this run,
    /// ordered by operator id.
    pub fn merged_totals(&self) -> Vec<OperatorAggregate> {
        self.totals
            .keys()
            .map(|operator_id| self.merged(operator_id))
            .collect()
    }

    /// Returns prior plus run total for every operator with a prior total or
    /// a run total, ordered by operator id.
    pub fn all_totals(&self) -> Vec<OperatorAggregate> {
        let mut ids: Vec<&String> = self.priors.keys().chain(self.totals.keys()).collect();
        ids.sort();
        ids.dedup();
        ids.into_iter().map(|operator_id| self.merged(operator_id)).collect()
    }

    fn merged(&self, operator_id: &str) -> OperatorAggregate {
        OperatorAggregate {
            operator_id: operator_id.to_string(),
            // Bounded by the check in `accumulate`.
            accumulated_commission: self
                .prior(operator_id)
                .saturating_add(self.run_total(operator_id)),
        }
    }
}

/// Sums operator totals per store using the roster's store assignments.
///
/// Every roster store gets an entry; operators without a total count as zero.
/// Totals for operators no longer in the roster are ignored. Sums saturate at
/// [`Decimal::MAX`].
pub fn store_totals(
    roster: &OperatorRoster,
    operator_totals: &[OperatorAggregate],
) -> Vec<StoreAggregate> {
    let mut by_store: BTreeMap<&str, Decimal> = roster
        .stores()
        .iter()
        .map(|store| (store.id.as_str(), Decimal::ZERO))
        .collect();

    for aggregate in operator_totals {
        if let Some(operator) = roster.operator(&aggregate.operator_id) {
            let total = by_store
                .entry(operator.store_id.as_str())
                .or_insert(Decimal::ZERO);
            *total = total.saturating_add(aggregate.accumulated_commission);
        }
    }

    roster
        .stores()
        .iter()
        .map(|store| StoreAggregate {
            store_id: store.id.clone(),
            accumulated_commission: by_store
                .get(store.id.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO),
        })
        .collect()
}
