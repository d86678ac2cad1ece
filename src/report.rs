//! Dashboard performance report.
//!
//! Reads every roster operator's running total from the aggregate store,
//! derives store totals from them and evaluates each against its monthly
//! target. This is the feed the dashboard renders.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::ingestion::{evaluate, store_totals};
use crate::models::{
    OperatorAggregate, OperatorPerformance, OperatorRoster, PerformanceReport, StorePerformance,
};
use crate::store::AggregateStore;

/// Builds the performance report for every operator and store in the roster.
///
/// Operators and stores are ordered by percentage, highest first, with ties
/// broken by name.
///
/// # Example
///
/// ```
/// use sales_engine::models::{OperatorRoster, RosterEntry, Store, TargetStatus};
/// use sales_engine::report::build_report;
/// use sales_engine::store::{AggregateStore, InMemoryAggregateStore};
/// use rust_decimal::Decimal;
///
/// let roster = OperatorRoster::new(
///     vec![Store { id: "betim".to_string(), name: "Betim".to_string(), monthly_target: None }],
///     vec![RosterEntry {
///         id: "op-pilly".to_string(),
///         name: "PILLY".to_string(),
///         store_id: "betim".to_string(),
///         monthly_target: Decimal::from(1000),
///     }],
/// )
/// .unwrap();
/// let mut store = InMemoryAggregateStore::new();
/// store.set_running_total("op-pilly", Decimal::from(850)).unwrap();
///
/// let report = build_report(&roster, &store).unwrap();
/// assert_eq!(report.operators[0].status, TargetStatus::NearTarget);
/// assert_eq!(report.stores[0].accumulated_total, Decimal::from(850));
/// ```
pub fn build_report<S: AggregateStore + ?Sized>(
    roster: &OperatorRoster,
    store: &S,
) -> EngineResult<PerformanceReport> {
    let totals = roster
        .operators()
        .iter()
        .map(|operator| -> EngineResult<OperatorAggregate> {
            Ok(OperatorAggregate {
                operator_id: operator.id.clone(),
                accumulated_commission: store.running_total(&operator.id)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(report_from_totals(roster, &totals))
}

/// Builds the performance report from running totals already in memory.
///
/// Roster operators missing from `totals` are reported at zero; totals for
/// operators outside the roster are ignored.
pub fn report_from_totals(
    roster: &OperatorRoster,
    totals: &[OperatorAggregate],
) -> PerformanceReport {
    let by_operator: HashMap<&str, Decimal> = totals
        .iter()
        .map(|aggregate| (aggregate.operator_id.as_str(), aggregate.accumulated_commission))
        .collect();

    let mut operators: Vec<OperatorPerformance> = roster
        .operators()
        .iter()
        .map(|operator| {
            let accumulated_total = by_operator
                .get(operator.id.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            let evaluation = evaluate(accumulated_total, operator.monthly_target);
            OperatorPerformance {
                operator_id: operator.id.clone(),
                name: operator.name.clone(),
                store_id: operator.store_id.clone(),
                monthly_target: operator.monthly_target,
                accumulated_total,
                percentage: evaluation.percentage,
                status: evaluation.status,
            }
        })
        .collect();
    operators.sort_by(|a, b| by_percentage_then_name(a.percentage, &a.name, b.percentage, &b.name));

    let mut stores: Vec<StorePerformance> = roster
        .stores()
        .iter()
        .zip(store_totals(roster, totals))
        .map(|(store, aggregate)| {
            let monthly_target = roster.store_target(store);
            let evaluation = evaluate(aggregate.accumulated_commission, monthly_target);
            StorePerformance {
                store_id: store.id.clone(),
                name: store.name.clone(),
                monthly_target,
                accumulated_total: aggregate.accumulated_commission,
                percentage: evaluation.percentage,
                status: evaluation.status,
                operator_count: roster.operators_in_store(&store.id).count(),
            }
        })
        .collect();
    stores.sort_by(|a, b| by_percentage_then_name(a.percentage, &a.name, b.percentage, &b.name));

    PerformanceReport { operators, stores }
}

fn by_percentage_then_name(
    a_percentage: Decimal,
    a_name: &str,
    b_percentage: Decimal,
    b_name: &str,
) -> Ordering {
    b_percentage
        .cmp(&a_percentage)
        .then_with(|| a_name.cmp(b_name))
}
