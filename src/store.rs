//! Running-total persistence seam.
//!
//! The engine never owns persisted totals. It reads the prior running total of
//! each operator it touched and writes the new total back once the whole pass
//! has succeeded. [`InMemoryAggregateStore`] backs tests and the CLI.
//!
//! The store does no locking. Callers that need at most one concurrent import
//! per target period must serialize imports themselves.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::error::EngineResult;

/// Read/write access to persisted per-operator running totals.
pub trait AggregateStore {
    /// Returns the running total for an operator, zero when none is stored.
    fn running_total(&self, operator_id: &str) -> EngineResult<Decimal>;

    /// Replaces the running total for an operator.
    fn set_running_total(&mut self, operator_id: &str, total: Decimal) -> EngineResult<()>;
}

/// A [`HashMap`]-backed aggregate store.
///
/// # Example
///
/// ```
/// use sales_engine::store::{AggregateStore, InMemoryAggregateStore};
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryAggregateStore::new();
/// assert_eq!(store.running_total("op-1").unwrap(), Decimal::ZERO);
///
/// store.set_running_total("op-1", Decimal::new(1181, 2)).unwrap();
/// assert_eq!(store.running_total("op-1").unwrap(), Decimal::new(1181, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAggregateStore {
    totals: HashMap<String, Decimal>,
}

impl InMemoryAggregateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with prior totals.
    pub fn with_totals(totals: HashMap<String, Decimal>) -> Self {
        Self { totals }
    }

    /// Returns every stored total, ordered by operator id.
    pub fn snapshot(&self) -> BTreeMap<String, Decimal> {
        self.totals
            .iter()
            .map(|(id, total)| (id.clone(), *total))
            .collect()
    }

    /// Returns true when an operator has a stored total.
    pub fn contains(&self, operator_id: &str) -> bool {
        self.totals.contains_key(operator_id)
    }
}

impl AggregateStore for InMemoryAggregateStore {
    fn running_total(&self, operator_id: &str) -> EngineResult<Decimal> {
        Ok(self
            .totals
            .get(operator_id)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    fn set_running_total(&mut self, operator_id: &str, total: Decimal) -> EngineResult<()> {
        self.totals.insert(operator_id.to_string(), total);
        Ok(())
    }
}
