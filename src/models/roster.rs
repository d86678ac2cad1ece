//! Operator roster model.
//!
//! The roster is the authoritative list of known operators, their store
//! assignments and monthly targets. Ingestion only ever reads it.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::ingestion::normalize_name;

/// A known operator as listed in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Unique identifier for the operator.
    pub id: String,
    /// The operator's display name, as it appears in sales exports.
    pub name: String,
    /// The store the operator is assigned to.
    pub store_id: String,
    /// Commission the operator is expected to reach each month.
    pub monthly_target: Decimal,
}

/// A store operators are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier for the store.
    pub id: String,
    /// The store's display name.
    pub name: String,
    /// Explicit store target; when absent the operators' targets are summed.
    #[serde(default)]
    pub monthly_target: Option<Decimal>,
}

/// Read-only snapshot of operators and stores, indexed by normalized name.
///
/// # Example
///
/// ```
/// use sales_engine::models::{OperatorRoster, RosterEntry, Store};
/// use rust_decimal::Decimal;
///
/// let roster = OperatorRoster::new(
///     vec![Store { id: "belvedere".to_string(), name: "Belvedere".to_string(), monthly_target: None }],
///     vec![RosterEntry {
///         id: "op-renato".to_string(),
///         name: "Renato".to_string(),
///         store_id: "belvedere".to_string(),
///         monthly_target: Decimal::from(2000),
///     }],
/// )
/// .unwrap();
///
/// assert_eq!(roster.lookup("renato").unwrap().id, "op-renato");
/// ```
#[derive(Debug, Clone)]
pub struct OperatorRoster {
    stores: Vec<Store>,
    operators: Vec<RosterEntry>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl OperatorRoster {
    /// Builds a roster, rejecting duplicate operators, dangling store
    /// references and negative targets.
    pub fn new(stores: Vec<Store>, operators: Vec<RosterEntry>) -> EngineResult<Self> {
        let mut store_ids = HashMap::new();
        for (index, store) in stores.iter().enumerate() {
            if store_ids.insert(store.id.clone(), index).is_some() {
                return Err(EngineError::DuplicateStore {
                    id: store.id.clone(),
                });
            }
            if let Some(target) = store.monthly_target {
                check_target(&store.id, target)?;
            }
        }

        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        for (index, operator) in operators.iter().enumerate() {
            if !store_ids.contains_key(&operator.store_id) {
                return Err(EngineError::UnknownStore {
                    operator_id: operator.id.clone(),
                    store_id: operator.store_id.clone(),
                });
            }
            check_target(&operator.id, operator.monthly_target)?;

            if by_id.insert(operator.id.clone(), index).is_some() {
                return Err(EngineError::DuplicateOperator {
                    name: operator.id.clone(),
                });
            }
            let key = normalize_name(&operator.name);
            if by_name.insert(key.clone(), index).is_some() {
                return Err(EngineError::DuplicateOperator { name: key });
            }
        }

        Ok(Self {
            stores,
            operators,
            by_name,
            by_id,
        })
    }

    /// Looks up an operator by an already-normalized name.
    pub fn lookup(&self, normalized_name: &str) -> Option<&RosterEntry> {
        self.by_name
            .get(normalized_name)
            .map(|&index| &self.operators[index])
    }

    /// Looks up an operator by id.
    pub fn operator(&self, operator_id: &str) -> Option<&RosterEntry> {
        self.by_id
            .get(operator_id)
            .map(|&index| &self.operators[index])
    }

    /// Returns every operator in roster order.
    pub fn operators(&self) -> &[RosterEntry] {
        &self.operators
    }

    /// Returns every store in roster order.
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Returns the operators currently assigned to a store.
    pub fn operators_in_store<'a>(
        &'a self,
        store_id: &'a str,
    ) -> impl Iterator<Item = &'a RosterEntry> + 'a {
        self.operators
            .iter()
            .filter(move |operator| operator.store_id == store_id)
    }

    /// Returns the monthly target of a store.
    ///
    /// Uses the store's own target when configured, otherwise the sum of its
    /// operators' targets.
    pub fn store_target(&self, store: &Store) -> Decimal {
        store.monthly_target.unwrap_or_else(|| {
            self.operators_in_store(&store.id)
                .map(|operator| operator.monthly_target)
                .sum()
        })
    }

    /// Number of operators in the roster.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns true when the roster has no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

fn check_target(id: &str, target: Decimal) -> EngineResult<()> {
    if target < Decimal::ZERO {
        return Err(EngineError::InvalidTarget {
            id: id.to_string(),
            value: target.to_string(),
        });
    }
    Ok(())
}
