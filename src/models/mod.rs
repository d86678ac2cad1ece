//! Core data models for the sales ingestion engine.
//!
//! This module contains all the domain models used throughout the engine.

mod performance;
mod roster;
mod sales_record;
mod summary;

pub use performance::{
    OperatorAggregate, OperatorPerformance, PerformanceReport, StoreAggregate, StorePerformance,
    TargetEvaluation, TargetStatus,
};
pub use roster::{OperatorRoster, RosterEntry, Store};
pub use sales_record::{EXPECTED_FIELDS, ParsedSalesRecord, RawRow, ResolvedSalesRecord};
pub use summary::ImportSummary;
