//! Sales import pipeline.
//!
//! This module contains the stages of an import run: locale parsing of
//! Brazilian currency and dates, row validation, operator resolution,
//! commission aggregation, target evaluation and the [`Importer`] that
//! drives them in order.

mod aggregation;
mod locale;
mod operator_resolver;
mod orchestrator;
mod row_parser;
mod target;

pub use aggregation::{Aggregator, store_totals};
pub use locale::{
    CURRENCY_PREFIX, LocaleError, MONTH_NAMES, month_number, parse_currency,
    parse_localized_date,
};
pub use operator_resolver::{Resolution, normalize_name, resolve, resolve_record};
pub use orchestrator::{ImportOutcome, Importer};
pub use row_parser::{FIELD_NAMES, is_footer_row, is_header_row, parse_row, reassemble_amounts};
pub use target::{
    NEAR_TARGET_THRESHOLD, TARGET_REACHED_THRESHOLD, classify, evaluate, target_percentage,
};
