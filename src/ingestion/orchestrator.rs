//! Import orchestration.
//!
//! Drives one import run end to end:
//! read rows and the prior running totals, then parse, resolve and accumulate
//! each row in file order, then evaluate targets and commit the new running
//! totals.
//!
//! Row-level failures are recorded and skipped. Only an empty or unreadable
//! input, or a failing store, aborts the run. Running totals are computed
//! entirely in memory and written back once, as the last step.

use std::io::Read;
use std::time::Instant;

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{EngineConfig, ImportSettings};
use crate::error::{EngineError, EngineResult, RowError, RowErrorKind};
use crate::models::{
    ImportSummary, OperatorAggregate, OperatorRoster, PerformanceReport, RawRow,
};
use crate::report::report_from_totals;
use crate::store::AggregateStore;

use super::aggregation::Aggregator;
use super::operator_resolver::resolve_record;
use super::row_parser::{is_footer_row, is_header_row, parse_row, reassemble_amounts};

const UTF8_BOM: char = '\u{feff}';

/// Everything produced by one import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    /// Identifier attached to this run's log lines.
    pub import_id: Uuid,
    /// Counts and row-level messages.
    pub summary: ImportSummary,
    /// New running totals of the operators credited in this run.
    pub operator_totals: Vec<OperatorAggregate>,
    /// Target evaluation for every roster operator and store.
    pub report: PerformanceReport,
}

/// Runs sales imports against a roster snapshot.
///
/// The roster and reference year are passed in explicitly; nothing is read
/// from ambient state.
///
/// # Example
///
/// ```
/// use sales_engine::config::ImportSettings;
/// use sales_engine::ingestion::Importer;
/// use sales_engine::models::{OperatorRoster, RosterEntry, Store, TargetStatus};
/// use sales_engine::store::InMemoryAggregateStore;
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
/// let importer = Importer::new(&roster, ImportSettings::for_year(2024));
/// let mut store = InMemoryAggregateStore::new();
///
/// let outcome = importer
///     .run("01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n".as_bytes(), &mut store)
///     .unwrap();
///
/// assert_eq!(outcome.summary.records_imported, 1);
/// let renato = outcome.report.operator("op-renato").unwrap();
/// assert_eq!(renato.accumulated_total, Decimal::new(1181, 2));
/// assert_eq!(renato.percentage, Decimal::new(6, 1));
/// assert_eq!(renato.status, TargetStatus::BelowTarget);
/// ```
#[derive(Debug, Clone)]
pub struct Importer<'a> {
    roster: &'a OperatorRoster,
    settings: ImportSettings,
}

impl<'a> Importer<'a> {
    /// Creates an importer for a roster snapshot.
    pub fn new(roster: &'a OperatorRoster, settings: ImportSettings) -> Self {
        Self { roster, settings }
    }

    /// Creates an importer from loaded configuration.
    pub fn from_config(config: &'a EngineConfig) -> Self {
        Self::new(config.roster(), config.settings().clone())
    }

    /// Returns the settings this importer runs with.
    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Imports one file and commits the resulting running totals to `store`.
    ///
    /// Fails with [`EngineError::EmptyFile`] or
    /// [`EngineError::UnreadableStream`] when the input cannot be used at
    /// all, and with [`EngineError::Persistence`] when the store fails. Every
    /// store read happens before the first write, and in every failure case
    /// the store keeps its prior totals.
    pub fn run<R: Read, S: AggregateStore + ?Sized>(
        &self,
        input: R,
        store: &mut S,
    ) -> EngineResult<ImportOutcome> {
        let import_id = Uuid::new_v4();
        let start_time = Instant::now();
        let reference_year = self.settings.year();
        info!(
            import_id = %import_id,
            reference_year,
            operators = self.roster.len(),
            "Starting sales import"
        );

        let text = read_input(input)?;
        let rows = self.read_rows(&text)?;

        let mut aggregator = Aggregator::from_store(self.roster, &*store)?;
        let mut summary = ImportSummary::default();
        let mut row_errors: Vec<RowError> = Vec::new();

        for raw in rows {
            summary.total_rows_processed += 1;

            let record = match parse_row(&raw, reference_year) {
                Ok(record) => record,
                Err(error) => {
                    warn!(import_id = %import_id, line = error.row, error = %error, "Row rejected");
                    summary.parse_errors += 1;
                    row_errors.push(error);
                    continue;
                }
            };

            match resolve_record(record, self.roster) {
                Ok(resolved) => match aggregator.accumulate(&resolved) {
                    Ok(()) => {
                        debug!(
                            import_id = %import_id,
                            line = resolved.record.line,
                            operator_id = %resolved.operator_id,
                            commission = %resolved.commission(),
                            "Row accumulated"
                        );
                    }
                    Err(kind) => {
                        let error = RowError::new(resolved.record.line, kind);
                        warn!(import_id = %import_id, line = error.row, error = %error, "Row rejected");
                        summary.parse_errors += 1;
                        row_errors.push(error);
                    }
                },
                Err(unmatched) => {
                    warn!(
                        import_id = %import_id,
                        line = unmatched.line,
                        name = %unmatched.operator_name,
                        "Operator not in roster"
                    );
                    summary.operators_unmatched += 1;
                    row_errors.push(RowError::new(
                        unmatched.line,
                        RowErrorKind::UnresolvedOperator {
                            name: unmatched.operator_name,
                        },
                    ));
                }
            }
        }

        summary.records_imported = aggregator.record_count();
        summary.operators_matched = aggregator.operator_count() as u64;
        summary.errors = self.report_errors(&row_errors);

        let report = report_from_totals(self.roster, &aggregator.all_totals());
        let operator_totals = commit(&aggregator, store, import_id)?;

        info!(
            import_id = %import_id,
            total_processed = summary.total_rows_processed,
            imported = summary.records_imported,
            unmatched = summary.operators_unmatched,
            parse_errors = summary.parse_errors,
            duration_us = start_time.elapsed().as_micros() as u64,
            "Sales import completed"
        );

        Ok(ImportOutcome {
            import_id,
            summary,
            operator_totals,
            report,
        })
    }

    /// Splits the text into data rows, dropping blank lines, the header and
    /// everything from the totals footer on.
    fn read_rows(&self, text: &str) -> EngineResult<Vec<RawRow>> {
        let reference_year = self.settings.year();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.settings.delimiter_byte())
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        let mut seen_first_row = false;

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| EngineError::UnreadableStream {
                message: e.to_string(),
            })?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 1);
            let fields = reassemble_amounts(record.iter().map(String::from).collect());
            let raw = RawRow::new(line, fields);

            if raw.is_blank() {
                continue;
            }
            if !seen_first_row {
                seen_first_row = true;
                if is_header_row(&raw, reference_year) {
                    debug!(line, "Skipping header row");
                    continue;
                }
            }
            if is_footer_row(&raw) {
                debug!(line, "Reached totals footer");
                break;
            }
            rows.push(raw);
        }

        Ok(rows)
    }

    fn report_errors(&self, row_errors: &[RowError]) -> Vec<String> {
        let limit = self
            .settings
            .max_reported_errors
            .unwrap_or(row_errors.len());
        row_errors
            .iter()
            .take(limit)
            .map(|error| error.to_string())
            .collect()
    }
}

/// Reads the whole input as UTF-8 text, stripping a byte-order mark.
fn read_input<R: Read>(mut input: R) -> EngineResult<String> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| EngineError::UnreadableStream {
            message: e.to_string(),
        })?;

    let text = String::from_utf8(bytes).map_err(|e| EngineError::UnreadableStream {
        message: format!("input is not valid UTF-8: {}", e),
    })?;
    let text = if text.starts_with(UTF8_BOM) {
        text[UTF8_BOM.len_utf8()..].to_string()
    } else {
        text
    };

    if text.trim().is_empty() {
        return Err(EngineError::EmptyFile);
    }
    Ok(text)
}

/// Writes the merged running totals back to the store.
///
/// If a write fails, totals already written in this commit are restored to
/// their prior values before the error is returned.
fn commit<S: AggregateStore + ?Sized>(
    aggregator: &Aggregator,
    store: &mut S,
    import_id: Uuid,
) -> EngineResult<Vec<OperatorAggregate>> {
    let merged = aggregator.merged_totals();

    for (index, aggregate) in merged.iter().enumerate() {
        if let Err(error) =
            store.set_running_total(&aggregate.operator_id, aggregate.accumulated_commission)
        {
            warn!(
                import_id = %import_id,
                operator_id = %aggregate.operator_id,
                error = %error,
                "Commit failed, restoring prior totals"
            );
            for written in &merged[..index] {
                let prior = aggregator.prior(&written.operator_id);
                if let Err(rollback_error) = store.set_running_total(&written.operator_id, prior) {
                    warn!(
                        import_id = %import_id,
                        operator_id = %written.operator_id,
                        error = %rollback_error,
                        "Could not restore prior total"
                    );
                }
            }
            return Err(error);
        }
    }

    debug!(import_id = %import_id, operators = merged.len(), "Committed running totals");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RosterEntry, Store, TargetStatus};
    use crate::store::InMemoryAggregateStore;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_roster() -> OperatorRoster {
        OperatorRoster::new(
            vec![
                Store {
                    id: "belvedere".to_string(),
                    name: "Belvedere".to_string(),
                    monthly_target: None,
                },
                Store {
                    id: "betim".to_string(),
                    name: "Betim".to_string(),
                    monthly_target: None,
                },
            ],
            vec![
                RosterEntry {
                    id: "op-renato".to_string(),
                    name: "RENATO".to_string(),
                    store_id: "belvedere".to_string(),
                    monthly_target: dec("2000"),
                },
                RosterEntry {
                    id: "op-pilly".to_string(),
                    name: "PILLY".to_string(),
                    store_id: "betim".to_string(),
                    monthly_target: dec("1000"),
                },
            ],
        )
        .unwrap()
    }

    fn run(csv: &str) -> (ImportOutcome, InMemoryAggregateStore) {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut store = InMemoryAggregateStore::new();
        let outcome = importer.run(csv.as_bytes(), &mut store).unwrap();
        (outcome, store)
    }

    /// Store that refuses reads or writes for one operator.
    struct RejectingStore {
        inner: InMemoryAggregateStore,
        reject_read: Option<&'static str>,
        reject_write: Option<&'static str>,
    }

    impl AggregateStore for RejectingStore {
        fn running_total(&self, operator_id: &str) -> EngineResult<Decimal> {
            if self.reject_read == Some(operator_id) {
                return Err(EngineError::Persistence {
                    message: format!("read refused for {}", operator_id),
                });
            }
            self.inner.running_total(operator_id)
        }

        fn set_running_total(&mut self, operator_id: &str, total: Decimal) -> EngineResult<()> {
            if self.reject_write == Some(operator_id) {
                return Err(EngineError::Persistence {
                    message: format!("write refused for {}", operator_id),
                });
            }
            self.inner.set_running_total(operator_id, total)
        }
    }

    #[test]
    fn test_single_row_scenario() {
        let (outcome, store) = run("01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n");

        assert_eq!(outcome.summary.total_rows_processed, 1);
        assert_eq!(outcome.summary.records_imported, 1);
        assert_eq!(outcome.summary.operators_matched, 1);
        assert_eq!(outcome.summary.operators_unmatched, 0);
        assert!(outcome.summary.errors.is_empty());
        assert_eq!(store.running_total("op-renato").unwrap(), dec("11.81"));

        let renato = outcome.report.operator("op-renato").unwrap();
        assert_eq!(renato.percentage, dec("0.6"));
        assert_eq!(renato.status, TargetStatus::BelowTarget);
    }

    #[test]
    fn test_unknown_operator_creates_no_aggregate() {
        let (outcome, store) = run("01 de Setembro,FULANO,R$ 33,70,R$ 11,81,R$ 45,51\n");

        assert_eq!(outcome.summary.operators_unmatched, 1);
        assert_eq!(outcome.summary.records_imported, 0);
        assert_eq!(outcome.summary.operators_matched, 0);
        assert!(outcome.operator_totals.is_empty());
        assert!(store.snapshot().is_empty());
        assert_eq!(
            outcome.summary.errors,
            vec!["Linha 1: funcionário não encontrado: FULANO"]
        );
    }

    #[test]
    fn test_invalid_day_is_recorded_and_run_continues() {
        let csv = "32 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n\
                   02 de Setembro,RENATO,R$ 10,00,R$ 5,00,R$ 15,00\n";

        let (outcome, store) = run(csv);

        assert_eq!(outcome.summary.total_rows_processed, 2);
        assert_eq!(outcome.summary.parse_errors, 1);
        assert_eq!(outcome.summary.records_imported, 1);
        assert_eq!(outcome.summary.errors.len(), 1);
        assert!(outcome.summary.errors[0].starts_with("Linha 1: data inválida"));
        assert_eq!(store.running_total("op-renato").unwrap(), dec("5.00"));
    }

    #[test]
    fn test_header_blank_lines_and_footer_are_not_counted() {
        let csv = "Data,Funcionário,Custo,Comissão,Venda\n\
                   \n\
                   01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n\
                   ,,,,\n\
                   01 de Setembro,PILLY,R$ 1.000,00,R$ 100,00,R$ 1.100,00\n\
                   TOTAL,,R$ 1.033,70,R$ 111,81,R$ 1.145,51\n\
                   01 de Setembro,RENATO,R$ 1,00,R$ 1,00,R$ 1,00\n";

        let (outcome, store) = run(csv);

        assert_eq!(outcome.summary.total_rows_processed, 2);
        assert_eq!(outcome.summary.records_imported, 2);
        assert_eq!(outcome.summary.operators_matched, 2);
        assert_eq!(store.running_total("op-renato").unwrap(), dec("11.81"));
        assert_eq!(store.running_total("op-pilly").unwrap(), dec("100.00"));
    }

    #[test]
    fn test_header_only_checked_on_first_row() {
        let csv = "01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n\
                   Ontem,RENATO,R$ 1,00,R$ 1,00,R$ 1,00\n";

        let (outcome, _) = run(csv);

        assert_eq!(outcome.summary.total_rows_processed, 2);
        assert_eq!(outcome.summary.parse_errors, 1);
    }

    #[test]
    fn test_row_numbers_are_physical_lines() {
        let csv = "Data,Funcionário,Custo,Comissão,Venda\n\
                   01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n\
                   01 de Setembro,FULANO,R$ 33,70,R$ 11,81,R$ 45,51\n";

        let (outcome, _) = run(csv);

        assert_eq!(
            outcome.summary.errors,
            vec!["Linha 3: funcionário não encontrado: FULANO"]
        );
    }

    #[test]
    fn test_counting_invariant_holds_for_mixed_input() {
        let csv = "01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n\
                   01 de Setembro,FULANO,R$ 33,70,R$ 11,81,R$ 45,51\n\
                   01 de Setembro,RENATO,R$ 33,70\n\
                   01 de Setembro,RENATO,R$ 33,70,abc,R$ 45,51\n\
                   01 de Setembro,PILLY,R$ 3,00,R$ 2,00,R$ 5,00\n";

        let (outcome, _) = run(csv);
        let summary = &outcome.summary;

        assert_eq!(summary.total_rows_processed, 5);
        assert_eq!(summary.records_imported, 2);
        assert_eq!(summary.operators_unmatched, 1);
        assert_eq!(summary.parse_errors, 2);
        assert!(summary.is_consistent());
        assert_eq!(summary.errors.len(), 3);
    }

    #[test]
    fn test_semicolon_delimited_export() {
        let roster = create_test_roster();
        let settings = ImportSettings {
            delimiter: ';',
            ..ImportSettings::for_year(2024)
        };
        let importer = Importer::new(&roster, settings);
        let mut store = InMemoryAggregateStore::new();

        let outcome = importer
            .run(
                "01 de Setembro;RENATO;R$ 33,70;R$ 11,81;R$ 45,51\n".as_bytes(),
                &mut store,
            )
            .unwrap();

        assert_eq!(outcome.summary.records_imported, 1);
        assert_eq!(store.running_total("op-renato").unwrap(), dec("11.81"));
    }

    #[test]
    fn test_quoted_amounts_are_read_whole() {
        let (outcome, store) =
            run("01 de Setembro,RENATO,\"R$ 1.033,70\",\"R$ 11,81\",\"R$ 1.045,51\"\n");

        assert_eq!(outcome.summary.records_imported, 1);
        assert_eq!(store.running_total("op-renato").unwrap(), dec("11.81"));
    }

    #[test]
    fn test_prior_totals_are_merged() {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut prior = HashMap::new();
        prior.insert("op-renato".to_string(), dec("1588.19"));
        let mut store = InMemoryAggregateStore::with_totals(prior);

        let outcome = importer
            .run(
                "01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n".as_bytes(),
                &mut store,
            )
            .unwrap();

        assert_eq!(store.running_total("op-renato").unwrap(), dec("1600.00"));
        assert_eq!(outcome.operator_totals[0].accumulated_commission, dec("1600.00"));
        let renato = outcome.report.operator("op-renato").unwrap();
        assert_eq!(renato.percentage, dec("80.0"));
        assert_eq!(renato.status, TargetStatus::NearTarget);
    }

    #[test]
    fn test_error_list_is_capped_but_counts_are_not() {
        let roster = create_test_roster();
        let settings = ImportSettings {
            max_reported_errors: Some(2),
            ..ImportSettings::for_year(2024)
        };
        let importer = Importer::new(&roster, settings);
        let mut store = InMemoryAggregateStore::new();
        let csv = "01 de Setembro,A,R$ 1,00,R$ 1,00,R$ 1,00\n\
                   01 de Setembro,B,R$ 1,00,R$ 1,00,R$ 1,00\n\
                   01 de Setembro,C,R$ 1,00,R$ 1,00,R$ 1,00\n";

        let outcome = importer.run(csv.as_bytes(), &mut store).unwrap();

        assert_eq!(outcome.summary.operators_unmatched, 3);
        assert_eq!(outcome.summary.errors.len(), 2);
        assert!(outcome.summary.errors[1].contains(": B"));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut store = InMemoryAggregateStore::new();

        assert!(matches!(
            importer.run("".as_bytes(), &mut store),
            Err(EngineError::EmptyFile)
        ));
        assert!(matches!(
            importer.run(" \n\n".as_bytes(), &mut store),
            Err(EngineError::EmptyFile)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut store = InMemoryAggregateStore::new();
        let bytes: &[u8] = &[0x30, 0x31, 0xff, 0xfe, b'\n'];

        assert!(matches!(
            importer.run(bytes, &mut store),
            Err(EngineError::UnreadableStream { .. })
        ));
    }

    #[test]
    fn test_bom_is_stripped() {
        let (outcome, _) = run("\u{feff}01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n");
        assert_eq!(outcome.summary.records_imported, 1);
    }

    #[test]
    fn test_failed_commit_restores_prior_totals() {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut prior = HashMap::new();
        prior.insert("op-pilly".to_string(), dec("10.00"));
        prior.insert("op-renato".to_string(), dec("20.00"));
        let mut store = RejectingStore {
            inner: InMemoryAggregateStore::with_totals(prior),
            reject_read: None,
            reject_write: Some("op-renato"),
        };
        let csv = "01 de Setembro,PILLY,R$ 1,00,R$ 1,00,R$ 1,00\n\
                   01 de Setembro,RENATO,R$ 1,00,R$ 1,00,R$ 1,00\n";

        let result = importer.run(csv.as_bytes(), &mut store);

        assert!(matches!(result, Err(EngineError::Persistence { .. })));
        assert_eq!(store.inner.running_total("op-pilly").unwrap(), dec("10.00"));
        assert_eq!(store.inner.running_total("op-renato").unwrap(), dec("20.00"));
    }

    #[test]
    fn test_failed_read_of_untouched_operator_writes_nothing() {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut store = RejectingStore {
            inner: InMemoryAggregateStore::new(),
            reject_read: Some("op-pilly"),
            reject_write: None,
        };

        let result = importer.run(
            "01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n".as_bytes(),
            &mut store,
        );

        assert!(matches!(result, Err(EngineError::Persistence { .. })));
        assert!(!store.inner.contains("op-renato"));
        assert!(store.inner.snapshot().is_empty());
    }

    #[test]
    fn test_commission_overflow_is_a_row_error() {
        let csv = "01 de Setembro,RENATO,R$ 1,00,R$ 50.000.000.000.000.000.000.000.000.000,R$ 1,00\n\
                   02 de Setembro,RENATO,R$ 1,00,R$ 50.000.000.000.000.000.000.000.000.000,R$ 1,00\n\
                   03 de Setembro,RENATO,R$ 1,R$ 1,R$ 1\n";

        let (outcome, store) = run(csv);

        assert_eq!(outcome.summary.total_rows_processed, 3);
        assert_eq!(outcome.summary.records_imported, 2);
        assert_eq!(outcome.summary.parse_errors, 1);
        assert!(outcome.summary.is_consistent());
        assert!(outcome.summary.errors[0].starts_with("Linha 2: valor inválido em 'comissao'"));
        assert_eq!(
            store.running_total("op-renato").unwrap(),
            dec("50000000000000000000000000001")
        );
    }

    #[test]
    fn test_huge_commission_against_small_target_does_not_panic() {
        let roster = OperatorRoster::new(
            vec![Store {
                id: "betim".to_string(),
                name: "Betim".to_string(),
                monthly_target: None,
            }],
            vec![RosterEntry {
                id: "op-pilly".to_string(),
                name: "PILLY".to_string(),
                store_id: "betim".to_string(),
                monthly_target: Decimal::ONE,
            }],
        )
        .unwrap();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut store = InMemoryAggregateStore::new();

        let outcome = importer
            .run(
                "01 de Setembro,PILLY,R$ 1,00,R$ 1.000.000.000.000.000.000.000.000.000,R$ 1,00\n"
                    .as_bytes(),
                &mut store,
            )
            .unwrap();

        let pilly = outcome.report.operator("op-pilly").unwrap();
        assert_eq!(pilly.percentage, Decimal::MAX);
        assert_eq!(pilly.status, TargetStatus::TargetReached);
        assert_eq!(
            store.running_total("op-pilly").unwrap(),
            dec("1000000000000000000000000000")
        );
    }

    #[test]
    fn test_report_reflects_committed_totals() {
        let roster = create_test_roster();
        let importer = Importer::new(&roster, ImportSettings::for_year(2024));
        let mut prior = HashMap::new();
        prior.insert("op-pilly".to_string(), dec("900.00"));
        let mut store = InMemoryAggregateStore::with_totals(prior);

        let outcome = importer
            .run(
                "01 de Setembro,RENATO,R$ 33,70,R$ 11,81,R$ 45,51\n".as_bytes(),
                &mut store,
            )
            .unwrap();

        assert_eq!(
            outcome.report,
            crate::report::build_report(&roster, &store).unwrap()
        );
        assert_eq!(outcome.report.operator("op-pilly").unwrap().percentage, dec("90.0"));
    }
}
