//! Command-line entry point for sales imports.
//!
//! Reads one sales export, applies it to the running totals and prints the
//! import summary together with the dashboard report as JSON.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::Level;

use sales_engine::config::ConfigLoader;
use sales_engine::ingestion::Importer;
use sales_engine::models::{ImportSummary, PerformanceReport};
use sales_engine::store::InMemoryAggregateStore;

#[derive(Parser, Debug)]
#[command(name = "sales-import", version, about = "Importa vendas e avalia metas")]
struct Cli {
    /// Configuration directory holding import.yaml and roster.yaml
    #[arg(short = 'c', long = "config", default_value = "./config/sample")]
    config: PathBuf,

    /// Sales export to import (stdin when absent)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Reference year for `<dia> de <mês>` dates
    #[arg(short = 'y', long = "year")]
    year: Option<i32>,

    /// JSON file of running totals by operator id, updated after the import
    #[arg(short = 't', long = "totals")]
    totals: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pretty: bool,

    /// Log row-level details
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    resumo: &'a ImportSummary,
    relatorio: &'a PerformanceReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let mut config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?
        .into_config();
    if let Some(year) = cli.year {
        config.set_reference_year(year);
    }

    let mut store = match &cli.totals {
        Some(path) => load_totals(path)?,
        None => InMemoryAggregateStore::new(),
    };

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let outcome = Importer::from_config(&config)
        .run(input, &mut store)
        .context("import failed")?;

    if let Some(path) = &cli.totals {
        save_totals(path, &store)?;
    }

    let output = Output {
        resumo: &outcome.summary,
        relatorio: &outcome.report,
    };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}

/// Loads prior running totals; a missing file means no prior totals.
fn load_totals(path: &Path) -> Result<InMemoryAggregateStore> {
    if !path.exists() {
        return Ok(InMemoryAggregateStore::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let totals: HashMap<String, Decimal> = serde_json::from_str(&content)
        .with_context(|| format!("parsing running totals in {}", path.display()))?;
    Ok(InMemoryAggregateStore::with_totals(totals))
}

fn save_totals(path: &Path, store: &InMemoryAggregateStore) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.snapshot())?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
