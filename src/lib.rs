//! Sales Ingestion and Target Evaluation Engine
//!
//! This crate imports daily sales exports from point-of-sale operators,
//! attributes each sale's commission to a known operator, keeps per-operator
//! running totals and evaluates operators and stores against their monthly
//! commission targets.
//!
//! # Example
//!
//! ```no_run
//! use sales_engine::config::ConfigLoader;
//! use sales_engine::ingestion::Importer;
//! use sales_engine::store::InMemoryAggregateStore;
//!
//! let config = ConfigLoader::load("./config/sample")?.into_config();
//! let mut store = InMemoryAggregateStore::new();
//! let file = std::fs::File::open("setembro.csv").unwrap();
//!
//! let outcome = Importer::from_config(&config).run(file, &mut store)?;
//! println!("{} sales imported", outcome.summary.records_imported);
//! # Ok::<(), sales_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod ingestion;
pub mod models;
pub mod report;
pub mod store;
