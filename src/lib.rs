//! @ai:module:intent Algorithm catalog and execution telemetry library
//! @ai:module:layer application
//! @ai:module:public_api config, catalog, error, store, stats, server, client, report

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod server;
pub mod stats;
pub mod store;

pub use catalog::{AlgorithmCategory, CatalogLoader, KNOWN_CATEGORIES};
pub use client::ApiClient;
pub use config::ServiceConfig;
pub use error::{ApiError, ValidationErrors};
pub use report::ReportGenerator;
pub use stats::{CategoryStatsEntry, StatsAggregator};
pub use store::{ExecutionStore, MemoryStore};
