//! @ai:module:intent Performance statistics collection and aggregation
//! @ai:module:layer application
//! @ai:module:public_api CategoryStatsEntry, CatalogCount, StatsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{StatsAggregator, StatsAggregatorTrait};
pub use types::{CatalogCount, CategoryStatsEntry};
