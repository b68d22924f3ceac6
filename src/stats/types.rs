//! @ai:module:intent Statistic types produced by the aggregation endpoints
//! @ai:module:layer domain
//! @ai:module:public_api CategoryStatsEntry, CatalogCount
//! @ai:module:stateless true

use crate::catalog::AlgorithmCategory;
use serde::{Deserialize, Serialize};

/// @ai:intent Execution statistics for one algorithm category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatsEntry {
    #[serde(rename = "algorithm_type")]
    pub category: AlgorithmCategory,
    pub avg_execution_time: f64,
    pub total_executions: u64,
    pub avg_comparisons: f64,
    pub avg_swaps: f64,
}

impl CategoryStatsEntry {
    /// @ai:intent Zero-valued entry for a category without executions
    /// @ai:effects pure
    pub fn placeholder(category: AlgorithmCategory) -> Self {
        Self {
            category,
            avg_execution_time: 0.0,
            total_executions: 0,
            avg_comparisons: 0.0,
            avg_swaps: 0.0,
        }
    }

    /// @ai:intent Round every average to a number of decimal places
    /// @ai:effects pure
    pub fn rounded(self, precision: u32) -> Self {
        Self {
            avg_execution_time: round_to(self.avg_execution_time, precision),
            avg_comparisons: round_to(self.avg_comparisons, precision),
            avg_swaps: round_to(self.avg_swaps, precision),
            ..self
        }
    }
}

/// @ai:intent Number of catalogued algorithms in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCount {
    #[serde(rename = "algorithm_type")]
    pub category: AlgorithmCategory,
    pub count: u64,
}

/// @ai:intent Round half away from zero to `precision` decimal places
/// @ai:effects pure
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor
}
