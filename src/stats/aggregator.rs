//! @ai:module:intent Per-category aggregation of execution records
//! @ai:module:layer application
//! @ai:module:public_api StatsAggregator, StatsAggregatorTrait
//! @ai:module:stateless true

use crate::catalog::{AlgorithmCategory, CategoryFilter, ExecutionRecord, KNOWN_CATEGORIES};
use crate::config::StatsConfig;
use crate::error::Result;
use crate::stats::types::CategoryStatsEntry;
use crate::store::{ExecutionRow, ExecutionStore};
use std::time::{Duration, Instant};

/// @ai:intent Trait for grouping execution rows into category statistics
pub trait StatsAggregatorTrait: Send + Sync {
    /// @ai:intent Summarize already-fetched rows for a category scope
    fn summarize(&self, rows: &[ExecutionRow], filter: &CategoryFilter) -> Vec<CategoryStatsEntry>;
}

/// @ai:intent Computes complete, zero-filled performance statistics per category
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    options: StatsConfig,
    store_timeout: Option<Duration>,
}

impl StatsAggregator {
    /// @ai:intent Create an aggregator with the given presentation options
    /// @ai:effects pure
    pub fn new(options: StatsConfig) -> Self {
        Self {
            options,
            store_timeout: None,
        }
    }

    /// @ai:intent Bound the store call made by each aggregation
    /// @ai:effects pure
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    /// @ai:intent Fetch matching executions and summarize them
    /// @ai:post unfiltered results hold exactly one entry per known category
    /// @ai:effects io (one store read)
    pub async fn compute_stats<S: ExecutionStore>(
        &self,
        store: &S,
        filter: &CategoryFilter,
    ) -> Result<Vec<CategoryStatsEntry>> {
        let started = Instant::now();
        let fetch = store.list_executions(filter);

        let rows = match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch).await??,
            None => fetch.await?,
        };

        tracing::debug!(
            filter = %filter,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Fetched execution rows for stats"
        );

        Ok(self.summarize(&rows, filter))
    }

    /// @ai:intent Calculate the entry for one non-empty group
    /// @ai:effects pure
    fn calculate_entry(category: AlgorithmCategory, records: &[&ExecutionRecord]) -> CategoryStatsEntry {
        CategoryStatsEntry {
            category,
            avg_execution_time: average(records.iter().map(|r| r.execution_time)),
            total_executions: records.len() as u64,
            avg_comparisons: average(records.iter().map(|r| r.comparisons as f64)),
            avg_swaps: average(records.iter().map(|r| r.swaps as f64)),
        }
    }

    /// @ai:intent Group rows by category, keeping first-seen order
    /// @ai:effects pure
    fn group_by_category(rows: &[ExecutionRow]) -> Vec<(AlgorithmCategory, Vec<&ExecutionRecord>)> {
        let mut groups: Vec<(AlgorithmCategory, Vec<&ExecutionRecord>)> = Vec::new();

        for row in rows {
            match groups.iter_mut().find(|(category, _)| *category == row.category) {
                Some((_, records)) => records.push(&row.record),
                None => groups.push((row.category, vec![&row.record])),
            }
        }

        groups
    }

    /// @ai:intent Apply the configured rounding
    /// @ai:effects pure
    fn present(&self, entry: CategoryStatsEntry) -> CategoryStatsEntry {
        if self.options.round {
            entry.rounded(self.options.precision)
        } else {
            entry
        }
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u64), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl StatsAggregatorTrait for StatsAggregator {
    /// @ai:intent Summarize rows, backfilling absent categories when unfiltered
    /// @ai:effects pure
    fn summarize(&self, rows: &[ExecutionRow], filter: &CategoryFilter) -> Vec<CategoryStatsEntry> {
        if rows.is_empty() {
            return KNOWN_CATEGORIES
                .iter()
                .filter(|category| filter.matches(**category))
                .map(|category| CategoryStatsEntry::placeholder(*category))
                .collect();
        }

        let mut entries: Vec<CategoryStatsEntry> = Self::group_by_category(rows)
            .iter()
            .map(|(category, records)| Self::calculate_entry(*category, records))
            .collect();

        if filter.is_all() {
            for category in KNOWN_CATEGORIES {
                if !entries.iter().any(|e| e.category == category) {
                    entries.push(CategoryStatsEntry::placeholder(category));
                }
            }
        }

        entries.into_iter().map(|e| self.present(e)).collect()
    }
}
