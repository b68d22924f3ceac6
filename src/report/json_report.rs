//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, STATS_JSON_FILE
//! @ai:module:stateless true

use crate::catalog::AlgorithmCategory;
use crate::report::StatsReport;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// File name of the JSON report inside a report directory
pub const STATS_JSON_FILE: &str = "stats.json";

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from a stats snapshot
    fn generate(&self, report: &StatsReport, output_path: &Path) -> Result<()>;
}

/// Headline numbers written next to the per-category entries
#[derive(Debug, Serialize)]
struct ReportSummary {
    total_executions: u64,
    total_algorithms: u64,
    /// Category with the most recorded executions, if any were recorded
    busiest_category: Option<AlgorithmCategory>,
    /// Category with the lowest mean execution time among those with executions
    fastest_category: Option<AlgorithmCategory>,
}

impl ReportSummary {
    fn from_report(report: &StatsReport) -> Self {
        let measured = || report.entries.iter().filter(|e| e.total_executions > 0);

        Self {
            total_executions: report.entries.iter().map(|e| e.total_executions).sum(),
            total_algorithms: report.catalog.iter().map(|c| c.count).sum(),
            busiest_category: measured()
                .max_by_key(|e| e.total_executions)
                .map(|e| e.category),
            fastest_category: measured()
                .min_by(|a, b| a.avg_execution_time.total_cmp(&b.avg_execution_time))
                .map(|e| e.category),
        }
    }
}

/// On-disk layout: the snapshot itself plus a `summary` block
#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    report: &'a StatsReport,
    summary: ReportSummary,
}

/// @ai:intent Generates JSON reports from stats snapshots
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Write the snapshot and its summary as pretty JSON
    /// @ai:effects fs:write
    fn generate(&self, report: &StatsReport, output_path: &Path) -> Result<()> {
        let document = JsonDocument {
            report,
            summary: ReportSummary::from_report(report),
        };

        std::fs::write(output_path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CatalogCount, CategoryStatsEntry};
    use serde_json::Value;
    use tempfile::TempDir;

    fn entry(category: AlgorithmCategory, time: f64, total: u64) -> CategoryStatsEntry {
        CategoryStatsEntry {
            category,
            avg_execution_time: time,
            total_executions: total,
            avg_comparisons: 0.0,
            avg_swaps: 0.0,
        }
    }

    #[test]
    fn test_generate_json_report_with_summary() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join(STATS_JSON_FILE);

        let report = StatsReport {
            generated_at: "2026-10-18T00:00:00Z".to_string(),
            category_filter: None,
            entries: vec![
                entry(AlgorithmCategory::Sorting, 20.0, 3),
                entry(AlgorithmCategory::Searching, 0.5, 1),
                CategoryStatsEntry::placeholder(AlgorithmCategory::Pathfinding),
            ],
            catalog: vec![
                CatalogCount {
                    category: AlgorithmCategory::Sorting,
                    count: 2,
                },
                CatalogCount {
                    category: AlgorithmCategory::Searching,
                    count: 1,
                },
            ],
        };

        reporter.generate(&report, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["total_executions"], 4);
        assert_eq!(value["summary"]["total_algorithms"], 3);
        assert_eq!(value["summary"]["busiest_category"], "sorting");
        assert_eq!(value["summary"]["fastest_category"], "searching");

        let parsed: StatsReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.entries, report.entries);
    }

    #[test]
    fn test_summary_of_empty_store_names_no_category() {
        let report = StatsReport::new(
            None,
            vec![CategoryStatsEntry::placeholder(AlgorithmCategory::Sorting)],
            vec![],
        );

        let summary = ReportSummary::from_report(&report);
        assert_eq!(summary.total_executions, 0);
        assert!(summary.busiest_category.is_none());
        assert!(summary.fastest_category.is_none());
    }
}
