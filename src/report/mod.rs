//! @ai:module:intent Report generation for performance statistics
//! @ai:module:layer infrastructure
//! @ai:module:public_api StatsReport, ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator

pub mod charts;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use json_report::{JsonReporter, JsonReporterTrait, STATS_JSON_FILE};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::stats::{CatalogCount, CategoryStatsEntry};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Snapshot of performance and catalog statistics at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub generated_at: String,
    /// Category the entries were scoped to, if any
    #[serde(default)]
    pub category_filter: Option<String>,
    pub entries: Vec<CategoryStatsEntry>,
    #[serde(default)]
    pub catalog: Vec<CatalogCount>,
}

impl StatsReport {
    /// @ai:intent Stamp a report with the current time
    /// @ai:effects time
    pub fn new(
        category_filter: Option<String>,
        entries: Vec<CategoryStatsEntry>,
        catalog: Vec<CatalogCount>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            category_filter,
            entries,
            catalog,
        }
    }
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Generate all reports
    /// @ai:effects fs:write
    pub fn generate_all(&self, report: &StatsReport, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        self.json.generate(report, &output_dir.join(STATS_JSON_FILE))?;
        self.markdown.generate(report, &output_dir.join("stats.md"))?;
        self.charts.generate_all(report, output_dir)?;

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
