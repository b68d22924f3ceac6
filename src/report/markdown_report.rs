//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::report::StatsReport;
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from a stats snapshot
    fn generate(&self, report: &StatsReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from stats snapshots
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Generate report header
    /// @ai:effects pure
    fn generate_summary(report: &StatsReport) -> Result<String> {
        let mut output = String::new();
        let total: u64 = report.entries.iter().map(|e| e.total_executions).sum();

        writeln!(output, "# Algorithm Performance Statistics")?;
        writeln!(output)?;
        writeln!(output, "**Generated:** {}", report.generated_at)?;
        writeln!(
            output,
            "**Scope:** {}",
            report.category_filter.as_deref().unwrap_or("all categories")
        )?;
        writeln!(output, "**Total executions:** {}", total)?;
        writeln!(output)?;

        Ok(output)
    }

    /// @ai:intent Generate per-category performance table
    /// @ai:effects pure
    fn generate_performance_table(report: &StatsReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "## Performance by Category")?;
        writeln!(output)?;
        writeln!(
            output,
            "| Category | Executions | Avg Time (ms) | Avg Comparisons | Avg Swaps |"
        )?;
        writeln!(output, "|----------|------------|---------------|-----------------|-----------|")?;

        for entry in &report.entries {
            writeln!(
                output,
                "| {} | {} | {:.2} | {:.1} | {:.1} |",
                entry.category,
                entry.total_executions,
                entry.avg_execution_time,
                entry.avg_comparisons,
                entry.avg_swaps
            )?;
        }

        writeln!(output)?;
        Ok(output)
    }

    /// @ai:intent Generate catalog size section
    /// @ai:effects pure
    fn generate_catalog_section(report: &StatsReport) -> Result<String> {
        let mut output = String::new();

        if report.catalog.is_empty() {
            return Ok(output);
        }

        writeln!(output, "## Catalog")?;
        writeln!(output)?;
        writeln!(output, "| Category | Algorithms |")?;
        writeln!(output, "|----------|------------|")?;

        for count in &report.catalog {
            writeln!(output, "| {} | {} |", count.category, count.count)?;
        }

        writeln!(output)?;
        Ok(output)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &StatsReport, output_path: &Path) -> Result<()> {
        let mut content = String::new();

        content.push_str(&Self::generate_summary(report)?);
        content.push_str(&Self::generate_performance_table(report)?);
        content.push_str(&Self::generate_catalog_section(report)?);

        std::fs::write(output_path, content)?;
        Ok(())
    }
}
