//! @ai:module:intent Chart generation for performance statistics
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::report::StatsReport;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts from a stats snapshot
    fn generate_all(&self, report: &StatsReport, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates bar charts from stats snapshots
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Upper bound of the value axis, never zero
    /// @ai:effects pure
    fn axis_max(values: &[f64]) -> f64 {
        let max = values.iter().copied().fold(0.0, f64::max);

        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    /// @ai:intent Draw one bar per category
    /// @ai:effects fs:write
    fn generate_bar_chart(
        &self,
        caption: &str,
        y_desc: &str,
        data: &[(String, f64)],
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let values: Vec<f64> = data.iter().map(|(_, v)| *v).collect();
        let y_max = Self::axis_max(&values);

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..data.len().max(1) as i32, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_labels(data.len())
            .y_desc(y_desc)
            .x_desc("Category")
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *value)],
                BLUE.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts
    /// @ai:effects fs:write
    fn generate_all(&self, report: &StatsReport, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        let avg_time: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.category.to_string(), e.avg_execution_time))
            .collect();
        self.generate_bar_chart(
            "Average Execution Time by Category",
            "Time (ms)",
            &avg_time,
            &output_dir.join("avg_execution_time.png"),
        )?;
        generated.push("avg_execution_time.png".to_string());

        let totals: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.category.to_string(), e.total_executions as f64))
            .collect();
        self.generate_bar_chart(
            "Executions by Category",
            "Executions",
            &totals,
            &output_dir.join("total_executions.png"),
        )?;
        generated.push("total_executions.png".to_string());

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlgorithmCategory, KNOWN_CATEGORIES};
    use crate::stats::CategoryStatsEntry;
    use tempfile::TempDir;

    #[test]
    fn test_axis_max() {
        assert!((ChartGenerator::axis_max(&[0.0, 0.0]) - 1.0).abs() < f64::EPSILON);
        assert!((ChartGenerator::axis_max(&[10.0, 4.0]) - 11.0).abs() < 1e-9);
        assert!((ChartGenerator::axis_max(&[]) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_generate_all_charts() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let mut entries: Vec<_> = KNOWN_CATEGORIES
            .iter()
            .map(|c| CategoryStatsEntry::placeholder(*c))
            .collect();
        entries[0] = CategoryStatsEntry {
            category: AlgorithmCategory::Sorting,
            avg_execution_time: 20.0,
            total_executions: 3,
            avg_comparisons: 40.0,
            avg_swaps: 9.0,
        };
        let report = StatsReport::new(None, entries, vec![]);

        let files = generator.generate_all(&report, temp.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(temp.path().join("avg_execution_time.png").exists());
        assert!(temp.path().join("total_executions.png").exists());
    }
}
