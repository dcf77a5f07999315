use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::suite::BenchmarkReport;

/// Write the full benchmark report as pretty JSON.
pub fn save_report(report: &BenchmarkReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing report to {}", path.display()))?;
    info!(path = %path.display(), "report saved");
    Ok(())
}

/// One model's row in the comparison CSV.
#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    pub model: String,
    pub correct_tests: String,
    pub completion_tokens_total: u64,
    pub total_tokens_total: u64,
    pub total_cost: f64,
    pub points_earned: u32,
    pub max_points: u32,
    pub time_seconds: f64,
}

impl ModelComparison {
    /// Summarize a suite run. `elapsed_seconds` is the wall time of the
    /// whole suite for this model, which differs from the sum of response
    /// times when trials run concurrently.
    pub fn from_report(report: &BenchmarkReport, elapsed_seconds: f64) -> Self {
        let correct: Vec<String> = report
            .results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.perfect_match)
            .map(|(idx, r)| format!("{}:{}@{}", idx + 1, r.grid_size, r.density))
            .collect();

        Self {
            model: report.model.clone(),
            correct_tests: correct.join(";"),
            completion_tokens_total: report.results.iter().map(|r| r.completion_tokens).sum(),
            total_tokens_total: report.results.iter().map(|r| r.total_tokens).sum(),
            total_cost: report.results.iter().map(|r| r.cost).sum(),
            points_earned: report.points_earned,
            max_points: report.max_points,
            time_seconds: elapsed_seconds,
        }
    }
}

const CSV_HEADER: &str = "model,correct_tests,completion_tokens_total,total_tokens_total,total_cost,points_earned,max_points,time_seconds";

/// Render comparison rows as CSV text.
pub fn render_comparison_csv(rows: &[ModelComparison]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{:.2}\n",
            csv_field(&row.model),
            csv_field(&row.correct_tests),
            row.completion_tokens_total,
            row.total_tokens_total,
            row.total_cost,
            row.points_earned,
            row.max_points,
            row.time_seconds,
        ));
    }
    out
}

pub fn write_comparison_csv(rows: &[ModelComparison], path: &Path) -> Result<()> {
    std::fs::write(path, render_comparison_csv(rows))
        .with_context(|| format!("writing comparison CSV to {}", path.display()))?;
    info!(path = %path.display(), "comparison CSV saved");
    Ok(())
}

/// Quote a field only when it would break the row.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Per-run output path: `results.csv` stays as-is for a single run,
/// otherwise becomes `results_run2.csv` and so on.
pub fn run_output_path(base: &str, run_number: usize, total_runs: usize) -> String {
    if total_runs == 1 {
        return base.to_string();
    }
    match base.rsplit_once('.') {
        Some((name, ext)) => format!("{name}_run{run_number}.{ext}"),
        None => format!("{base}_run{run_number}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ModelComparison {
        ModelComparison {
            model: "stub/model".to_string(),
            correct_tests: "1:5x5@0.3;3:8x8@0.25".to_string(),
            completion_tokens_total: 1200,
            total_tokens_total: 4800,
            total_cost: 0.0125,
            points_earned: 89,
            max_points: 189,
            time_seconds: 42.5,
        }
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let csv = render_comparison_csv(&[sample_row(), sample_row()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("stub/model,1:5x5@0.3;3:8x8@0.25,1200,4800,0.0125,89,189,42.50"));
    }

    #[test]
    fn csv_fields_with_commas_are_quoted() {
        let mut row = sample_row();
        row.model = "weird,model".to_string();
        let csv = render_comparison_csv(&[row]);
        assert!(csv.contains("\"weird,model\""));
    }

    #[test]
    fn single_run_keeps_base_path() {
        assert_eq!(run_output_path("out.csv", 1, 1), "out.csv");
    }

    #[test]
    fn multi_run_numbers_each_output() {
        assert_eq!(run_output_path("out.csv", 2, 3), "out_run2.csv");
        assert_eq!(run_output_path("results", 1, 2), "results_run1");
    }
}
