use futures::StreamExt;
use serde::Serialize;
use tracing::info;

use lifebench_core::{Symbols, TestCase};
use llm_client::Provider;

use crate::trial::{run_trial, TrialResult};

/// Aggregated outcome of one suite run against one model.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub model: String,
    pub timestamp: String,
    pub results: Vec<TrialResult>,
    pub overall_accuracy: f64,
    pub mean_correctness: f64,
    pub perfect_matches: usize,
    pub total_tests: usize,
    pub points_earned: u32,
    pub max_points: u32,
}

/// Run every case against the provider with bounded concurrency.
///
/// Trials share nothing mutable, so they are safe to run in parallel; the
/// buffered stream preserves input order in the collected results.
pub async fn run_suite(
    cases: &[TestCase],
    provider: &dyn Provider,
    model: &str,
    symbols: Symbols,
    concurrency: usize,
) -> BenchmarkReport {
    info!(
        model,
        cases = cases.len(),
        concurrency,
        "starting benchmark suite"
    );

    let results: Vec<TrialResult> = futures::stream::iter(
        cases
            .iter()
            .cloned()
            .map(|case| run_trial(case, provider, symbols)),
    )
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let total_tests = results.len();
    let overall_accuracy = mean(results.iter().map(|r| r.cell_accuracy), total_tests);
    let mean_correctness = mean(results.iter().map(|r| r.correctness), total_tests);
    let perfect_matches = results.iter().filter(|r| r.perfect_match).count();
    let points_earned = results.iter().map(|r| r.points_awarded).sum();
    let max_points = results.iter().map(|r| r.max_points).sum();

    info!(
        model,
        overall_accuracy, mean_correctness, perfect_matches, total_tests, "suite finished"
    );

    BenchmarkReport {
        model: model.to_string(),
        timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        results,
        overall_accuracy,
        mean_correctness,
        perfect_matches,
        total_tests,
        points_earned,
        max_points,
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}
