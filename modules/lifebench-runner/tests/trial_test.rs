//! End-to-end trial and suite tests against stub providers. No network.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use lifebench_core::{standard_suite, step, Board, Symbols, TestCase};
use lifebench_runner::{run_suite, run_trial, ModelComparison};
use llm_client::{Provider, QueryOutcome};

/// Reads the board out of the prompt, simulates the step itself, and
/// answers with the correct next generation in a fenced block.
struct PerfectPlayer;

#[async_trait]
impl Provider for PerfectPlayer {
    async fn query(&self, prompt: &str) -> QueryOutcome {
        let symbols = Symbols::default();
        let board_lines: Vec<&str> = prompt
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.chars().all(|c| c == '#' || c == '.'))
            .collect();
        let board = Board::decode(&board_lines.join("\n"), symbols);
        let next = step(&board).encode(symbols);
        QueryOutcome {
            content: format!("Counting neighbors cell by cell.\n```\n{next}\n```"),
            model: "stub/perfect".to_string(),
            elapsed: Duration::from_millis(5),
            error: None,
            completion_tokens: Some(40),
            total_tokens: Some(150),
            cost: Some(0.001),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["stub/perfect".to_string()])
    }
}

/// Every call fails at the transport layer.
struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    async fn query(&self, _prompt: &str) -> QueryOutcome {
        QueryOutcome::failure("stub/failing", Duration::from_millis(1), "connection timed out")
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn perfect_player_aces_a_trial() {
    let case = TestCase::simple(5, 5, "Medium", 42);
    let result = run_trial(case, &PerfectPlayer, Symbols::default()).await;

    assert!(result.perfect_match);
    assert_eq!(result.cell_accuracy, 1.0);
    assert_eq!(result.correctness, 1.0);
    assert_eq!(result.points_awarded, 25);
    assert_eq!(result.max_points, 25);
    assert_eq!(result.predicted_board, result.expected_board);
    assert_eq!(result.grid_size, "5x5");
    assert_eq!(result.completion_tokens, 40);
}

#[tokio::test]
async fn provider_failure_is_scored_not_fatal() {
    let case = TestCase::simple(5, 5, "Medium", 42);
    let result = run_trial(case, &FailingProvider, Symbols::default()).await;

    assert!(result.raw_response.starts_with("ERROR: "));
    assert!(!result.perfect_match);
    assert_eq!(result.cell_accuracy, 0.0);
    assert_eq!(result.correctness, 0.0);
    assert_eq!(result.points_awarded, 0);
}

#[tokio::test]
async fn trial_is_reproducible_for_a_fixed_case() {
    let case = TestCase::simple(8, 8, "Hard", 43);
    let first = run_trial(case.clone(), &PerfectPlayer, Symbols::default()).await;
    let second = run_trial(case, &PerfectPlayer, Symbols::default()).await;

    assert_eq!(first.initial_board, second.initial_board);
    assert_eq!(first.expected_board, second.expected_board);
}

#[tokio::test]
async fn suite_aggregates_and_preserves_order() {
    let cases = &standard_suite()[..3];
    let report = run_suite(cases, &PerfectPlayer, "stub/perfect", Symbols::default(), 2).await;

    assert_eq!(report.total_tests, 3);
    assert_eq!(report.perfect_matches, 3);
    assert_eq!(report.overall_accuracy, 1.0);
    assert_eq!(report.mean_correctness, 1.0);
    assert_eq!(report.points_earned, report.max_points);
    let sizes: Vec<&str> = report.results.iter().map(|r| r.grid_size.as_str()).collect();
    assert_eq!(sizes, ["3x3", "3x3", "5x5"]);
}

#[tokio::test]
async fn failed_suite_still_produces_a_full_report() {
    let cases = standard_suite();
    let report = run_suite(&cases, &FailingProvider, "stub/failing", Symbols::default(), 4).await;

    assert_eq!(report.total_tests, 9);
    assert_eq!(report.perfect_matches, 0);
    assert_eq!(report.overall_accuracy, 0.0);
    assert_eq!(report.points_earned, 0);
    assert!(report.results.iter().all(|r| r.raw_response.starts_with("ERROR: ")));
}

#[tokio::test]
async fn comparison_row_sums_usage() {
    let cases = &standard_suite()[..2];
    let report = run_suite(cases, &PerfectPlayer, "stub/perfect", Symbols::default(), 1).await;
    let row = ModelComparison::from_report(&report, 1.25);

    assert_eq!(row.model, "stub/perfect");
    assert_eq!(row.completion_tokens_total, 80);
    assert_eq!(row.total_tokens_total, 300);
    assert_eq!(row.points_earned, 18);
    assert_eq!(row.max_points, 18);
    // Both 3x3 cases are perfect, so both labels show up.
    assert_eq!(row.correct_tests, "1:3x3@0.3;2:3x3@0.3");
    assert_eq!(row.time_seconds, 1.25);
}
