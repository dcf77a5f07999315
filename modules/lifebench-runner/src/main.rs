use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifebench_core::{load_test_cases, random_board, standard_suite, step, Symbols, TestCase};
use llm_client::{OpenRouterProvider, Provider};

use lifebench_runner::{
    build_prompt, run_output_path, run_suite, save_report, write_comparison_csv, BenchmarkReport,
    Config, ModelComparison,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("bench") => bench(&args[1..]).await,
        Some("compare") => compare(&args[1..]).await,
        Some("preview") => preview(&args[1..]),
        Some("models") => models().await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

const USAGE: &str = "Conway's Game of Life - LLM spatial reasoning benchmark

Usage:
  lifebench bench [--tests FILE] [--out PATH]     run the suite (standard, or from a test list)
  lifebench compare MODELS_FILE TESTS_FILE [--out PATH] [--runs N]
                                                  run a test list across many models, write CSV
  lifebench preview [SIZE] [SEED]                 show a test case and its prompt, no provider call
  lifebench models                                list model IDs available upstream

Environment:
  OPENROUTER_API_KEY           required for bench/compare/models
  LIFEBENCH_MODEL              model ID (default anthropic/claude-3.5-sonnet)
  LIFEBENCH_TEMPERATURE        sampling temperature (default 0.0)
  LIFEBENCH_MAX_TOKENS         completion budget (default 1000)
  LIFEBENCH_REASONING_EFFORT   optional low/medium/high
  LIFEBENCH_CONCURRENCY        trials in flight (default 4)";

async fn bench(args: &[String]) -> Result<()> {
    let tests_file = flag_value(args, "--tests");
    let out = flag_value(args, "--out").unwrap_or_else(|| "results.json".to_string());

    let config = Config::from_env();
    config.log_redacted();

    let cases = match &tests_file {
        Some(path) => load_cases_file(path)?,
        None => standard_suite(),
    };

    println!("Running benchmark with model: {}", config.model);
    println!("Test cases: {}", cases.len());
    println!("{}", "-".repeat(50));

    let provider = OpenRouterProvider::new(config.provider_config());
    let report = run_suite(
        &cases,
        &provider,
        &config.model,
        Symbols::default(),
        config.concurrency,
    )
    .await;

    for result in &report.results {
        let status = if result.perfect_match { "✓" } else { "✗" };
        println!(
            "{status} {} ({}, seed={}): accuracy={:.2}%, correctness={:.2}%, time={:.2}s",
            result.difficulty,
            result.grid_size,
            result.seed,
            result.cell_accuracy * 100.0,
            result.correctness * 100.0,
            result.response_time,
        );
    }

    println!("{}", "-".repeat(50));
    println!("Overall accuracy: {:.2}%", report.overall_accuracy * 100.0);
    println!("Mean correctness: {:.2}%", report.mean_correctness * 100.0);
    println!(
        "Perfect matches: {}/{}",
        report.perfect_matches, report.total_tests
    );
    println!(
        "Points: {}/{}",
        report.points_earned, report.max_points
    );

    save_report(&report, Path::new(&out))?;
    println!("Results saved to: {out}");

    print_detailed_results(&report);
    Ok(())
}

async fn compare(args: &[String]) -> Result<()> {
    // Positionals are whatever isn't a --flag and its value.
    let mut positional: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i].starts_with("--") {
            i += 2;
        } else {
            positional.push(args[i].as_str());
            i += 1;
        }
    }
    let (models_file, tests_file) = match positional.as_slice() {
        [models, tests] => (*models, *tests),
        _ => bail!("compare needs MODELS_FILE and TESTS_FILE\n\n{USAGE}"),
    };
    let out = flag_value(args, "--out").unwrap_or_else(|| "model_comparison.csv".to_string());
    let runs: usize = match flag_value(args, "--runs") {
        Some(value) => value.parse().context("--runs must be a positive integer")?,
        None => 1,
    };
    if runs == 0 {
        bail!("--runs must be at least 1");
    }

    let config = Config::from_env();
    config.log_redacted();

    let model_ids = load_models_file(models_file)?;
    let cases = load_cases_file(tests_file)?;

    for run_number in 1..=runs {
        if runs > 1 {
            println!("\n{}", "=".repeat(50));
            println!("RUN {run_number}/{runs}");
            println!("{}", "=".repeat(50));
        }

        let mut rows = Vec::with_capacity(model_ids.len());
        for model in &model_ids {
            println!("Running model: {model}");
            let provider =
                OpenRouterProvider::new(config.provider_config().with_model(model));

            let started = Instant::now();
            let report = run_suite(
                &cases,
                &provider,
                model,
                Symbols::default(),
                config.concurrency,
            )
            .await;
            let elapsed = started.elapsed().as_secs_f64();

            info!(
                model = %model,
                points = report.points_earned,
                max_points = report.max_points,
                elapsed,
                "model finished"
            );
            rows.push(ModelComparison::from_report(&report, elapsed));
        }

        let output_path = run_output_path(&out, run_number, runs);
        write_comparison_csv(&rows, Path::new(&output_path))?;
        println!("Saved CSV to: {output_path}");
    }

    if runs > 1 {
        println!("\nCompleted {runs} runs.");
    }
    Ok(())
}

fn preview(args: &[String]) -> Result<()> {
    let size: usize = match args.first() {
        Some(value) => value.parse().context("SIZE must be a positive integer")?,
        None => 5,
    };
    if size == 0 {
        bail!("SIZE must be at least 1");
    }
    let seed: u64 = match args.get(1) {
        Some(value) => value.parse().context("SEED must be an integer")?,
        None => TestCase::DEFAULT_SEED,
    };

    let config = Config::preview_from_env();
    let symbols = Symbols::default();
    let case = TestCase::simple(size, size, difficulty_label(size), seed);
    let initial = random_board(case.rows, case.cols, case.density, case.seed);
    let expected = step(&initial);

    println!(
        "{} ({}), seed={}, density={}",
        case.difficulty,
        case.grid_size(),
        case.seed,
        case.density
    );
    println!("{}", "-".repeat(40));

    println!("\nInitial board:");
    print_indented(&initial.encode(symbols));

    println!("\nExpected next state:");
    print_indented(&expected.encode(symbols));

    println!("\nPrompt that would be sent to {}:", config.model);
    println!("{}", "-".repeat(40));
    println!("{}", build_prompt(&initial.encode(symbols)));
    Ok(())
}

async fn models() -> Result<()> {
    let config = Config::from_env();
    let provider = OpenRouterProvider::new(config.provider_config());
    let models = provider.list_models().await?;
    for model in &models {
        println!("{model}");
    }
    info!(count = models.len(), "models listed");
    Ok(())
}

fn print_detailed_results(report: &BenchmarkReport) {
    println!("\n{}", "=".repeat(70));
    println!("DETAILED RESULTS - Model: {}", report.model);
    println!("Timestamp: {}", report.timestamp);
    println!("{}", "=".repeat(70));

    for (i, result) in report.results.iter().enumerate() {
        println!(
            "\nTest {}: {} ({}, seed={})",
            i + 1,
            result.difficulty,
            result.grid_size,
            result.seed
        );
        println!("  Cell accuracy: {:.2}%", result.cell_accuracy * 100.0);
        println!("  Correctness: {:.2}%", result.correctness * 100.0);
        println!("  Perfect match: {}", result.perfect_match);
        println!("  Response time: {:.2}s", result.response_time);

        if !result.perfect_match {
            println!("\n  Initial state:");
            print_indented(&result.initial_board);
            println!("\n  Expected:");
            print_indented(&result.expected_board);
            println!("\n  Predicted:");
            print_indented(&result.predicted_board);
            print_mismatch_map(&result.expected_board, &result.predicted_board);
        }
    }
}

/// Mark each cell where predicted differs from expected with '*'. Only
/// printed for rows both boards have; a shape mismatch is already obvious
/// from the boards themselves.
fn print_mismatch_map(expected: &str, predicted: &str) {
    println!("\n  Mismatches marked with *:");
    for (expected_line, predicted_line) in expected.lines().zip(predicted.lines()) {
        let diff: String = expected_line
            .chars()
            .zip(predicted_line.chars())
            .map(|(e, p)| if e == p { '.' } else { '*' })
            .collect();
        println!("    {diff}");
    }
}

fn print_indented(board: &str) {
    for line in board.lines() {
        println!("    {line}");
    }
}

fn difficulty_label(size: usize) -> &'static str {
    match size {
        0..=3 => "Easy",
        4..=5 => "Medium",
        6..=8 => "Hard",
        9..=10 => "Expert",
        _ => "Custom",
    }
}

fn load_cases_file(path: &str) -> Result<Vec<TestCase>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading test list {path}"))?;
    let cases = load_test_cases(&text).with_context(|| format!("loading test list {path}"))?;
    info!(path, cases = cases.len(), "test list loaded");
    Ok(cases)
}

/// One model ID per non-blank, non-comment line.
fn load_models_file(path: &str) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading models file {path}"))?;
    let models: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    if models.is_empty() {
        bail!("no models found in {path}");
    }
    Ok(models)
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .cloned()
}
