use serde::Serialize;
use tracing::debug;

use lifebench_core::{extract_board, random_board, step, Board, Score, Symbols, TestCase};
use llm_client::Provider;

use crate::prompt::build_prompt;

/// Final record of one evaluated trial. Created once, never mutated;
/// aggregation happens in the suite runner.
#[derive(Debug, Clone, Serialize)]
pub struct TrialResult {
    pub difficulty: String,
    pub test_type: String,
    pub grid_size: String,
    pub density: f64,
    pub seed: u64,
    pub initial_board: String,
    pub expected_board: String,
    pub predicted_board: String,
    pub cell_accuracy: f64,
    pub perfect_match: bool,
    pub correctness: f64,
    pub response_time: f64,
    pub raw_response: String,
    pub points_awarded: u32,
    pub max_points: u32,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub cost: f64,
}

/// A trial moves Generated -> Queried -> Parsed -> Scored, never backward.
/// Each state consumes the previous one, so the compiler enforces the
/// ordering; only `query` can fail upstream, and even that failure is
/// absorbed as scorable text.
pub struct Generated {
    case: TestCase,
    symbols: Symbols,
    initial: Board,
    expected: Board,
}

impl Generated {
    /// Local computation only; never fails.
    pub fn new(case: TestCase, symbols: Symbols) -> Self {
        let initial = random_board(case.rows, case.cols, case.density, case.seed);
        let expected = step(&initial);
        Self {
            case,
            symbols,
            initial,
            expected,
        }
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn expected(&self) -> &Board {
        &self.expected
    }

    /// Ask the provider for its prediction. A provider error becomes the
    /// literal `ERROR: <message>` response text and is scored like any
    /// other answer; one bad call never halts the batch.
    pub async fn query(self, provider: &dyn Provider) -> Queried {
        let prompt = build_prompt(&self.initial.encode(self.symbols));
        let outcome = provider.query(&prompt).await;

        let raw_response = match &outcome.error {
            Some(error) => format!("ERROR: {error}"),
            None => outcome.content.clone(),
        };

        Queried {
            case: self.case,
            symbols: self.symbols,
            initial: self.initial,
            expected: self.expected,
            raw_response,
            response_time: outcome.elapsed.as_secs_f64(),
            completion_tokens: outcome.completion_tokens.unwrap_or(0),
            total_tokens: outcome.total_tokens.unwrap_or(0),
            cost: outcome.cost.unwrap_or(0.0),
        }
    }
}

pub struct Queried {
    case: TestCase,
    symbols: Symbols,
    initial: Board,
    expected: Board,
    raw_response: String,
    response_time: f64,
    completion_tokens: u64,
    total_tokens: u64,
    cost: f64,
}

impl Queried {
    /// Extraction and decode are total, so parsing always succeeds; a
    /// garbage candidate simply decodes to a wrong-shaped board and is
    /// penalized by the scorer.
    pub fn parse(self) -> Parsed {
        let candidate = extract_board(&self.raw_response, self.symbols);
        let predicted = Board::decode(&candidate, self.symbols);
        debug!(
            grid = %self.case.grid_size(),
            predicted_shape = ?predicted.shape(),
            "parsed candidate board"
        );
        Parsed {
            case: self.case,
            symbols: self.symbols,
            initial: self.initial,
            expected: self.expected,
            raw_response: self.raw_response,
            response_time: self.response_time,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
            cost: self.cost,
            candidate,
            predicted,
        }
    }
}

pub struct Parsed {
    case: TestCase,
    symbols: Symbols,
    initial: Board,
    expected: Board,
    raw_response: String,
    response_time: f64,
    completion_tokens: u64,
    total_tokens: u64,
    cost: f64,
    candidate: String,
    predicted: Board,
}

impl Parsed {
    /// Terminal transition: compute all three metrics and finalize.
    pub fn score(self) -> TrialResult {
        let score = Score::compute(&self.predicted, &self.expected);
        let max_points = self.case.max_points();
        let points_awarded = if score.perfect_match { max_points } else { 0 };

        TrialResult {
            difficulty: self.case.difficulty.clone(),
            test_type: self.case.test_type.clone(),
            grid_size: self.case.grid_size(),
            density: self.case.density,
            seed: self.case.seed,
            initial_board: self.initial.encode(self.symbols),
            expected_board: self.expected.encode(self.symbols),
            predicted_board: self.candidate,
            cell_accuracy: score.cell_accuracy,
            perfect_match: score.perfect_match,
            correctness: score.correctness,
            response_time: self.response_time,
            raw_response: self.raw_response,
            points_awarded,
            max_points,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
            cost: self.cost,
        }
    }
}

/// Run one full trial.
pub async fn run_trial(case: TestCase, provider: &dyn Provider, symbols: Symbols) -> TrialResult {
    Generated::new(case, symbols)
        .query(provider)
        .await
        .parse()
        .score()
}
