//! LifeBench core: deterministic Game of Life boards, the one-step
//! simulator, model-output extraction, and scoring.
//!
//! Everything in this crate is pure and synchronous. The only I/O anywhere
//! in the benchmark is the provider call, which lives in `llm-client`.

pub mod board;
pub mod cases;
pub mod error;
pub mod extract;
pub mod generate;
pub mod life;
pub mod score;

pub use board::{Board, Symbols};
pub use cases::{load_test_cases, standard_suite, TestCase};
pub use error::LifeBenchError;
pub use extract::extract_board;
pub use generate::random_board;
pub use life::step;
pub use score::{cell_accuracy, correctness, is_perfect_match, Score};
