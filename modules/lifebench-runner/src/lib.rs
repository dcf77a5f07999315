//! Benchmark orchestration: prompt building, the per-trial state machine,
//! suite running with bounded concurrency, and report writing.

pub mod config;
pub mod prompt;
pub mod report;
pub mod suite;
pub mod trial;

pub use config::Config;
pub use prompt::build_prompt;
pub use report::{run_output_path, save_report, write_comparison_csv, ModelComparison};
pub use suite::{run_suite, BenchmarkReport};
pub use trial::{run_trial, TrialResult};
