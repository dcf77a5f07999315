//! Provider boundary for LifeBench.
//!
//! The benchmark core never talks to the network; everything upstream goes
//! through the [`Provider`] trait here. Query outcomes carry errors in-band
//! so a failed call degrades one trial's score instead of aborting a batch.

pub mod openrouter;
pub mod traits;

pub use openrouter::OpenRouterProvider;
pub use traits::{Provider, ProviderConfig, QueryOutcome};
