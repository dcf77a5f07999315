use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Settings for one provider instance. Explicit value object; nothing here
/// is read from globals.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Optional reasoning-effort knob ("low" / "medium" / "high"), omitted
    /// from the request when unset.
    pub reasoning_effort: Option<String>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.0,
            max_tokens: 1000,
            reasoning_effort: None,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

/// What came back from one provider call. Transport failures, upstream
/// errors, and malformed responses all land in `error` — `query` itself
/// never fails, so a bad call is scorable rather than fatal.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub content: String,
    pub model: String,
    pub elapsed: Duration,
    pub error: Option<String>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    pub cost: Option<f64>,
}

impl QueryOutcome {
    pub fn failure(model: &str, elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            model: model.to_string(),
            elapsed,
            error: Some(error.into()),
            completion_tokens: None,
            total_tokens: None,
            cost: None,
        }
    }
}

/// One upstream API per implementation; the benchmark only ever sees this
/// trait.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn query(&self, prompt: &str) -> QueryOutcome;

    /// Model IDs this provider can serve.
    async fn list_models(&self) -> Result<Vec<String>>;
}
