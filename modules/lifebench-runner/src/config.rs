use std::env;

use tracing::info;

use llm_client::ProviderConfig;

/// Runner configuration loaded from environment variables.
///
/// Missing credentials abort before any trial runs; per-trial failures are
/// absorbed into scores instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub reasoning_effort: Option<String>,
    pub concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            api_key: required_env("OPENROUTER_API_KEY"),
            model: env::var("LIFEBENCH_MODEL")
                .unwrap_or_else(|_| "anthropic/claude-3.5-sonnet".to_string()),
            temperature: parsed_env("LIFEBENCH_TEMPERATURE", 0.0),
            max_tokens: parsed_env("LIFEBENCH_MAX_TOKENS", 1000),
            reasoning_effort: env::var("LIFEBENCH_REASONING_EFFORT").ok(),
            concurrency: parsed_env("LIFEBENCH_CONCURRENCY", 4),
        }
    }

    /// Minimal config for provider-free commands (preview).
    pub fn preview_from_env() -> Self {
        Self {
            api_key: String::new(),
            model: env::var("LIFEBENCH_MODEL")
                .unwrap_or_else(|_| "anthropic/claude-3.5-sonnet".to_string()),
            temperature: 0.0,
            max_tokens: 1000,
            reasoning_effort: None,
            concurrency: 1,
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            reasoning_effort: self.reasoning_effort.clone(),
        }
    }

    pub fn log_redacted(&self) {
        let key = if self.api_key.len() >= 8 {
            format!("****{}", &self.api_key[self.api_key.len() - 4..])
        } else if self.api_key.is_empty() {
            "NOT SET".to_string()
        } else {
            "****".to_string()
        };
        info!(
            api_key = %key,
            model = %self.model,
            temperature = self.temperature,
            max_tokens = self.max_tokens,
            concurrency = self.concurrency,
            "configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid number, got {value:?}")),
        Err(_) => default,
    }
}
