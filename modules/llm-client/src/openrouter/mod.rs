mod client;
mod types;

use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::traits::{Provider, ProviderConfig, QueryOutcome};
use client::OpenRouterClient;
use types::{ChatRequest, Reasoning, WireMessage};

/// Provider backed by the OpenRouter chat-completions API.
pub struct OpenRouterProvider {
    config: ProviderConfig,
    client: OpenRouterClient,
}

impl OpenRouterProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = OpenRouterClient::new(&config.api_key);
        Self { config, client }
    }

    /// Point at a different base URL (proxy or test double).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    async fn query(&self, prompt: &str) -> QueryOutcome {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![WireMessage::user(prompt)],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            reasoning: self
                .config
                .reasoning_effort
                .clone()
                .map(|effort| Reasoning { effort }),
        };

        let started = Instant::now();
        let response = match self.client.chat(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(model = %self.config.model, error = %err, "provider query failed");
                return QueryOutcome::failure(
                    &self.config.model,
                    started.elapsed(),
                    err.to_string(),
                );
            }
        };
        let elapsed = started.elapsed();

        let usage = response.usage;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        match content {
            Some(content) => QueryOutcome {
                content,
                model: self.config.model.clone(),
                elapsed,
                error: None,
                completion_tokens: usage.as_ref().and_then(|u| u.completion_tokens),
                total_tokens: usage.as_ref().and_then(|u| u.total_tokens),
                cost: usage.and_then(|u| u.cost),
            },
            None => QueryOutcome::failure(
                &self.config.model,
                elapsed,
                "invalid response format: no message content",
            ),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        self.client.list_models().await
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;
    use super::OpenRouterProvider;
    use crate::traits::{Provider, ProviderConfig};

    #[tokio::test]
    async fn transport_failure_is_carried_in_band() {
        // Nothing listens on port 1; the query must come back as an
        // outcome with an error, not an Err or a panic.
        let provider = OpenRouterProvider::new(ProviderConfig::new("key", "test/model"))
            .with_base_url("http://127.0.0.1:1");
        let outcome = provider.query("hello").await;
        assert!(outcome.error.is_some());
        assert!(outcome.content.is_empty());
        assert_eq!(outcome.model, "test/model");
    }

    #[test]
    fn reasoning_is_omitted_when_unset() {
        let request = ChatRequest {
            model: "test/model".to_string(),
            messages: vec![WireMessage::user("hello")],
            temperature: 0.0,
            max_tokens: 1000,
            reasoning: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("reasoning").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn reasoning_effort_serializes_when_set() {
        let request = ChatRequest {
            model: "test/model".to_string(),
            messages: vec![WireMessage::user("hello")],
            temperature: 0.0,
            max_tokens: 1000,
            reasoning: Some(Reasoning {
                effort: "high".to_string(),
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["reasoning"]["effort"], "high");
    }

    #[test]
    fn response_with_usage_deserializes() {
        let raw = r####"{
            "choices": [{"message": {"content": "###"}}],
            "usage": {"completion_tokens": 12, "total_tokens": 90, "cost": 0.0004}
        }"####;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("###")
        );
        let usage = response.usage.unwrap();
        assert_eq!(usage.completion_tokens, Some(12));
        assert_eq!(usage.cost, Some(0.0004));
    }

    #[test]
    fn response_without_choices_deserializes_to_empty() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());
        assert!(response.usage.is_none());
    }
}
