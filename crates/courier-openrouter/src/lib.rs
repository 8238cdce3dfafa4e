// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter completion gateway for the Courier relay.
//!
//! This crate implements [`CompletionGateway`] against the OpenRouter
//! chat-completions API, mapping the relay's transcript into the
//! OpenAI-compatible message format.

pub mod client;
pub mod types;

use async_trait::async_trait;
use courier_config::model::OpenRouterConfig;
use courier_core::{
    AdapterType, CompletionGateway, CompletionReply, CompletionRequest, CourierError,
    HealthStatus, RelayAdapter,
};
use tracing::{debug, info};

use crate::client::OpenRouterClient;
use crate::types::{ChatMessage, ChatRequest};

/// OpenRouter gateway implementing [`CompletionGateway`].
///
/// API key resolution order: config -> `OPENROUTER_API_KEY` env var -> error.
pub struct OpenRouterGateway {
    client: OpenRouterClient,
}

impl OpenRouterGateway {
    /// Creates a new gateway from the given configuration.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, CourierError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenRouterClient::new(&api_key, &config.referer, &config.title)?;

        info!(
            default_model = config.default_model.as_str(),
            "OpenRouter gateway initialized"
        );

        Ok(Self { client })
    }

    /// Creates a gateway with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenRouterClient) -> Self {
        Self { client }
    }
}

/// Resolves the API key from config or the `OPENROUTER_API_KEY` env var.
fn resolve_api_key(configured: &Option<String>) -> Result<String, CourierError> {
    if let Some(key) = configured
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    match std::env::var("OPENROUTER_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(CourierError::Config(
            "OpenRouter API key required: set openrouter.api_key or OPENROUTER_API_KEY".into(),
        )),
    }
}

#[async_trait]
impl RelayAdapter for OpenRouterGateway {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Gateway
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        // The models listing is free; a completion would consume tokens.
        match self.client.probe_models().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "OpenRouter unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        debug!("OpenRouter gateway shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionGateway for OpenRouterGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionReply, CourierError> {
        let api_request = ChatRequest {
            model: request.model.clone(),
            messages: request.turns.iter().map(ChatMessage::from).collect(),
        };

        let response = self.client.chat_completion(&api_request).await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            CourierError::gateway("empty completion: provider returned no choices")
        })?;

        if choice.message.content.is_empty() {
            return Err(CourierError::gateway(
                "empty completion: provider returned no content",
            ));
        }

        Ok(CompletionReply {
            content: choice.message.content,
            model: response.model.unwrap_or(request.model),
            usage: response.usage.map(Into::into),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::Turn;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(base_url: &str) -> OpenRouterGateway {
        let client = OpenRouterClient::new("test-api-key", "http://localhost", "courier")
            .unwrap()
            .with_base_url(base_url.to_string());
        OpenRouterGateway::with_client(client)
    }

    fn completion_request() -> CompletionRequest {
        CompletionRequest {
            model: "openai/gpt-4o-mini".into(),
            turns: vec![
                Turn::user("What is Rust?"),
                Turn::assistant("A systems language."),
                Turn::user("Show me an example."),
            ],
        }
    }

    #[tokio::test]
    async fn complete_maps_turns_and_extracts_reply() {
        let server = MockServer::start().await;

        let expected_messages = serde_json::json!({
            "messages": [
                {"role": "user", "content": "What is Rust?"},
                {"role": "assistant", "content": "A systems language."},
                {"role": "user", "content": "Show me an example."}
            ]
        });

        let body = serde_json::json!({
            "id": "gen-1",
            "model": "openai/gpt-4o-mini",
            "choices": [
                {"message": {"role": "assistant", "content": "fn main() {}"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(&expected_messages))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let reply = gateway(&server.uri())
            .complete(completion_request())
            .await
            .unwrap();

        assert_eq!(reply.content, "fn main() {}");
        assert_eq!(reply.model, "openai/gpt-4o-mini");
        assert_eq!(reply.usage.unwrap().completion_tokens, 5);
    }

    #[tokio::test]
    async fn complete_rejects_empty_choice_list() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "id": "gen-2",
            "model": "openai/gpt-4o-mini",
            "choices": []
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let err = gateway(&server.uri())
            .complete(completion_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty completion"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_rejects_empty_content() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": ""}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let err = gateway(&server.uri())
            .complete(completion_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no content"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_passes_provider_error_through() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "error": {"message": "Insufficient credits", "code": 402}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(402).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway(&server.uri())
            .complete(completion_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Insufficient credits"), "got: {err}");
    }

    #[tokio::test]
    async fn health_check_reports_unreachable_provider() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let status = gateway(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(&Some("from-config".into())).unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn adapter_metadata() {
        let client =
            OpenRouterClient::new("test-api-key", "http://localhost", "courier").unwrap();
        let gateway = OpenRouterGateway::with_client(client);
        assert_eq!(gateway.name(), "openrouter");
        assert_eq!(gateway.adapter_type(), AdapterType::Gateway);
        assert_eq!(gateway.version(), semver::Version::new(0, 1, 0));
    }
}
