// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter API.
//!
//! Provides [`OpenRouterClient`] which handles request construction,
//! authentication, and attribution headers. Failures are surfaced once and
//! never retried; timeouts are whatever the HTTP client defaults to.

use courier_core::CourierError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Base URL for the OpenRouter API.
const API_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// HTTP client for OpenRouter communication.
///
/// Carries the bearer token plus the `HTTP-Referer` and `X-Title`
/// attribution headers on every request.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterClient {
    /// Creates a new OpenRouter API client.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key for bearer authentication
    /// * `referer` - value for the `HTTP-Referer` attribution header
    /// * `title` - value for the `X-Title` attribution header
    pub fn new(api_key: &str, referer: &str, title: &str) -> Result<Self, CourierError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| CourierError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        headers.insert(
            "HTTP-Referer",
            HeaderValue::from_str(referer)
                .map_err(|e| CourierError::Config(format!("invalid referer header value: {e}")))?,
        );
        headers.insert(
            "X-Title",
            HeaderValue::from_str(title)
                .map_err(|e| CourierError::Config(format!("invalid title header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| CourierError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a chat-completions request and returns the parsed response.
    ///
    /// Any transport failure, non-success status, or unparseable body maps
    /// to a `Gateway` error carrying the provider's description.
    pub async fn chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, CourierError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CourierError::Gateway {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = request.model.as_str(), "completion response received");

        let body = response.text().await.map_err(|e| CourierError::Gateway {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => match api_err.error.code {
                    Some(code) => {
                        format!("OpenRouter API error ({code}): {}", api_err.error.message)
                    }
                    None => format!("OpenRouter API error: {}", api_err.error.message),
                },
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(CourierError::gateway(message));
        }

        serde_json::from_str(&body).map_err(|e| CourierError::Gateway {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Probes the `/models` listing endpoint. Used for health checks only;
    /// the body is discarded.
    pub async fn probe_models(&self) -> Result<(), CourierError> {
        let url = format!("{}/models", self.base_url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| CourierError::Gateway {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CourierError::gateway(format!(
                "models endpoint returned {status}"
            )))
        }
    }
}
