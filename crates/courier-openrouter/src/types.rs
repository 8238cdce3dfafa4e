// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter chat-completions API request/response types.
//!
//! OpenRouter speaks the OpenAI-compatible chat format: a model identifier
//! plus an ordered list of `{role, content}` messages.

use courier_core::{TokenUsage, Turn};
use serde::{Deserialize, Serialize};

/// A request to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// OpenRouter model identifier (e.g., "openai/gpt-4o-mini").
    pub model: String,

    /// The conversation so far, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// A single message in the chat format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.to_string(),
            content: turn.content.clone(),
        }
    }
}

/// A full response from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response id.
    #[serde(default)]
    pub id: Option<String>,

    /// Model that generated the response.
    #[serde(default)]
    pub model: Option<String>,

    /// Generated choices; the relay only ever reads the first.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    /// Token usage statistics, when reported.
    #[serde(default)]
    pub usage: Option<ApiUsage>,
}

/// One generated completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message.
    pub message: ChatMessage,

    /// Why generation stopped.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics from the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl From<ApiUsage> for TokenUsage {
    fn from(usage: ApiUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        }
    }
}

/// The error envelope OpenRouter returns on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error detail within the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}
