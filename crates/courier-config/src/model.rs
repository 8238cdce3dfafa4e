// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Courier relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level Courier configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// Relay identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// OpenRouter API settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Conversation session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Model menu settings.
    #[serde(default)]
    pub models: ModelsConfig,
}

/// Relay identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the relay.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "courier".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` falls back to the `TELEGRAM_BOT_TOKEN`
    /// environment variable.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Allow-listed Telegram account ids. Empty means every account is
    /// allowed. Accepts a TOML integer array or a comma-separated string
    /// (the latter so `COURIER_TELEGRAM_ALLOWED_USERS="1,2"` works).
    #[serde(default, deserialize_with = "deserialize_user_list")]
    pub allowed_users: Vec<u64>,
}

/// OpenRouter API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// OpenRouter API key. `None` falls back to the `OPENROUTER_API_KEY`
    /// environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for accounts that never picked one from the menu.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Value for the `HTTP-Referer` attribution header.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Value for the `X-Title` attribution header.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_referer() -> String {
    std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost".to_string())
}

fn default_title() -> String {
    "courier".to_string()
}

/// Conversation session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Whether a user turn whose gateway call failed stays in the transcript.
    /// When false, the pending turn is rolled back before the error notice
    /// is sent.
    #[serde(default = "default_keep_failed_turns")]
    pub keep_failed_turns: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keep_failed_turns: default_keep_failed_turns(),
        }
    }
}

fn default_keep_failed_turns() -> bool {
    true
}

/// Model menu configuration.
///
/// `choices` order is the menu order; it is never sorted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Selectable models, in declaration order.
    #[serde(default = "default_choices")]
    pub choices: Vec<ModelChoiceConfig>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            choices: default_choices(),
        }
    }
}

/// One selectable model: a single-character code, the OpenRouter model
/// identifier it maps to, and the label shown on the menu button.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelChoiceConfig {
    pub code: String,
    pub model: String,
    pub label: String,
}

fn default_choices() -> Vec<ModelChoiceConfig> {
    [
        ("1", "openai/gpt-4o-mini", "GPT-4o Mini"),
        ("2", "openai/gpt-4o", "GPT-4o"),
        ("3", "anthropic/claude-3.5-sonnet", "Claude 3.5 Sonnet"),
        ("4", "anthropic/claude-3.5-haiku", "Claude 3.5 Haiku"),
        ("5", "google/gemini-flash-1.5", "Gemini 1.5 Flash"),
        ("6", "meta-llama/llama-3.1-70b-instruct", "Llama 3.1 70B"),
        ("7", "mistralai/mistral-large", "Mistral Large"),
        ("8", "deepseek/deepseek-chat", "DeepSeek V3"),
    ]
    .into_iter()
    .map(|(code, model, label)| ModelChoiceConfig {
        code: code.to_string(),
        model: model.to_string(),
        label: label.to_string(),
    })
    .collect()
}

/// Accepts a TOML integer array, a single integer, or a comma-separated
/// string of ids. Environment values like `"42"` arrive as integers.
fn deserialize_user_list<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<u64>),
        Single(u64),
        Csv(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::List(ids) => Ok(ids),
        Raw::Single(id) => Ok(vec![id]),
        Raw::Csv(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u64>().map_err(|e| {
                    serde::de::Error::custom(format!("invalid user id `{part}`: {e}"))
                })
            })
            .collect(),
    }
}
