// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as single-character selector codes and known log levels.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CourierConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if let Some(ref token) = config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if config.openrouter.default_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openrouter.default_model must not be empty".to_string(),
        });
    }

    if config.models.choices.is_empty() {
        errors.push(ConfigError::Validation {
            message: "models.choices must declare at least one model".to_string(),
        });
    }

    let mut seen_codes = HashSet::new();
    for (i, choice) in config.models.choices.iter().enumerate() {
        if choice.code.chars().count() != 1 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "models.choices[{i}].code must be a single character, got `{}`",
                    choice.code
                ),
            });
        }
        if !seen_codes.insert(&choice.code) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate selector code `{}` in models.choices", choice.code),
            });
        }
        if choice.model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("models.choices[{i}].model must not be empty"),
            });
        }
        if choice.label.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("models.choices[{i}].label must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelChoiceConfig;

    #[test]
    fn default_config_validates() {
        let config = CourierConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = CourierConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn empty_bot_token_fails_validation() {
        let mut config = CourierConfig::default();
        config.telegram.bot_token = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("bot_token"))
        ));
    }

    #[test]
    fn multi_char_selector_code_fails_validation() {
        let mut config = CourierConfig::default();
        config.models.choices = vec![ModelChoiceConfig {
            code: "10".to_string(),
            model: "openai/gpt-4o".to_string(),
            label: "GPT-4o".to_string(),
        }];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("single character"))
        ));
    }

    #[test]
    fn duplicate_selector_codes_fail_validation() {
        let mut config = CourierConfig::default();
        config.models.choices = vec![
            ModelChoiceConfig {
                code: "1".to_string(),
                model: "openai/gpt-4o-mini".to_string(),
                label: "GPT-4o Mini".to_string(),
            },
            ModelChoiceConfig {
                code: "1".to_string(),
                model: "openai/gpt-4o".to_string(),
                label: "GPT-4o".to_string(),
            },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate selector code"))
        ));
    }

    #[test]
    fn empty_choice_list_fails_validation() {
        let mut config = CourierConfig::default();
        config.models.choices.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("at least one model"))
        ));
    }
}
