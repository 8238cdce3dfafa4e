// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed mapping from selector codes to OpenRouter model identifiers.
//!
//! Built once at startup from configuration and never mutated. Menu order
//! is declaration order.

use courier_config::model::ModelsConfig;
use courier_core::CourierError;

/// One selectable model: code, OpenRouter identifier, and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChoice {
    pub code: char,
    pub model: String,
    pub label: String,
}

/// Read-only, declaration-ordered selector table.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    choices: Vec<ModelChoice>,
}

impl ModelRegistry {
    /// Builds the registry from configuration.
    ///
    /// Selector codes are validated during config loading; the conversion
    /// here still rejects non-single-character codes defensively.
    pub fn from_config(config: &ModelsConfig) -> Result<Self, CourierError> {
        let mut choices = Vec::with_capacity(config.choices.len());
        for entry in &config.choices {
            let mut chars = entry.code.chars();
            let code = chars.next().ok_or_else(|| {
                CourierError::Config("models.choices code must not be empty".into())
            })?;
            if chars.next().is_some() {
                return Err(CourierError::Config(format!(
                    "models.choices code `{}` must be a single character",
                    entry.code
                )));
            }
            choices.push(ModelChoice {
                code,
                model: entry.model.clone(),
                label: entry.label.clone(),
            });
        }
        Ok(Self { choices })
    }

    /// Resolves a selector code to its model identifier.
    ///
    /// The menu only ever offers registered codes, so a miss here is a
    /// defensive condition, not a user-facing error.
    pub fn resolve(&self, code: char) -> Result<&str, CourierError> {
        self.choices
            .iter()
            .find(|choice| choice.code == code)
            .map(|choice| choice.model.as_str())
            .ok_or(CourierError::UnknownSelector { code })
    }

    /// Returns the selectable models in declaration order.
    pub fn choices(&self) -> &[ModelChoice] {
        &self.choices
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_config::model::ModelChoiceConfig;

    fn config(rows: &[(&str, &str, &str)]) -> ModelsConfig {
        ModelsConfig {
            choices: rows
                .iter()
                .map(|(code, model, label)| ModelChoiceConfig {
                    code: code.to_string(),
                    model: model.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn resolves_registered_code() {
        let registry = ModelRegistry::from_config(&config(&[
            ("1", "openai/gpt-4o-mini", "GPT-4o Mini"),
            ("8", "deepseek/deepseek-chat", "DeepSeek V3"),
        ]))
        .unwrap();
        assert_eq!(registry.resolve('8').unwrap(), "deepseek/deepseek-chat");
    }

    #[test]
    fn unknown_code_is_an_error() {
        let registry = ModelRegistry::from_config(&config(&[(
            "1",
            "openai/gpt-4o-mini",
            "GPT-4o Mini",
        )]))
        .unwrap();
        let err = registry.resolve('9').unwrap_err();
        assert!(matches!(err, CourierError::UnknownSelector { code: '9' }));
    }

    #[test]
    fn choices_keep_declaration_order_not_alphabetical() {
        let registry = ModelRegistry::from_config(&config(&[
            ("z", "mistralai/mistral-large", "Mistral Large"),
            ("a", "openai/gpt-4o", "GPT-4o"),
            ("m", "deepseek/deepseek-chat", "DeepSeek V3"),
        ]))
        .unwrap();
        let codes: Vec<char> = registry.choices().iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!['z', 'a', 'm']);
    }

    #[test]
    fn default_table_loads() {
        let registry = ModelRegistry::from_config(&ModelsConfig::default()).unwrap();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.resolve('1').unwrap(), "openai/gpt-4o-mini");
    }

    #[test]
    fn multi_char_code_is_rejected() {
        let result = ModelRegistry::from_config(&config(&[(
            "10",
            "openai/gpt-4o",
            "GPT-4o",
        )]));
        assert!(matches!(result, Err(CourierError::Config(_))));
    }

    #[test]
    fn empty_code_is_rejected() {
        let result =
            ModelRegistry::from_config(&config(&[("", "openai/gpt-4o", "GPT-4o")]));
        assert!(matches!(result, Err(CourierError::Config(_))));
    }
}
