// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Courier relay.

use thiserror::Error;

/// The primary error type used across all Courier crates.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration errors (invalid TOML, missing required values, bad types).
    #[error("configuration error: {0}")]
    Config(String),

    /// Messaging channel errors (connection failure, send/edit failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Completion gateway errors (transport failure, provider error, malformed
    /// or empty completion).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A model selector code that is not present in the registry.
    ///
    /// The menu is the only source of selector codes, so this is a defensive
    /// condition rather than a user-facing error.
    #[error("unknown model selector `{code}`")]
    UnknownSelector { code: char },

    /// Internal or unexpected errors (programmer errors, broken invariants).
    #[error("internal error: {0}")]
    Internal(String),
}

impl CourierError {
    /// Builds a gateway error from a provider-supplied description.
    pub fn gateway(message: impl Into<String>) -> Self {
        CourierError::Gateway {
            message: message.into(),
            source: None,
        }
    }
}
