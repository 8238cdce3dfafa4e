// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Courier relay.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Courier workspace. The channel and
//! gateway adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CourierError;
pub use types::{
    AdapterType, CompletionReply, CompletionRequest, HealthStatus, Role, TokenUsage, Turn,
    UserId,
};

// Re-export the trait seams at crate root.
pub use traits::{CompletionGateway, RelayAdapter, SessionStore};
