// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model registry for the Courier relay.
//!
//! Maps single-character selector codes, as presented on the Telegram model
//! menu, to OpenRouter model identifiers.

pub mod registry;

pub use registry::{ModelChoice, ModelRegistry};
