// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the Courier relay's seams.

pub mod adapter;
pub mod gateway;
pub mod store;

pub use adapter::RelayAdapter;
pub use gateway::CompletionGateway;
pub use store::SessionStore;
