// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Courier integration tests.

pub mod mock_gateway;

pub use mock_gateway::MockGateway;
