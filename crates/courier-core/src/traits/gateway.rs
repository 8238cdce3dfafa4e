// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion gateway trait for LLM aggregation API integrations.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::traits::adapter::RelayAdapter;
use crate::types::{CompletionReply, CompletionRequest};

/// Adapter for the LLM aggregation API boundary.
///
/// Implementations send a model identifier plus the full ordered transcript
/// and return the generated reply text, or a `Gateway` error carrying the
/// provider's failure description. Errors are never retried here.
#[async_trait]
pub trait CompletionGateway: RelayAdapter {
    /// Sends a completion request and returns the generated reply.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionReply, CourierError>;
}
