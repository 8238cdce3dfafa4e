// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion gateway for deterministic testing.
//!
//! `MockGateway` implements [`CompletionGateway`] with pre-scripted replies
//! and failures, and records every request it receives so tests can assert
//! on the transcript and model that reached the provider.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::{
    AdapterType, CompletionGateway, CompletionReply, CompletionRequest, CourierError,
    HealthStatus, RelayAdapter,
};

/// A scripted outcome for one `complete` call.
enum Scripted {
    Reply(String),
    Failure(String),
}

/// A mock gateway that pops scripted outcomes from a FIFO queue.
///
/// When the queue is empty, a default "mock reply" text is returned.
pub struct MockGateway {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockGateway {
    /// Creates a mock gateway with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock gateway pre-loaded with the given reply texts.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            script: Arc::new(Mutex::new(
                replies.into_iter().map(Scripted::Reply).collect(),
            )),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.script.lock().await.push_back(Scripted::Reply(text.into()));
    }

    /// Queues a failure with the given provider description.
    pub async fn push_failure(&self, description: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Failure(description.into()));
    }

    /// Returns every request received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayAdapter for MockGateway {
    fn name(&self) -> &str {
        "mock-gateway"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Gateway
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionReply, CourierError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        match self.script.lock().await.pop_front() {
            Some(Scripted::Reply(text)) => Ok(CompletionReply {
                content: text,
                model,
                usage: None,
            }),
            Some(Scripted::Failure(description)) => Err(CourierError::gateway(description)),
            None => Ok(CompletionReply {
                content: "mock reply".to_string(),
                model,
                usage: None,
            }),
        }
    }
}
