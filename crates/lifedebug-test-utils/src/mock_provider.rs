// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with a queue of scripted
//! replies and records every request it receives, so tests can assert on
//! exactly what would have gone over the wire.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lifedebug_core::LifeDebugError;
use lifedebug_core::traits::adapter::PluginAdapter;
use lifedebug_core::traits::provider::ProviderAdapter;
use lifedebug_core::types::{HealthStatus, ProviderRequest, ProviderResponse, TokenUsage};

/// One scripted provider outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// A successful call returning this text.
    Text(String),
    /// A successful call with no text parts.
    Empty,
    /// A failed call (transport or API error).
    Error(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A mock provider that replays scripted replies and records requests.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::default(),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::text("mock response"))
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LifeDebugError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, LifeDebugError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        let text = match self.next_reply().await {
            MockReply::Text(text) => Some(text),
            MockReply::Empty => None,
            MockReply::Error(message) => return Err(LifeDebugError::provider(message)),
        };

        Ok(ProviderResponse {
            id: Some(format!("mock-resp-{}", uuid::Uuid::new_v4())),
            text,
            model,
            finish_reason: Some("STOP".to_string()),
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}
