// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for hosted multimodal models.

use async_trait::async_trait;

use crate::error::LifeDebugError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for a generative model API.
///
/// Each call is independent: the remote side keeps no conversation state, so
/// callers resend the full context every time.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a generation request and returns the full response.
    async fn complete(&self, request: ProviderRequest)
    -> Result<ProviderResponse, LifeDebugError>;
}
