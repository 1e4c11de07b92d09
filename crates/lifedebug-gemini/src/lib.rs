// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for Life Debugger.
//!
//! This crate implements [`ProviderAdapter`] for the Gemini `generateContent`
//! API: multimodal turns, a system instruction, JSON-schema-constrained
//! output, and a thinking budget. Each call is a single request-response.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lifedebug_config::model::GeminiConfig;
use lifedebug_core::error::LifeDebugError;
use lifedebug_core::traits::{PluginAdapter, ProviderAdapter};
use lifedebug_core::types::{
    ChatRole, ContentBlock, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tracing::{debug, info, warn};

use crate::client::GeminiClient;
use crate::types::{
    Blob, Content, GenerateContentRequest, GenerationConfig, Part, SystemInstruction,
    ThinkingConfig,
};

/// Environment variables consulted, in order, when no key is configured.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` -> `API_KEY`. A
/// missing key does not fail construction; every call fails instead.
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the `[gemini]` config section.
    pub fn new(config: &GeminiConfig) -> Result<Self, LifeDebugError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), |name| std::env::var(name).ok());
        if api_key.is_none() {
            warn!("no Gemini API key configured; calls will fail until one is set");
        }

        let client = GeminiClient::new(
            api_key,
            &config.base_url,
            config.timeout_secs.map(Duration::from_secs),
        )?;

        info!(model = %config.model, "Gemini provider initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Model used for health checks and as the default for callers.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns true if a credential was found.
    pub fn has_api_key(&self) -> bool {
        self.client.has_api_key()
    }
}

/// Resolves the API key from config, then from the environment.
///
/// `lookup` reads a variable by name; the empty string counts as unset.
pub fn resolve_api_key<F>(config_key: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Some(key.to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty())
}

/// Converts a [`ProviderRequest`] to a Gemini [`GenerateContentRequest`].
fn to_generate_request(request: &ProviderRequest) -> GenerateContentRequest {
    let contents = request
        .messages
        .iter()
        .map(|m| Content {
            role: Some(role_name(m.role).to_string()),
            parts: m.content.iter().map(convert_block).collect(),
        })
        .collect();

    let system_instruction = request
        .system_instruction
        .as_ref()
        .map(|text| SystemInstruction {
            parts: vec![Part::text(text.clone())],
        });

    let config = GenerationConfig {
        response_mime_type: request
            .response_schema
            .as_ref()
            .map(|_| "application/json".to_string()),
        response_schema: request.response_schema.clone(),
        thinking_config: request
            .thinking_budget
            .map(|thinking_budget| ThinkingConfig { thinking_budget }),
    };

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: (!config.is_empty()).then_some(config),
    }
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

fn convert_block(block: &ContentBlock) -> Part {
    match block {
        ContentBlock::Text { text } => Part::text(text.clone()),
        ContentBlock::Image { media_type, data } => Part::InlineData {
            inline_data: Blob {
                mime_type: media_type.clone(),
                data: data.clone(),
            },
        },
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LifeDebugError> {
        if !self.client.has_api_key() {
            return Ok(HealthStatus::Unhealthy("no API key configured".into()));
        }
        // Model metadata lookup costs no tokens.
        match self.client.get_model(&self.model).await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Degraded(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, LifeDebugError> {
        let api_request = to_generate_request(&request);
        let response = self
            .client
            .generate_content(&request.model, &api_request)
            .await?;

        let text = response.text();
        let finish_reason = response.finish_reason().map(str::to_string);
        debug!(
            model = %request.model,
            finish_reason = ?finish_reason,
            has_text = text.is_some(),
            "completion received"
        );

        let usage = response.usage_metadata.unwrap_or_default();
        Ok(ProviderResponse {
            id: response.response_id,
            text,
            model: response.model_version.unwrap_or(request.model),
            finish_reason,
            usage: TokenUsage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage
                    .candidates_token_count
                    .saturating_add(usage.thoughts_token_count),
            },
        })
    }
}
