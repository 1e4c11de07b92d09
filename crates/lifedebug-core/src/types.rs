// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the intake, clients, session, and provider adapters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// --- Session data ---

/// An uploaded image held in memory for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Raw image bytes, base64 encoded (standard alphabet, padded).
    pub base64: String,
    /// Declared MIME type, always `image/*`.
    pub mime_type: String,
    /// Renderable `data:` URL for previews.
    pub preview_url: String,
}

/// Persona selector for the analysis and every follow-up chat turn.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisVibe {
    /// Ruthless and funny.
    Roast,
    /// Direct and actionable.
    #[default]
    Constructive,
    /// Kind and supportive.
    Gentle,
    /// Terse, data only.
    Efficient,
}

impl AnalysisVibe {
    /// Short label shown in the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisVibe::Roast => "Roast Me",
            AnalysisVibe::Constructive => "Fix It",
            AnalysisVibe::Gentle => "Gentle",
            AnalysisVibe::Efficient => "Efficient",
        }
    }

    /// One-line description shown under the label.
    pub fn description(self) -> &'static str {
        match self {
            AnalysisVibe::Roast => "Ruthless & Funny",
            AnalysisVibe::Constructive => "Direct & Actionable",
            AnalysisVibe::Gentle => "Kind & Supportive",
            AnalysisVibe::Efficient => "Just Facts & Data",
        }
    }
}

/// The structured report returned by the analysis call.
///
/// Every field is required; deserialization fails if any key is missing,
/// null, or of the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeDebugReport {
    pub ai_reaction: String,
    pub whats_broken: String,
    pub why_it_matters: String,
    pub optimized_version: String,
    pub step_by_step_fix: Vec<String>,
    /// Intended length 3 (P1, P2, P3); not enforced locally.
    pub priority_tasks: Vec<String>,
    pub future_prevention_plan: Vec<String>,
    pub follow_up_question: String,
}

/// Speaker of a chat turn. Serialized with the remote API's role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

// --- Provider types ---

/// Health status reported by provider health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Provider is fully operational.
    Healthy,
    /// Provider is reachable but something is off.
    Degraded(String),
    /// Provider cannot serve requests.
    Unhealthy(String),
}

/// A piece of content inside a provider turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text.
    Text { text: String },
    /// Inline image bytes, base64 encoded.
    Image { media_type: String, data: String },
}

/// A single role-tagged turn sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: ChatRole,
    pub content: Vec<ContentBlock>,
}

impl ProviderMessage {
    /// A turn consisting of a single text block.
    pub fn text(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }
}

/// A generation request to a model provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    /// Model identifier (e.g., "gemini-3-pro-preview").
    pub model: String,
    /// Side-channel directive, not part of the turn list.
    pub system_instruction: Option<String>,
    /// Ordered turns.
    pub messages: Vec<ProviderMessage>,
    /// Constrain output to JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
    /// Token budget for model-side reasoning, if supported.
    pub thinking_budget: Option<u32>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Provider-assigned response id, when available.
    pub id: Option<String>,
    /// Generated text; `None` when the model produced no text parts.
    pub text: Option<String>,
    /// Model that served the request.
    pub model: String,
    /// Reason generation stopped.
    pub finish_reason: Option<String>,
    pub usage: TokenUsage,
}
