// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use lifedebug_core::AnalysisVibe;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LifeDebugConfig {
    /// Identity, logging, and default persona.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Terminal front end settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the shell prompt.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Vibe preselected for a fresh session and restored on reset.
    #[serde(default)]
    pub default_vibe: AnalysisVibe,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            default_vibe: AnalysisVibe::default(),
        }
    }
}

fn default_agent_name() -> String {
    "lifedebug".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to `GEMINI_API_KEY`, then `API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for both the report and the chat.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, without the `/models/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Reasoning budget for the report call. `0` disables thinking.
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,

    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            thinking_budget: default_thinking_budget(),
            timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_thinking_budget() -> u32 {
    2048
}

/// Terminal front end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// How often the loading ticker advances, in milliseconds.
    #[serde(default = "default_ticker_interval_ms")]
    pub ticker_interval_ms: u64,

    /// Colorize terminal output.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            ticker_interval_ms: default_ticker_interval_ms(),
            color: default_color(),
        }
    }
}

fn default_ticker_interval_ms() -> u64 {
    2500
}

fn default_color() -> bool {
    true
}
