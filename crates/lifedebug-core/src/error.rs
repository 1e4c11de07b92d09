// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Life Debugger.

use thiserror::Error;

/// Boxed error source carried by provider and client failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across the provider trait, clients, and session.
#[derive(Debug, Error)]
pub enum LifeDebugError {
    /// Configuration errors (missing credential header value, bad URL, etc.).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected at the boundary before any network effect.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Model provider errors (transport failure, HTTP status, malformed envelope).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<BoxedSource>,
    },

    /// The report call errored, returned no text, or returned text that is
    /// not a well-formed report.
    #[error("analysis failed: {message}")]
    AnalysisFailed {
        message: String,
        source: Option<BoxedSource>,
    },

    /// A chat turn failed. Callers of `send_turn` never see this; it is
    /// downgraded to a fallback reply.
    #[error("chat turn failed: {message}")]
    ChatTurnFailed {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LifeDebugError {
    /// Shorthand for [`LifeDebugError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Shorthand for a [`LifeDebugError::Provider`] without a source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error was raised before any network effect.
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
