// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The chat client: stateless follow-up turns grounded in the analyzed image.
//!
//! Every call re-sends the full context: the image with a framing blurb, the
//! transcript so far, and the new message. The persona travels as the
//! system instruction.

use std::sync::Arc;

use lifedebug_core::types::{ContentBlock, ProviderMessage, ProviderRequest};
use lifedebug_core::{AnalysisVibe, ChatMessage, ChatRole, LifeDebugError, ProviderAdapter};
use tracing::{debug, warn};

use crate::persona;

/// Reply shown when a chat call fails for any reason.
pub const CHAT_ERROR_FALLBACK: &str = "Error connecting to Life Debugger.";

/// Reply shown when a chat call succeeds but the model returns no text.
pub const EMPTY_REPLY_FALLBACK: &str = "Connection interrupted.";

/// Builds the ordered turn list for one chat call. Pure.
///
/// `[user: image + blurb, ...history, user: new_message]`
pub fn build_turns(
    history: &[ChatMessage],
    new_message: &str,
    image_base64: &str,
    mime_type: &str,
    original_context: &str,
) -> Vec<ProviderMessage> {
    let mut turns = Vec::with_capacity(history.len() + 2);

    turns.push(ProviderMessage {
        role: ChatRole::User,
        content: vec![
            ContentBlock::Image {
                media_type: mime_type.to_string(),
                data: image_base64.to_string(),
            },
            ContentBlock::Text {
                text: persona::chat_context_blurb(original_context),
            },
        ],
    });
    turns.extend(
        history
            .iter()
            .map(|m| ProviderMessage::text(m.role, m.text.clone())),
    );
    turns.push(ProviderMessage::text(ChatRole::User, new_message));

    turns
}

/// Sends chat turns to a provider.
#[derive(Clone)]
pub struct ChatClient {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
}

impl ChatClient {
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Sends one turn, surfacing failures as [`LifeDebugError::ChatTurnFailed`].
    ///
    /// A successful call with no text yields [`EMPTY_REPLY_FALLBACK`].
    pub async fn try_send_turn(
        &self,
        history: &[ChatMessage],
        new_message: &str,
        image_base64: &str,
        mime_type: &str,
        vibe: AnalysisVibe,
        original_context: &str,
    ) -> Result<String, LifeDebugError> {
        let request = ProviderRequest {
            model: self.model.clone(),
            system_instruction: Some(persona::system_instruction(vibe).to_string()),
            messages: build_turns(history, new_message, image_base64, mime_type, original_context),
            response_schema: None,
            thinking_budget: None,
        };
        debug!(%vibe, turns = request.messages.len(), "sending chat turn");

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| LifeDebugError::ChatTurnFailed {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(response
            .text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }

    /// Sends one turn. Never fails: errors become [`CHAT_ERROR_FALLBACK`].
    pub async fn send_turn(
        &self,
        history: &[ChatMessage],
        new_message: &str,
        image_base64: &str,
        mime_type: &str,
        vibe: AnalysisVibe,
        original_context: &str,
    ) -> String {
        match self
            .try_send_turn(history, new_message, image_base64, mime_type, vibe, original_context)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat turn failed, using fallback reply");
                CHAT_ERROR_FALLBACK.to_string()
            }
        }
    }
}
