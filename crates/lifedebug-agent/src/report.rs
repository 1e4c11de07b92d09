// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The report client: one image in, one structured [`LifeDebugReport`] out.

use std::sync::Arc;

use lifedebug_core::types::{ContentBlock, ProviderMessage, ProviderRequest};
use lifedebug_core::{AnalysisVibe, ChatRole, LifeDebugError, LifeDebugReport, ProviderAdapter};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::persona;

/// The response schema sent with every analysis call.
///
/// Uses Gemini's OpenAPI-subset type names. All eight fields are required.
pub fn report_schema() -> Value {
    let string = |description: &str| json!({"type": "STRING", "description": description});
    let string_list = |description: &str| {
        json!({"type": "ARRAY", "items": {"type": "STRING"}, "description": description})
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "ai_reaction": string("A short, 1-sentence witty, funny, or sarcastic reaction to the image context based on the requested vibe."),
            "whats_broken": string("A concise summary of what is wrong, inefficient, or messy in the image."),
            "why_it_matters": string("The negative impact of the current state (stress, financial loss, wasted time)."),
            "optimized_version": string("A vivid description of what the ideal, fixed state looks like."),
            "step_by_step_fix": string_list("Actionable, ordered steps to fix the problem."),
            "priority_tasks": string_list("The top 3 most urgent tasks (P1, P2, P3)."),
            "future_prevention_plan": string_list("Habits or systems to prevent this from happening again."),
            "follow_up_question": string("A brief, engaging question or prompt to the user to encourage them to start the first task immediately."),
        },
        "required": [
            "ai_reaction",
            "whats_broken",
            "why_it_matters",
            "optimized_version",
            "step_by_step_fix",
            "priority_tasks",
            "future_prevention_plan",
            "follow_up_question"
        ]
    })
}

/// Parses model output into a report, enforcing the eight-field shape.
pub fn parse_report(text: &str) -> Result<LifeDebugReport, LifeDebugError> {
    if text.trim().is_empty() {
        return Err(LifeDebugError::AnalysisFailed {
            message: "no response generated from the model".into(),
            source: None,
        });
    }

    serde_json::from_str(text).map_err(|e| LifeDebugError::AnalysisFailed {
        message: format!("model output is not a valid report: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Sends analysis requests to a provider.
#[derive(Clone)]
pub struct ReportClient {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    thinking_budget: u32,
}

impl ReportClient {
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: impl Into<String>, thinking_budget: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            thinking_budget,
        }
    }

    /// Builds the single-turn request for an analysis. Pure.
    pub fn build_request(
        &self,
        image_base64: &str,
        mime_type: &str,
        vibe: AnalysisVibe,
        user_context: &str,
    ) -> ProviderRequest {
        ProviderRequest {
            model: self.model.clone(),
            system_instruction: None,
            messages: vec![ProviderMessage {
                role: ChatRole::User,
                content: vec![
                    ContentBlock::Image {
                        media_type: mime_type.to_string(),
                        data: image_base64.to_string(),
                    },
                    ContentBlock::Text {
                        text: persona::analysis_prompt(vibe, user_context),
                    },
                ],
            }],
            response_schema: Some(report_schema()),
            thinking_budget: Some(self.thinking_budget),
        }
    }

    /// Runs one analysis call. Exactly one outbound request; no retry.
    pub async fn analyze(
        &self,
        image_base64: &str,
        mime_type: &str,
        vibe: AnalysisVibe,
        user_context: &str,
    ) -> Result<LifeDebugReport, LifeDebugError> {
        if image_base64.is_empty() {
            return Err(LifeDebugError::invalid_input("no image data to analyze"));
        }

        info!(%vibe, model = %self.model, "analysis started");
        let request = self.build_request(image_base64, mime_type, vibe, user_context);

        let response = self.provider.complete(request).await.map_err(|e| {
            warn!(provider = self.provider.name(), error = %e, "analysis call failed");
            LifeDebugError::AnalysisFailed {
                message: e.to_string(),
                source: Some(Box::new(e)),
            }
        })?;

        let report = parse_report(response.text.as_deref().unwrap_or_default()).inspect_err(|e| {
            warn!(finish_reason = ?response.finish_reason, error = %e, "analysis response rejected");
        })?;

        info!(
            %vibe,
            steps = report.step_by_step_fix.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "analysis finished"
        );
        Ok(report)
    }
}
