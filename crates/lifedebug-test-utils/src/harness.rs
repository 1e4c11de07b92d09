// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end session testing.
//!
//! `TestHarness` wires a [`Session`] to a [`ReportClient`] and [`ChatClient`]
//! backed by a shared [`MockProvider`], so a test can drive image selection,
//! analysis and chat and then inspect the recorded provider requests.

use std::sync::Arc;

use lifedebug_agent::{ChatClient, ImageIntake, ReportClient, Session};
use lifedebug_core::{AnalysisVibe, ImageFile, LifeDebugError, LifeDebugReport, ProviderAdapter};

use crate::mock_provider::{MockProvider, MockReply};

/// Model name the harness clients send.
pub const TEST_MODEL: &str = "gemini-test";

/// Thinking budget the harness report client sends.
pub const TEST_THINKING_BUDGET: u32 = 2048;

/// Smallest valid JPEG header, enough for intake.
pub const SAMPLE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// A JPEG [`ImageFile`] built through intake.
pub fn sample_image() -> ImageFile {
    ImageIntake::from_bytes(SAMPLE_JPEG, "image/jpeg")
        .unwrap_or_else(|e| panic!("sample image must be accepted: {e}"))
}

/// A schema-conforming report body, as the model would return it.
pub fn sample_report_json() -> String {
    serde_json::json!({
        "ai_reaction": "Your desk called. It wants a lawyer.",
        "whats_broken": "Three weeks of mail and four coffee mugs.",
        "why_it_matters": "Unpaid bills hide in the pile.",
        "optimized_version": "One tray, zero mugs, bills filed.",
        "step_by_step_fix": ["Return the mugs", "Sort the mail", "File the bills"],
        "priority_tasks": ["P1: pay the electric bill", "P2: recycle flyers", "P3: buy a tray"],
        "future_prevention_plan": ["Open mail the day it arrives", "Mugs never stay overnight"],
        "follow_up_question": "Mugs first. Go. Tell me when they're in the sink?"
    })
    .to_string()
}

/// [`sample_report_json`] as a parsed report.
pub fn sample_report() -> LifeDebugReport {
    serde_json::from_str(&sample_report_json())
        .unwrap_or_else(|e| panic!("sample report must parse: {e}"))
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    default_vibe: AnalysisVibe,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            default_vibe: AnalysisVibe::default(),
        }
    }

    /// Append scripted provider replies, consumed in call order.
    pub fn with_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Queue a successful analysis reply ahead of any other replies.
    pub fn with_sample_report(mut self) -> Self {
        self.replies.insert(0, MockReply::Text(sample_report_json()));
        self
    }

    pub fn with_default_vibe(mut self, vibe: AnalysisVibe) -> Self {
        self.default_vibe = vibe;
        self
    }

    pub fn build(self) -> TestHarness {
        let provider = Arc::new(MockProvider::with_replies(self.replies));
        let dyn_provider: Arc<dyn ProviderAdapter> = provider.clone();

        TestHarness {
            report_client: ReportClient::new(dyn_provider.clone(), TEST_MODEL, TEST_THINKING_BUDGET),
            chat_client: ChatClient::new(dyn_provider, TEST_MODEL),
            session: Session::new(self.default_vibe),
            provider,
        }
    }
}

/// A session wired to mock-backed clients.
pub struct TestHarness {
    /// The mock provider shared by both clients.
    pub provider: Arc<MockProvider>,
    pub report_client: ReportClient,
    pub chat_client: ChatClient,
    pub session: Session,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Select [`sample_image`] in the session.
    pub fn select_sample_image(&mut self) -> Result<(), LifeDebugError> {
        self.session.select_image(sample_image())
    }

    /// Run an analysis through the session.
    pub async fn analyze(&mut self) -> Result<(), LifeDebugError> {
        self.session.run_analysis(&self.report_client).await
    }

    /// Send a chat message through the session and return the reply.
    pub async fn chat(&mut self, text: &str) -> Result<String, LifeDebugError> {
        self.session.run_chat(&self.chat_client, text).await
    }
}
