// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session flows against a scripted provider: analysis, chat, failure and reset.

use std::sync::Arc;

use lifedebug_agent::{
    ANALYSIS_FAILED_BANNER, CHAT_ERROR_FALLBACK, ChatClient, EMPTY_REPLY_FALLBACK, ImageIntake,
    ReportClient, SessionPhase, persona,
};
use lifedebug_core::types::{ContentBlock, ProviderRequest};
use lifedebug_core::{AnalysisVibe, ChatMessage, ChatRole, LifeDebugError, ProviderAdapter};
use lifedebug_test_utils::harness::{SAMPLE_JPEG, TEST_MODEL, TEST_THINKING_BUDGET};
use lifedebug_test_utils::{MockProvider, MockReply, TestHarness, sample_image, sample_report};

fn first_turn_text(request: &ProviderRequest) -> &str {
    request.messages[0]
        .content
        .iter()
        .find_map(|b| match b {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Image { .. } => None,
        })
        .unwrap_or_default()
}

fn turn_texts(request: &ProviderRequest) -> Vec<(ChatRole, String)> {
    request
        .messages
        .iter()
        .map(|m| {
            let text = m
                .content
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    ContentBlock::Image { .. } => None,
                })
                .collect::<String>();
            (m.role, text)
        })
        .collect()
}

/// JPEG + roast + empty context: one call carrying the roast persona and the
/// image; the report is stored and its question seeds the transcript.
#[tokio::test]
async fn roast_analysis_of_jpeg() {
    let mut harness = TestHarness::builder().with_sample_report().build();
    harness.select_sample_image().unwrap();
    harness.session.set_vibe(AnalysisVibe::Roast).unwrap();

    harness.analyze().await.unwrap();

    let requests = harness.provider.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model, TEST_MODEL);
    assert_eq!(request.thinking_budget, Some(TEST_THINKING_BUDGET));
    assert!(request.response_schema.is_some());
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, ChatRole::User);
    assert!(matches!(
        &request.messages[0].content[0],
        ContentBlock::Image { media_type, data }
            if media_type == "image/jpeg" && *data == sample_image().base64
    ));
    assert!(first_turn_text(request).starts_with(persona::system_instruction(AnalysisVibe::Roast)));
    assert!(first_turn_text(request).contains("USER CONTEXT/PROMPT: \"\""));

    assert_eq!(harness.session.phase(), SessionPhase::Reported);
    assert_eq!(harness.session.report(), Some(&sample_report()));
    assert_eq!(
        harness.session.transcript(),
        &[ChatMessage::model(sample_report().follow_up_question)]
    );
}

/// First chat after a report: turns are the image framing plus the new
/// message, with the persona as the system instruction.
#[tokio::test]
async fn first_chat_turn_sends_only_framing_and_message() {
    let mut harness = TestHarness::builder()
        .with_sample_report()
        .with_default_vibe(AnalysisVibe::Gentle)
        .build();
    harness.select_sample_image().unwrap();
    harness.session.set_context("my desk").unwrap();
    harness.analyze().await.unwrap();
    harness.provider.push_reply(MockReply::text("Start with the mugs.")).await;

    let reply = harness.chat("what should I do first?").await.unwrap();
    assert_eq!(reply, "Start with the mugs.");

    let requests = harness.provider.requests().await;
    let chat = &requests[1];
    assert_eq!(
        chat.system_instruction.as_deref(),
        Some(persona::system_instruction(AnalysisVibe::Gentle))
    );
    assert!(chat.response_schema.is_none());
    assert!(chat.thinking_budget.is_none());
    assert_eq!(
        turn_texts(chat),
        vec![
            (ChatRole::User, persona::chat_context_blurb("my desk")),
            (ChatRole::User, "what should I do first?".to_string()),
        ]
    );

    let transcript = harness.session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2], ChatMessage::model("Start with the mugs."));
}

/// Later turns replay every prior exchange in order.
#[tokio::test]
async fn chat_history_is_replayed_in_order() {
    let mut harness = TestHarness::builder()
        .with_sample_report()
        .with_replies(vec![MockReply::text("r1"), MockReply::text("r2")])
        .build();
    harness.select_sample_image().unwrap();
    harness.analyze().await.unwrap();
    harness.chat("m1").await.unwrap();
    harness.chat("m2").await.unwrap();

    let requests = harness.provider.requests().await;
    let roles_and_text = turn_texts(&requests[2]);
    assert_eq!(roles_and_text.len(), 4);
    assert_eq!(roles_and_text[1], (ChatRole::User, "m1".to_string()));
    assert_eq!(roles_and_text[2], (ChatRole::Model, "r1".to_string()));
    assert_eq!(roles_and_text[3], (ChatRole::User, "m2".to_string()));
}

/// A network error during analysis leaves the selection intact and retryable.
#[tokio::test]
async fn failed_analysis_shows_banner_and_can_retry() {
    let mut harness = TestHarness::builder()
        .with_replies(vec![MockReply::Error("connection refused".into())])
        .build();
    harness.select_sample_image().unwrap();
    harness.session.set_vibe(AnalysisVibe::Efficient).unwrap();

    let err = harness.analyze().await.unwrap_err();
    assert!(matches!(err, LifeDebugError::AnalysisFailed { .. }));
    assert_eq!(harness.session.error_banner(), Some(ANALYSIS_FAILED_BANNER));
    assert_eq!(harness.session.phase(), SessionPhase::ImageSelected);
    assert_eq!(harness.session.image(), Some(&sample_image()));
    assert_eq!(harness.session.vibe(), AnalysisVibe::Efficient);
    assert!(harness.session.report().is_none());

    harness
        .provider
        .push_reply(MockReply::Text(lifedebug_test_utils::sample_report_json()))
        .await;
    harness.analyze().await.unwrap();
    assert!(harness.session.error_banner().is_none());
    assert_eq!(harness.provider.call_count().await, 2);
}

#[tokio::test]
async fn empty_or_malformed_analysis_text_fails() {
    for reply in [
        MockReply::Empty,
        MockReply::text("   "),
        MockReply::text("not json at all"),
        MockReply::text(r#"{"ai_reaction": "only one field"}"#),
    ] {
        let mut harness = TestHarness::builder().with_replies(vec![reply]).build();
        harness.select_sample_image().unwrap();
        let err = harness.analyze().await.unwrap_err();
        assert!(matches!(err, LifeDebugError::AnalysisFailed { .. }), "got: {err:?}");
        assert!(harness.session.report().is_none());
    }
}

#[tokio::test]
async fn chat_failures_degrade_to_fallback_text() {
    let mut harness = TestHarness::builder()
        .with_sample_report()
        .with_replies(vec![MockReply::Error("503".into()), MockReply::Empty])
        .build();
    harness.select_sample_image().unwrap();
    harness.analyze().await.unwrap();

    assert_eq!(harness.chat("hello?").await.unwrap(), CHAT_ERROR_FALLBACK);
    assert_eq!(harness.chat("anyone?").await.unwrap(), EMPTY_REPLY_FALLBACK);
    assert_eq!(harness.session.phase(), SessionPhase::Reported);
    assert_eq!(harness.session.transcript().len(), 5);
}

#[tokio::test]
async fn try_send_turn_exposes_failure_detail() {
    let provider = Arc::new(MockProvider::with_replies(vec![MockReply::Error(
        "quota exceeded".into(),
    )]));
    let client = ChatClient::new(provider.clone() as Arc<dyn ProviderAdapter>, TEST_MODEL);

    let err = client
        .try_send_turn(&[], "hi", "AAAA", "image/png", AnalysisVibe::Roast, "")
        .await
        .unwrap_err();
    assert!(matches!(err, LifeDebugError::ChatTurnFailed { .. }));
    assert!(err.to_string().contains("quota exceeded"));
}

#[tokio::test]
async fn non_image_is_rejected_before_any_call() {
    let provider = Arc::new(MockProvider::new());
    let client = ReportClient::new(provider.clone() as Arc<dyn ProviderAdapter>, TEST_MODEL, 0);

    let err = ImageIntake::from_bytes(b"just text", "text/plain").unwrap_err();
    assert!(err.is_input_rejection());

    let err = client
        .analyze("", "image/png", AnalysisVibe::Constructive, "")
        .await
        .unwrap_err();
    assert!(err.is_input_rejection());
    assert_eq!(provider.call_count().await, 0);
}

#[tokio::test]
async fn reset_returns_to_a_fresh_session() {
    let mut harness = TestHarness::builder()
        .with_sample_report()
        .with_default_vibe(AnalysisVibe::Constructive)
        .build();
    harness.select_sample_image().unwrap();
    harness.session.set_vibe(AnalysisVibe::Roast).unwrap();
    harness.analyze().await.unwrap();
    harness.chat("hi").await.unwrap();

    harness.session.reset().unwrap();
    assert_eq!(harness.session.phase(), SessionPhase::Empty);
    assert_eq!(harness.session.vibe(), AnalysisVibe::Constructive);
    assert!(harness.session.transcript().is_empty());

    let image = ImageIntake::from_bytes(SAMPLE_JPEG, "image/jpeg").unwrap();
    harness.session.select_image(image).unwrap();
    assert_eq!(harness.session.phase(), SessionPhase::ImageSelected);
}
