// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Life Debugger.
//!
//! Holds the session data model ([`ImageFile`], [`AnalysisVibe`],
//! [`LifeDebugReport`], [`ChatMessage`]), the [`LifeDebugError`] taxonomy, and
//! the [`ProviderAdapter`] trait that model backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LifeDebugError;
pub use types::{
    AnalysisVibe, ChatMessage, ChatRole, ContentBlock, HealthStatus, ImageFile, LifeDebugReport,
    ProviderMessage, ProviderRequest, ProviderResponse, TokenUsage,
};

pub use traits::{PluginAdapter, ProviderAdapter};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn report_json() -> serde_json::Value {
        serde_json::json!({
            "ai_reaction": "Bold of you to call this a desk.",
            "whats_broken": "Paper piles everywhere.",
            "why_it_matters": "You lose 20 minutes a day searching.",
            "optimized_version": "A clear desk with one inbox tray.",
            "step_by_step_fix": ["Bin the junk", "File the rest"],
            "priority_tasks": ["P1: bills", "P2: forms", "P3: notes"],
            "future_prevention_plan": ["Weekly reset"],
            "follow_up_question": "Ready to start with the bills?"
        })
    }

    #[test]
    fn vibe_has_four_variants() {
        assert_eq!(AnalysisVibe::iter().count(), 4);
    }

    #[test]
    fn vibe_display_and_from_str_round_trip() {
        for vibe in AnalysisVibe::iter() {
            let s = vibe.to_string();
            assert_eq!(AnalysisVibe::from_str(&s).unwrap(), vibe);
        }
        assert_eq!(AnalysisVibe::from_str("ROAST").unwrap(), AnalysisVibe::Roast);
        assert!(AnalysisVibe::from_str("sarcastic").is_err());
    }

    #[test]
    fn vibe_serializes_lowercase() {
        let json = serde_json::to_string(&AnalysisVibe::Efficient).unwrap();
        assert_eq!(json, "\"efficient\"");
    }

    #[test]
    fn default_vibe_is_constructive() {
        assert_eq!(AnalysisVibe::default(), AnalysisVibe::Constructive);
    }

    #[test]
    fn vibe_labels_are_distinct() {
        let labels: std::collections::HashSet<_> = AnalysisVibe::iter().map(|v| v.label()).collect();
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn report_deserializes_all_eight_fields() {
        let report: LifeDebugReport = serde_json::from_value(report_json()).unwrap();
        assert_eq!(report.priority_tasks.len(), 3);
        assert_eq!(report.step_by_step_fix[0], "Bin the junk");
        assert_eq!(report.follow_up_question, "Ready to start with the bills?");
    }

    #[test]
    fn report_rejects_missing_key() {
        let mut value = report_json();
        value.as_object_mut().unwrap().remove("why_it_matters");
        assert!(serde_json::from_value::<LifeDebugReport>(value).is_err());
    }

    #[test]
    fn report_rejects_string_where_array_expected() {
        let mut value = report_json();
        value["priority_tasks"] = serde_json::json!("P1: everything");
        assert!(serde_json::from_value::<LifeDebugReport>(value).is_err());
    }

    #[test]
    fn report_rejects_null_field() {
        let mut value = report_json();
        value["ai_reaction"] = serde_json::Value::Null;
        assert!(serde_json::from_value::<LifeDebugReport>(value).is_err());
    }

    #[test]
    fn chat_role_uses_remote_names() {
        let msg = ChatMessage::model("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "model");
        assert_eq!(ChatRole::User.to_string(), "user");
    }

    #[test]
    fn error_variants_render() {
        let e = LifeDebugError::invalid_input("text/plain is not an image");
        assert!(e.is_input_rejection());
        assert!(e.to_string().contains("text/plain"));

        let e = LifeDebugError::AnalysisFailed {
            message: "empty response".into(),
            source: None,
        };
        assert!(!e.is_input_rejection());
        assert_eq!(e.to_string(), "analysis failed: empty response");

        let _ = LifeDebugError::ChatTurnFailed {
            message: "x".into(),
            source: Some(Box::new(std::io::Error::other("io"))),
        };
        let _ = LifeDebugError::Config("x".into());
        let _ = LifeDebugError::Internal("x".into());
    }

    #[test]
    fn trait_objects_are_constructible() {
        fn _assert_provider(_: &dyn ProviderAdapter) {}
        fn _assert_plugin<T: PluginAdapter>() {}
    }

    proptest::proptest! {
        #[test]
        fn vibe_parse_never_panics(s in "\\PC*") {
            let _ = AnalysisVibe::from_str(&s);
        }
    }
}
