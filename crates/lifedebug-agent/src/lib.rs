// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clients and session state for Life Debugger.
//!
//! - [`ImageIntake`] turns a file into an [`ImageFile`](lifedebug_core::ImageFile)
//! - [`ReportClient`] runs the one-shot structured analysis
//! - [`ChatClient`] runs stateless follow-up turns
//! - [`Session`] owns the per-session state and admits one call at a time
//!
//! Both clients talk to any [`ProviderAdapter`](lifedebug_core::ProviderAdapter);
//! the binary wires in the Gemini provider.

pub mod chat;
pub mod checklist;
pub mod intake;
pub mod persona;
pub mod report;
pub mod session;
pub mod ticker;

pub use chat::{CHAT_ERROR_FALLBACK, ChatClient, EMPTY_REPLY_FALLBACK, build_turns};
pub use checklist::Checklist;
pub use intake::ImageIntake;
pub use report::{ReportClient, parse_report, report_schema};
pub use session::{ANALYSIS_FAILED_BANNER, AnalysisRequest, ChatTurnRequest, Session, SessionPhase};
pub use ticker::{LOADING_QUOTES, LoadingTicker};
