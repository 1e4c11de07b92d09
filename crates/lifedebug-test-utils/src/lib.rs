// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Life Debugger integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without network access.
//!
//! # Components
//!
//! - [`MockProvider`] - Scripted provider that records every request
//! - [`TestHarness`] - Session plus report/chat clients over a shared mock

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, sample_image, sample_report, sample_report_json};
pub use mock_provider::{MockProvider, MockReply};
