// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport security for Life Debugger.
//!
//! TLS enforcement for the Gemini endpoint and secret redaction for log
//! output, so an API key never reaches the terminal or a log file.

pub mod redact;
pub mod tls;

pub use redact::{RedactingWriter, SecretList, add_secret, redact};
pub use tls::{build_secure_client, is_localhost, is_loopback_host, validate_url};
