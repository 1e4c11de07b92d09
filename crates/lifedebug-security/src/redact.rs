// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: known credential formats (Google API keys, `sk-` keys,
//!    Bearer tokens, `key=` query parameters).
//! 2. **Exact-match**: the resolved API key, registered at startup.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

/// Shared list of exact secret values, registered once credentials are resolved.
pub type SecretList = Arc<RwLock<Vec<String>>>;

/// Known secret patterns to redact from output.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Google API keys: AIza followed by 35 url-safe characters.
        r"AIza[0-9A-Za-z_\-]{35}",
        // Generic secret keys: sk-...
        r"sk-[a-zA-Z0-9_\-]{20,}",
        // Bearer tokens in headers.
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
        // Keys passed as a query parameter: ?key=... or &key=...
        r"([?&])key=[^&\s]+",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The redaction placeholder.
const REDACTED: &str = "[REDACTED]";

/// Redact secrets from a string using regex patterns and exact-match values.
///
/// Standalone so it can be applied to error messages before they are shown.
pub fn redact(input: &str, secrets: &[String]) -> String {
    let mut result = input.to_string();

    for pattern in REDACTION_PATTERNS.iter() {
        result = if pattern.captures_len() > 1 {
            pattern
                .replace_all(&result, format!("${{1}}key={REDACTED}").as_str())
                .into_owned()
        } else {
            pattern.replace_all(&result, REDACTED).into_owned()
        };
    }

    // Longest first so a value containing another is replaced whole.
    let mut sorted: Vec<&String> = secrets.iter().collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    result
}

/// A writer wrapper that redacts secrets from everything written through it.
///
/// Used as the tracing subscriber's writer, so log lines are scrubbed before
/// they reach stderr.
pub struct RedactingWriter<W> {
    inner: W,
    secrets: SecretList,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, secrets: SecretList) -> Self {
        Self { inner, secrets }
    }
}

/// Register a secret value for exact-match redaction.
///
/// Every writer sharing `secrets` picks the value up on its next write.
pub fn add_secret(secrets: &SecretList, value: String) {
    if value.is_empty() {
        return;
    }
    if let Ok(mut values) = secrets.write()
        && !values.contains(&value)
    {
        values.push(value);
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let secrets = self.secrets.read().map(|v| v.clone()).unwrap_or_default();
        let redacted = redact(&input, &secrets);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
