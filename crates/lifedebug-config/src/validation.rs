// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::LifeDebugConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Lower bound for the loading ticker, to keep the spinner from flooding the terminal.
const MIN_TICKER_INTERVAL_MS: u64 = 100;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LifeDebugConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    if let Err(message) = check_base_url(&config.gemini.base_url) {
        errors.push(ConfigError::Validation { message });
    }

    if config.gemini.timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be greater than zero when set".to_string(),
        });
    }

    if config.ui.ticker_interval_ms < MIN_TICKER_INTERVAL_MS {
        errors.push(ConfigError::Validation {
            message: format!(
                "ui.ticker_interval_ms must be at least {MIN_TICKER_INTERVAL_MS}, got {}",
                config.ui.ticker_interval_ms
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Remote API roots must be HTTPS; loopback hosts may use plain HTTP.
fn check_base_url(raw: &str) -> Result<(), String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| format!("gemini.base_url `{raw}` is not a valid URL: {e}"))?;

    let loopback = parsed
        .host()
        .is_some_and(|host| lifedebug_security::is_loopback_host(&host));

    match parsed.scheme() {
        "https" => Ok(()),
        "http" if loopback => Ok(()),
        scheme => Err(format!(
            "gemini.base_url must use https for remote hosts, got `{scheme}://`"
        )),
    }
}
