// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lifedebug doctor` command implementation.
//!
//! Runs diagnostic checks to identify configuration issues, a missing
//! credential, or an unreachable model endpoint.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;
use lifedebug_config::LifeDebugConfig;
use lifedebug_core::{HealthStatus, LifeDebugError, PluginAdapter};
use lifedebug_gemini::API_KEY_ENV_VARS;

use crate::Clients;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn render(&self, use_color: bool) -> String {
        let duration_ms = self.duration.as_millis();
        if use_color {
            let (symbol, message) = match self.status {
                CheckStatus::Pass => ("✓".green().to_string(), self.message.normal()),
                CheckStatus::Warn => ("!".yellow().to_string(), self.message.yellow()),
                CheckStatus::Fail => ("✗".red().to_string(), self.message.red()),
            };
            format!("    {symbol} {:<16} {message} ({duration_ms}ms)", self.name)
        } else {
            let tag = match self.status {
                CheckStatus::Pass => "[OK]  ",
                CheckStatus::Warn => "[WARN]",
                CheckStatus::Fail => "[FAIL]",
            };
            format!("    {tag} {:<16} {} ({duration_ms}ms)", self.name, self.message)
        }
    }
}

/// Run the `lifedebug doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(
    config: &LifeDebugConfig,
    config_path: Option<&Path>,
    plain: bool,
) -> Result<(), LifeDebugError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config_path),
        check_credentials(config, |name| std::env::var(name).ok()),
        check_model(config).await,
    ];

    println!();
    println!("  lifedebug doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", result.render(use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

/// Configuration reloads and validates cleanly.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    match crate::load_config(config_path) {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// An API key is available from config or the environment.
fn check_credentials<F>(config: &LifeDebugConfig, lookup: F) -> CheckResult
where
    F: Fn(&str) -> Option<String>,
{
    let start = Instant::now();
    let from_config = config.gemini.api_key.as_deref().is_some_and(|k| !k.is_empty());

    if from_config {
        return CheckResult::new("API key", CheckStatus::Pass, "set in config", start);
    }
    if let Some(name) = API_KEY_ENV_VARS
        .iter()
        .find(|name| lookup(name).is_some_and(|v| !v.is_empty()))
    {
        return CheckResult::new("API key", CheckStatus::Pass, format!("from {name}"), start);
    }

    CheckResult::new(
        "API key",
        CheckStatus::Fail,
        format!(
            "not found (set gemini.api_key or {})",
            API_KEY_ENV_VARS.join(" / ")
        ),
        start,
    )
}

/// The configured model answers a metadata request.
async fn check_model(config: &LifeDebugConfig) -> CheckResult {
    let start = Instant::now();
    let name = "Gemini model";

    let clients = match Clients::from_config(config) {
        Ok(clients) => clients,
        Err(e) => return CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
    };

    match clients.provider.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(
            name,
            CheckStatus::Pass,
            format!("{} reachable", clients.provider.model()),
            start,
        ),
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new(name, CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new(name, CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn credentials_from_config_pass() {
        let mut config = LifeDebugConfig::default();
        config.gemini.api_key = Some("AIza-test".into());
        let result = check_credentials(&config, no_env);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "set in config");
    }

    #[test]
    fn credentials_from_fallback_env_var_pass() {
        let config = LifeDebugConfig::default();
        let result = check_credentials(&config, |name| {
            (name == "API_KEY").then(|| "from-env".to_string())
        });
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "from API_KEY");
    }

    #[test]
    fn missing_credentials_fail() {
        let mut config = LifeDebugConfig::default();
        config.gemini.api_key = Some(String::new());
        let result = check_credentials(&config, |_| Some(String::new()));
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.message.contains("GEMINI_API_KEY / API_KEY"));
    }

    #[test]
    fn plain_rendering_uses_tags() {
        let result = CheckResult {
            name: "API key".into(),
            status: CheckStatus::Warn,
            message: "hmm".into(),
            duration: Duration::from_millis(3),
        };
        let line = result.render(false);
        assert!(line.starts_with("    [WARN] API key"));
        assert!(line.ends_with("hmm (3ms)"));
    }

    #[tokio::test]
    async fn model_check_reports_reachable_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models/gemini-test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "models/gemini-test"})),
            )
            .mount(&server)
            .await;

        let mut config = LifeDebugConfig::default();
        config.gemini.api_key = Some("test-key".into());
        config.gemini.base_url = server.uri();
        config.gemini.model = "gemini-test".into();

        let result = check_model(&config).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
        assert_eq!(result.message, "gemini-test reachable");
    }

    #[tokio::test]
    async fn model_check_degrades_on_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": 404, "message": "model not found", "status": "NOT_FOUND"}
            })))
            .mount(&server)
            .await;

        let mut config = LifeDebugConfig::default();
        config.gemini.api_key = Some("test-key".into());
        config.gemini.base_url = server.uri();

        let result = check_model(&config).await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.contains("model not found"), "{}", result.message);
    }
}
