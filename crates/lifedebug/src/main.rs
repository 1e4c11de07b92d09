// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Life Debugger - photograph a mess, get a debugging report for your life.
//!
//! This is the binary entry point: argument parsing, config loading, logging
//! setup, and dispatch to the subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod analyze;
mod doctor;
mod render;
mod shell;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use clap::{Parser, Subcommand};
use colored::Colorize;
use lifedebug_agent::{ChatClient, ReportClient};
use lifedebug_config::{ConfigError, LifeDebugConfig};
use lifedebug_core::{LifeDebugError, ProviderAdapter};
use lifedebug_gemini::{GeminiProvider, resolve_api_key};
use lifedebug_security::{RedactingWriter, SecretList, add_secret};

/// Life Debugger - photograph a mess, get a debugging report for your life.
#[derive(Parser, Debug)]
#[command(name = "lifedebug", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one image and print the report.
    Analyze(analyze::AnalyzeArgs),
    /// Launch an interactive session: analyze, then chat about the result.
    Shell(shell::ShellArgs),
    /// Check configuration, credentials and model reachability.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration with secrets redacted.
    Config,
}

/// The Gemini provider and the two clients sharing it.
pub(crate) struct Clients {
    pub provider: Arc<GeminiProvider>,
    pub report: ReportClient,
    pub chat: ChatClient,
}

impl Clients {
    pub fn from_config(config: &LifeDebugConfig) -> Result<Self, LifeDebugError> {
        let provider = Arc::new(GeminiProvider::new(&config.gemini)?);
        let shared = provider.clone() as Arc<dyn ProviderAdapter>;
        Ok(Self {
            report: ReportClient::new(
                shared.clone(),
                config.gemini.model.clone(),
                config.gemini.thinking_budget,
            ),
            chat: ChatClient::new(shared, config.gemini.model.clone()),
            provider,
        })
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            lifedebug_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let secrets = collect_secrets(&config, |name| std::env::var(name).ok());
    init_tracing(&config.agent.log_level, secrets);
    render::configure_color(config.ui.color);
    tracing::debug!(
        agent = %config.agent.name,
        model = %config.gemini.model,
        "config loaded"
    );

    let result = match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&config, args).await,
        Some(Commands::Shell(args)) => shell::run_shell(&config, args).await,
        Some(Commands::Doctor { plain }) => {
            doctor::run_doctor(&config, cli.config.as_deref(), plain).await
        }
        Some(Commands::Config) => effective_config_toml(&config).map(|toml| print!("{toml}")),
        None => {
            println!("lifedebug: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Loads from an explicit path when given, otherwise from the standard hierarchy.
pub(crate) fn load_config(path: Option<&Path>) -> Result<LifeDebugConfig, Vec<ConfigError>> {
    match path {
        Some(path) => lifedebug_config::load_and_validate_path(path),
        None => lifedebug_config::load_and_validate(),
    }
}

/// Registers the resolved API key so log output never carries it.
fn collect_secrets<F>(config: &LifeDebugConfig, lookup: F) -> SecretList
where
    F: Fn(&str) -> Option<String>,
{
    let secrets: SecretList = Arc::new(RwLock::new(Vec::new()));
    if let Some(key) = resolve_api_key(config.gemini.api_key.as_deref(), lookup) {
        add_secret(&secrets, key);
    }
    secrets
}

/// Renders the configuration as TOML with the API key masked.
fn effective_config_toml(config: &LifeDebugConfig) -> Result<String, LifeDebugError> {
    let mut shown = config.clone();
    if shown.gemini.api_key.is_some() {
        shown.gemini.api_key = Some("[REDACTED]".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| LifeDebugError::Internal(format!("failed to serialize config: {e}")))
}

/// Logs go to stderr through the redacting writer.
fn init_tracing(log_level: &str, secrets: SecretList) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lifedebug={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "lifedebug",
            "analyze",
            "desk.jpg",
            "--vibe",
            "roast",
            "--context",
            "my desk",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.image, PathBuf::from("desk.jpg"));
                assert_eq!(args.vibe, Some(lifedebug_core::AnalysisVibe::Roast));
                assert_eq!(args.context.as_deref(), Some("my desk"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_vibe() {
        assert!(Cli::try_parse_from(["lifedebug", "analyze", "x.png", "--vibe", "savage"]).is_err());
    }

    #[test]
    fn cli_accepts_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["lifedebug", "doctor", "--config", "/tmp/ld.toml", "--plain"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ld.toml")));
        assert!(matches!(cli.command, Some(Commands::Doctor { plain: true })));
    }

    #[test]
    fn config_output_masks_api_key() {
        let config = lifedebug_config::load_and_validate_str(
            "[gemini]\napi_key = \"AIzaSyD-this-is-not-a-real-key-000000000\"\n",
        )
        .unwrap();
        let rendered = effective_config_toml(&config).unwrap();
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("AIzaSyD"));
        assert!(rendered.contains("thinking_budget = 2048"));
    }

    #[test]
    fn config_output_without_key_has_no_placeholder() {
        let config = lifedebug_config::load_and_validate_str("").unwrap();
        let rendered = effective_config_toml(&config).unwrap();
        assert!(!rendered.contains("[REDACTED]"));
        assert!(rendered.contains("[gemini]"));
    }

    #[test]
    fn resolved_key_is_scrubbed_from_log_output() {
        let config = LifeDebugConfig::default();
        let secrets = collect_secrets(&config, |name| {
            (name == "GEMINI_API_KEY").then(|| "env-only-key-42".to_string())
        });

        let mut buf = Vec::new();
        {
            use std::io::Write;
            let mut writer = RedactingWriter::new(&mut buf, secrets);
            write!(writer, "calling gemini with env-only-key-42").unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "calling gemini with [REDACTED]"
        );
    }

    #[test]
    fn no_key_registers_no_secrets() {
        let config = LifeDebugConfig::default();
        let secrets = collect_secrets(&config, |_| None);
        assert!(secrets.read().unwrap().is_empty());
    }

    #[test]
    fn explicit_config_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifedebug.toml");
        std::fs::write(&path, "[agent]\nname = \"fixer\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.agent.name, "fixer");
    }
}
