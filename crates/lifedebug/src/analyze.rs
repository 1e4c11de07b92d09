// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lifedebug analyze` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use lifedebug_agent::{ImageIntake, Session};
use lifedebug_config::LifeDebugConfig;
use lifedebug_core::{AnalysisVibe, LifeDebugError};

use crate::Clients;
use crate::render;

/// Arguments for a one-shot analysis.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image to analyze.
    pub image: PathBuf,

    /// Persona: roast, constructive, gentle or efficient.
    #[arg(long)]
    pub vibe: Option<AnalysisVibe>,

    /// Extra context for the analysis, e.g. "my desk before exams".
    #[arg(long)]
    pub context: Option<String>,

    /// Print the raw report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the `lifedebug analyze` command.
///
/// The image is read and checked before any client exists, so a rejected
/// file never reaches the network.
pub async fn run_analyze(config: &LifeDebugConfig, args: AnalyzeArgs) -> Result<(), LifeDebugError> {
    let image = ImageIntake::from_path(&args.image).await?;

    let mut session = Session::new(config.agent.default_vibe);
    session.select_image(image)?;
    if let Some(vibe) = args.vibe {
        session.set_vibe(vibe)?;
    }
    if let Some(context) = args.context {
        session.set_context(context)?;
    }

    let clients = Clients::from_config(config)?;
    let outcome = render::with_loading_spinner(
        Duration::from_millis(config.ui.ticker_interval_ms),
        session.run_analysis(&clients.report),
    )
    .await;

    if let Err(e) = outcome {
        if let Some(banner) = session.error_banner() {
            eprintln!("{}", banner.red().bold());
        }
        return Err(e);
    }

    let report = session
        .report()
        .ok_or_else(|| LifeDebugError::Internal("analysis finished without a report".into()))?;

    if args.json {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| LifeDebugError::Internal(format!("failed to serialize report: {e}")))?;
        println!("{json}");
    } else {
        println!(
            "{}",
            render::render_report(report, session.vibe(), session.checklist())
        );
        if let Some(seed) = session.transcript().first() {
            println!("{}", render::render_chat_line(seed, &config.agent.name));
        }
    }

    Ok(())
}
