// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lifedebug shell` command implementation.
//!
//! Interactive REPL over one [`Session`]: pick an image, a vibe and some
//! context, run the analysis, then chat about the result and tick off the
//! fix steps. Slash commands drive the session; any other line is a chat
//! message.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use lifedebug_agent::{ImageIntake, Session};
use lifedebug_config::LifeDebugConfig;
use lifedebug_core::{AnalysisVibe, ChatMessage, LifeDebugError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use strum::IntoEnumIterator;

use crate::Clients;
use crate::render;

/// Arguments for the interactive shell.
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Image to preload.
    pub image: Option<PathBuf>,

    /// Persona to start with.
    #[arg(long)]
    pub vibe: Option<AnalysisVibe>,

    /// Context to start with.
    #[arg(long)]
    pub context: Option<String>,
}

const HELP: &str = "\
/image <path>    load an image
/vibe <vibe>     roast, constructive, gentle or efficient
/context <text>  describe the situation (empty clears)
/analyze         run the analysis
/done <n>        toggle fix step n
/report          show the report again
/reset           start over
/quit            exit
anything else    chat about the report";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Image(PathBuf),
    Vibe(AnalysisVibe),
    Context(String),
    Analyze,
    /// One-based step number.
    Done(usize),
    Report,
    Reset,
    Help,
    Quit,
    Chat(String),
}

fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ShellCommand::Chat(line.to_string()));
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "image" if arg.is_empty() => Err("usage: /image <path>".into()),
        "image" => Ok(ShellCommand::Image(PathBuf::from(arg))),
        "vibe" => AnalysisVibe::from_str(arg).map(ShellCommand::Vibe).map_err(|_| {
            let known: Vec<String> = AnalysisVibe::iter().map(|v| v.to_string()).collect();
            format!("unknown vibe `{arg}` (expected one of: {})", known.join(", "))
        }),
        "context" => Ok(ShellCommand::Context(arg.to_string())),
        "analyze" => Ok(ShellCommand::Analyze),
        "done" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(ShellCommand::Done(n)),
            _ => Err("usage: /done <step number, starting at 1>".into()),
        },
        "report" => Ok(ShellCommand::Report),
        "reset" => Ok(ShellCommand::Reset),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command `/{other}` (try /help)")),
    }
}

/// Run the `lifedebug shell` command.
pub async fn run_shell(config: &LifeDebugConfig, args: ShellArgs) -> Result<(), LifeDebugError> {
    let clients = Clients::from_config(config)?;
    let quote_interval = Duration::from_millis(config.ui.ticker_interval_ms);
    let mut session = Session::new(config.agent.default_vibe);

    if let Some(vibe) = args.vibe {
        session.set_vibe(vibe)?;
    }
    if let Some(context) = args.context {
        session.set_context(context)?;
    }
    if let Some(path) = args.image
        && let Err(e) = load_image(&mut session, &path).await
    {
        eprintln!("{}: {e}", "error".red());
    }

    let mut rl = DefaultEditor::new()
        .map_err(|e| LifeDebugError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "life debugger".bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match parse_command(trimmed) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => command,
                    Err(usage) => {
                        eprintln!("{}", usage.yellow());
                        continue;
                    }
                };

                if let Err(e) = handle_command(
                    &mut session,
                    &clients,
                    quote_interval,
                    &config.agent.name,
                    command,
                )
                .await
                {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

async fn load_image(session: &mut Session, path: &Path) -> Result<(), LifeDebugError> {
    let image = ImageIntake::from_path(path).await?;
    let mime_type = image.mime_type.clone();
    session.select_image(image)?;
    println!("loaded {} ({mime_type})", path.display());
    Ok(())
}

/// Applies one command to the session and prints the outcome.
async fn handle_command(
    session: &mut Session,
    clients: &Clients,
    quote_interval: Duration,
    agent_name: &str,
    command: ShellCommand,
) -> Result<(), LifeDebugError> {
    match command {
        ShellCommand::Image(path) => load_image(session, &path).await?,
        ShellCommand::Vibe(vibe) => {
            session.set_vibe(vibe)?;
            println!("vibe: {} ({})", vibe.label().magenta(), vibe.description());
        }
        ShellCommand::Context(context) => {
            session.set_context(context)?;
            println!("{}", "context updated".dimmed());
        }
        ShellCommand::Analyze => {
            let outcome = render::with_loading_spinner(
                quote_interval,
                session.run_analysis(&clients.report),
            )
            .await;
            if let Err(e) = outcome {
                if let Some(banner) = session.error_banner() {
                    eprintln!("{}", banner.red().bold());
                }
                return Err(e);
            }
            print_report(session)?;
            if let Some(seed) = session.transcript().first() {
                println!("{}", render::render_chat_line(seed, agent_name));
            }
        }
        ShellCommand::Done(step) => {
            session.toggle_step(step - 1)?;
            let steps = session
                .report()
                .map(|r| r.step_by_step_fix.as_slice())
                .unwrap_or_default();
            print!("{}", render::render_steps(steps, session.checklist()));
            println!("{}", format!("{}% done", session.progress_percent()).dimmed());
        }
        ShellCommand::Report => print_report(session)?,
        ShellCommand::Reset => {
            session.reset()?;
            println!("{}", "session cleared".dimmed());
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Chat(text) => {
            let reply = render::with_loading_spinner(
                quote_interval,
                session.run_chat(&clients.chat, &text),
            )
            .await?;
            println!(
                "{}",
                render::render_chat_line(&ChatMessage::model(reply), agent_name)
            );
        }
        // Handled by the REPL loop.
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn print_report(session: &Session) -> Result<(), LifeDebugError> {
    let report = session
        .report()
        .ok_or_else(|| LifeDebugError::invalid_input("no report yet; run /analyze first"))?;
    println!(
        "{}",
        render::render_report(report, session.vibe(), session.checklist())
    );
    Ok(())
}
