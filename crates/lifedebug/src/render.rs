// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for reports, checklists and chat lines.

use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lifedebug_agent::{Checklist, LoadingTicker};
use lifedebug_core::{AnalysisVibe, ChatMessage, ChatRole, LifeDebugReport};

/// Spinner frame rate, independent of how often the quote changes.
const SPINNER_TICK: Duration = Duration::from_millis(120);

/// Enables or disables ANSI colors for everything printed after this call.
pub fn configure_color(enabled: bool) {
    use std::io::IsTerminal;
    colored::control::set_override(enabled && std::io::stdout().is_terminal());
}

fn heading(title: &str) -> String {
    title.bold().cyan().to_string()
}

/// Renders the full report with checklist state.
pub fn render_report(report: &LifeDebugReport, vibe: AnalysisVibe, checklist: &Checklist) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n\n",
        format!("[{}]", vibe.label()).magenta(),
        report.ai_reaction.italic()
    ));

    for (title, body) in [
        ("WHAT'S BROKEN", &report.whats_broken),
        ("WHY IT MATTERS", &report.why_it_matters),
        ("OPTIMIZED VERSION", &report.optimized_version),
    ] {
        out.push_str(&format!("{}\n  {body}\n\n", heading(title)));
    }

    out.push_str(&format!(
        "{}  {}\n",
        heading("STEP-BY-STEP FIX"),
        format!("{}% done", checklist.progress_percent()).dimmed()
    ));
    out.push_str(&render_steps(&report.step_by_step_fix, checklist));
    out.push('\n');

    out.push_str(&format!("{}\n", heading("PRIORITY TASKS")));
    for task in &report.priority_tasks {
        out.push_str(&format!("  {} {task}\n", "!".red().bold()));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", heading("FUTURE PREVENTION")));
    for item in &report.future_prevention_plan {
        out.push_str(&format!("  - {item}\n"));
    }

    out
}

/// Numbered steps with their checkbox state.
pub fn render_steps(steps: &[String], checklist: &Checklist) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if checklist.is_done(i) {
                format!("  [x] {}. {}\n", i + 1, step.strikethrough().dimmed())
            } else {
                format!("  [ ] {}. {step}\n", i + 1)
            }
        })
        .collect()
}

/// One transcript line, prefixed by speaker.
pub fn render_chat_line(message: &ChatMessage, agent_name: &str) -> String {
    match message.role {
        ChatRole::Model => format!("{} {}", format!("{agent_name}>").green().bold(), message.text),
        ChatRole::User => format!("{} {}", "you>".blue().bold(), message.text),
    }
}

/// Runs `fut` behind a spinner whose message rotates through the loading quotes.
pub async fn with_loading_spinner<F: Future>(quote_interval: Duration, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(SPINNER_TICK);

    let rotator = {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            let mut ticker = LoadingTicker::new();
            spinner.set_message(ticker.current());
            let mut interval = tokio::time::interval(quote_interval);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                spinner.set_message(ticker.tick());
            }
        })
    };

    let output = fut.await;
    rotator.abort();
    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> LifeDebugReport {
        LifeDebugReport {
            ai_reaction: "Bold strategy.".into(),
            whats_broken: "Receipts everywhere.".into(),
            why_it_matters: "Tax season pain.".into(),
            optimized_version: "One envelope per month.".into(),
            step_by_step_fix: vec!["Collect".into(), "Sort".into(), "Scan".into()],
            priority_tasks: vec!["P1: scan".into(), "P2: shred".into(), "P3: file".into()],
            future_prevention_plan: vec!["Photograph receipts at checkout".into()],
            follow_up_question: "Envelope time?".into(),
        }
    }

    #[test]
    fn report_contains_every_section() {
        colored::control::set_override(false);
        let rendered = render_report(&report(), AnalysisVibe::Roast, &Checklist::new(3));
        for needle in [
            "[Roast Me]",
            "Bold strategy.",
            "WHAT'S BROKEN",
            "Receipts everywhere.",
            "WHY IT MATTERS",
            "OPTIMIZED VERSION",
            "STEP-BY-STEP FIX",
            "0% done",
            "[ ] 1. Collect",
            "PRIORITY TASKS",
            "P3: file",
            "FUTURE PREVENTION",
            "- Photograph receipts at checkout",
        ] {
            assert!(rendered.contains(needle), "missing {needle:?} in:\n{rendered}");
        }
    }

    #[test]
    fn checked_steps_are_marked() {
        colored::control::set_override(false);
        let mut checklist = Checklist::new(3);
        checklist.toggle(1).unwrap();
        let steps = render_steps(&report().step_by_step_fix, &checklist);
        assert!(steps.contains("[ ] 1. Collect"));
        assert!(steps.contains("[x] 2. Sort"));
        assert!(steps.contains("[ ] 3. Scan"));
    }

    #[test]
    fn chat_lines_are_prefixed_by_speaker() {
        colored::control::set_override(false);
        assert_eq!(
            render_chat_line(&ChatMessage::model("Go."), "lifedebug"),
            "lifedebug> Go."
        );
        assert_eq!(render_chat_line(&ChatMessage::user("ok"), "lifedebug"), "you> ok");
    }

    #[tokio::test]
    async fn spinner_returns_inner_output() {
        let value = with_loading_spinner(Duration::from_millis(100), async { 42 }).await;
        assert_eq!(value, 42);
    }
}
