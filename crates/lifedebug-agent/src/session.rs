// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session FSM that owns the state of one debugging session.
//!
//! Each session goes through phases:
//! Empty -> ImageSelected -> Analyzing -> Reported <-> AwaitingReply.
//! `reset` returns to Empty from any phase without a call in flight.
//!
//! The split `begin_*` / `finish_*` methods let a front end release the
//! session while the remote call runs; the phase is what rejects a second
//! analysis or a second chat message until the first one completes.

use lifedebug_core::{AnalysisVibe, ChatMessage, ImageFile, LifeDebugError, LifeDebugReport};
use tracing::{debug, info, warn};

use crate::chat::ChatClient;
use crate::checklist::Checklist;
use crate::report::ReportClient;

/// Banner shown after a failed analysis.
pub const ANALYSIS_FAILED_BANNER: &str =
    "Analysis failed. Please ensure your API Key is valid and the image is clear.";

/// Phases in the session FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No image yet.
    Empty,
    /// Image chosen; vibe and context still editable.
    ImageSelected,
    /// Analysis call in flight.
    Analyzing,
    /// Report available; chat open.
    Reported,
    /// Chat call in flight.
    AwaitingReply,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Empty => write!(f, "empty"),
            SessionPhase::ImageSelected => write!(f, "image-selected"),
            SessionPhase::Analyzing => write!(f, "analyzing"),
            SessionPhase::Reported => write!(f, "reported"),
            SessionPhase::AwaitingReply => write!(f, "awaiting-reply"),
        }
    }
}

/// Everything an analysis call needs, detached from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image: ImageFile,
    pub vibe: AnalysisVibe,
    pub context: String,
}

/// Everything a chat call needs, detached from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurnRequest {
    /// Prior turns, excluding the seed question and `message`.
    pub history: Vec<ChatMessage>,
    pub message: String,
    pub image: ImageFile,
    pub vibe: AnalysisVibe,
    pub context: String,
}

/// State of a single debugging session.
#[derive(Debug)]
pub struct Session {
    session_id: String,
    phase: SessionPhase,
    default_vibe: AnalysisVibe,
    image: Option<ImageFile>,
    vibe: AnalysisVibe,
    context: String,
    report: Option<LifeDebugReport>,
    transcript: Vec<ChatMessage>,
    checklist: Checklist,
    error_banner: Option<String>,
}

impl Session {
    /// Creates an empty session. `default_vibe` is also what `reset` restores.
    pub fn new(default_vibe: AnalysisVibe) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            phase: SessionPhase::Empty,
            default_vibe,
            image: None,
            vibe: default_vibe,
            context: String::new(),
            report: None,
            transcript: Vec::new(),
            checklist: Checklist::default(),
            error_banner: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn vibe(&self) -> AnalysisVibe {
        self.vibe
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn report(&self) -> Option<&LifeDebugReport> {
        self.report.as_ref()
    }

    /// The chat transcript. Entry 0 is the report's follow-up question.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Rejects edits to the analysis inputs once they are committed.
    fn ensure_inputs_editable(&self, what: &str) -> Result<(), LifeDebugError> {
        match self.phase {
            SessionPhase::Empty | SessionPhase::ImageSelected => Ok(()),
            SessionPhase::Analyzing => Err(LifeDebugError::invalid_input(format!(
                "cannot change the {what} while an analysis is running"
            ))),
            SessionPhase::Reported | SessionPhase::AwaitingReply => {
                Err(LifeDebugError::invalid_input(format!(
                    "cannot change the {what} after the report; reset first"
                )))
            }
        }
    }

    /// Replaces the current image and clears any error banner.
    pub fn select_image(&mut self, image: ImageFile) -> Result<(), LifeDebugError> {
        self.ensure_inputs_editable("image")?;
        debug!(
            session_id = %self.session_id,
            mime_type = %image.mime_type,
            "image selected"
        );
        self.image = Some(image);
        self.error_banner = None;
        self.phase = SessionPhase::ImageSelected;
        Ok(())
    }

    pub fn set_vibe(&mut self, vibe: AnalysisVibe) -> Result<(), LifeDebugError> {
        self.ensure_inputs_editable("vibe")?;
        self.vibe = vibe;
        Ok(())
    }

    pub fn set_context(&mut self, context: impl Into<String>) -> Result<(), LifeDebugError> {
        self.ensure_inputs_editable("context")?;
        self.context = context.into();
        Ok(())
    }

    /// Moves to Analyzing and hands back the inputs for the call.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest, LifeDebugError> {
        match self.phase {
            SessionPhase::ImageSelected => {}
            SessionPhase::Empty => {
                return Err(LifeDebugError::invalid_input("select an image first"));
            }
            SessionPhase::Analyzing => {
                return Err(LifeDebugError::invalid_input("analysis already in progress"));
            }
            SessionPhase::Reported | SessionPhase::AwaitingReply => {
                return Err(LifeDebugError::invalid_input(
                    "a report already exists; reset to analyze a new image",
                ));
            }
        }
        let image = self
            .image
            .clone()
            .ok_or_else(|| LifeDebugError::Internal("image-selected phase without an image".into()))?;

        self.error_banner = None;
        self.phase = SessionPhase::Analyzing;
        info!(session_id = %self.session_id, vibe = %self.vibe, "analysis requested");

        Ok(AnalysisRequest {
            image,
            vibe: self.vibe,
            context: self.context.clone(),
        })
    }

    /// Applies the outcome of an analysis call.
    ///
    /// On success the report is stored, the transcript is seeded with its
    /// follow-up question, and the checklist is sized to its steps. On
    /// failure the banner is set, the inputs are kept for a retry, and the
    /// error is handed back.
    pub fn finish_analysis(
        &mut self,
        result: Result<LifeDebugReport, LifeDebugError>,
    ) -> Result<(), LifeDebugError> {
        if self.phase != SessionPhase::Analyzing {
            return Err(LifeDebugError::Internal(format!(
                "no analysis in flight (phase: {})",
                self.phase
            )));
        }

        match result {
            Ok(report) => {
                self.transcript = vec![ChatMessage::model(report.follow_up_question.clone())];
                self.checklist = Checklist::new(report.step_by_step_fix.len());
                self.report = Some(report);
                self.phase = SessionPhase::Reported;
                info!(session_id = %self.session_id, "report stored");
                Ok(())
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "analysis failed");
                self.error_banner = Some(ANALYSIS_FAILED_BANNER.to_string());
                self.phase = SessionPhase::ImageSelected;
                Err(e)
            }
        }
    }

    /// Runs a whole analysis against `client`.
    pub async fn run_analysis(&mut self, client: &ReportClient) -> Result<(), LifeDebugError> {
        let request = self.begin_analysis()?;
        let result = client
            .analyze(
                &request.image.base64,
                &request.image.mime_type,
                request.vibe,
                &request.context,
            )
            .await;
        self.finish_analysis(result)
    }

    /// Appends the user's message and hands back the inputs for the call.
    pub fn begin_chat(&mut self, text: &str) -> Result<ChatTurnRequest, LifeDebugError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(LifeDebugError::invalid_input("message is empty"));
        }
        match self.phase {
            SessionPhase::Reported => {}
            SessionPhase::AwaitingReply => {
                return Err(LifeDebugError::invalid_input("still waiting for the last reply"));
            }
            _ => {
                return Err(LifeDebugError::invalid_input("no report to chat about yet"));
            }
        }
        let image = self
            .image
            .clone()
            .ok_or_else(|| LifeDebugError::Internal("reported phase without an image".into()))?;

        // Entry 0 is the display-only seed question.
        let history = self.transcript.iter().skip(1).cloned().collect();
        self.transcript.push(ChatMessage::user(message));
        self.phase = SessionPhase::AwaitingReply;

        Ok(ChatTurnRequest {
            history,
            message: message.to_string(),
            image,
            vibe: self.vibe,
            context: self.context.clone(),
        })
    }

    /// Appends the model's reply.
    pub fn finish_chat(&mut self, reply: impl Into<String>) -> Result<(), LifeDebugError> {
        if self.phase != SessionPhase::AwaitingReply {
            return Err(LifeDebugError::Internal(format!(
                "no chat turn in flight (phase: {})",
                self.phase
            )));
        }
        self.transcript.push(ChatMessage::model(reply));
        self.phase = SessionPhase::Reported;
        Ok(())
    }

    /// Runs a whole chat turn against `client` and returns the reply.
    ///
    /// Transport failures do not error: the reply is the fallback text.
    pub async fn run_chat(
        &mut self,
        client: &ChatClient,
        text: &str,
    ) -> Result<String, LifeDebugError> {
        let request = self.begin_chat(text)?;
        let reply = client
            .send_turn(
                &request.history,
                &request.message,
                &request.image.base64,
                &request.image.mime_type,
                request.vibe,
                &request.context,
            )
            .await;
        self.finish_chat(reply.clone())?;
        Ok(reply)
    }

    /// Toggles step `index` (zero-based) of the fix list.
    pub fn toggle_step(&mut self, index: usize) -> Result<bool, LifeDebugError> {
        if self.report.is_none() {
            return Err(LifeDebugError::invalid_input("no report yet"));
        }
        self.checklist.toggle(index)
    }

    /// Rounded share of completed steps; 0 with no report or no steps.
    pub fn progress_percent(&self) -> u8 {
        self.checklist.progress_percent()
    }

    /// Clears image, report, transcript, checklist, banner and context, and
    /// restores the default vibe.
    pub fn reset(&mut self) -> Result<(), LifeDebugError> {
        if matches!(
            self.phase,
            SessionPhase::Analyzing | SessionPhase::AwaitingReply
        ) {
            return Err(LifeDebugError::invalid_input(
                "cannot reset while a request is in flight",
            ));
        }
        let default_vibe = self.default_vibe;
        *self = Self::new(default_vibe);
        debug!(session_id = %self.session_id, "session reset");
        Ok(())
    }
}
