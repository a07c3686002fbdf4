//! Conversation session state and its request lifecycle.
//!
//! DESIGN
//! ======
//! One `Session` per user. The message log is append-only and only ever
//! cleared wholesale. Files extracted from each response are merged into
//! the accumulated set, so a later generation overwrites same-named files
//! from earlier ones and leaves the rest in place.
//!
//! A request moves through `begin` → (`complete` | `fail`). Only one may
//! be outstanding at a time; the server does not enforce this.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::files::FileSet;
use crate::preview::assemble_preview;
use crate::split::split_response;

pub const NO_FILES_WARNING: &str = "No files detected in the AI response. Showing raw response.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
    Error,
    Warning,
    Success,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

/// One entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMessage {
    pub kind: MessageKind,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a generation request is already in progress")]
    Busy,
}

#[derive(Debug, Default)]
pub struct Session {
    messages: Vec<SessionMessage>,
    files: FileSet,
    processing: bool,
}

// =============================================================================
// SESSION
// =============================================================================

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[SessionMessage] {
        &self.messages
    }

    #[must_use]
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Start a generation. Records the user's message and returns the prompt
    /// to send to the relay.
    ///
    /// # Errors
    ///
    /// `EmptyPrompt` for blank input, `Busy` if a request is outstanding.
    /// Neither case changes the session.
    pub fn begin(&mut self, input: &str) -> Result<String, SessionError> {
        let prompt = input.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        if self.processing {
            return Err(SessionError::Busy);
        }
        self.processing = true;
        self.push(MessageKind::User, prompt);
        Ok(site_prompt(prompt))
    }

    /// Record the relay's text and merge any files it contains. Returns the
    /// files extracted from this response alone.
    pub fn complete(&mut self, text: &str) -> FileSet {
        self.processing = false;
        let extracted = split_response(text);

        if extracted.is_empty() {
            self.push(MessageKind::Warning, NO_FILES_WARNING);
            self.push(MessageKind::Ai, text);
            return extracted;
        }

        self.push(MessageKind::Ai, text);
        let summary = format!(
            "✅ Generated {} files: {}",
            extracted.len(),
            extracted.names().collect::<Vec<_>>().join(", ")
        );
        self.files.merge(extracted.clone());
        self.push(MessageKind::Success, summary);
        extracted
    }

    /// Record a failed request.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.processing = false;
        self.push(MessageKind::Error, message);
    }

    /// Drop all messages and files.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.files.clear();
        self.processing = false;
    }

    /// Assemble a preview of the accumulated files.
    #[must_use]
    pub fn preview(&self) -> String {
        assemble_preview(&self.files)
    }

    fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.messages.push(SessionMessage { kind, text: text.into(), timestamp: now_ms() });
    }
}

/// Wrap the user's request in the instruction that asks for separately
/// fenced, filename-hinted website files.
#[must_use]
pub fn site_prompt(request: &str) -> String {
    format!(
        "You are an expert web developer. Produce full website files (index.html, style.css, script.js) \
         in separate code blocks with filename hints. The user asked: {request}"
    )
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
