//! Transcript Line Model
//!
//! A [`Line`] is one entry of the terminal transcript: a display tag plus the
//! text shown for it. Lines are values; the transcript replaces them
//! wholesale while a reveal is in progress and never edits them in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display tag of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    /// Echo of a submitted command, prompt included
    #[serde(rename = "command")]
    CommandEcho,
    /// Regular command output
    Output,
    /// Failure text
    Error,
    /// Positive confirmation
    Success,
    /// Informational text (help listings)
    Info,
    /// Cautionary text
    Warning,
    /// Muted system text (banner spacers)
    System,
}

impl LineKind {
    /// Stable lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::CommandEcho => "command",
            LineKind::Output => "output",
            LineKind::Error => "error",
            LineKind::Success => "success",
            LineKind::Info => "info",
            LineKind::Warning => "warning",
            LineKind::System => "system",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// Display tag
    pub kind: LineKind,
    /// Text shown for this line (may contain newlines)
    pub text: String,
}

impl Line {
    /// Create a line with an explicit kind
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn command_echo(text: impl Into<String>) -> Self {
        Self::new(LineKind::CommandEcho, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(LineKind::Output, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineKind::Error, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(LineKind::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LineKind::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LineKind::Warning, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(LineKind::System, text)
    }

    /// Whether the text spans more than one visual row
    pub fn is_multi_line(&self) -> bool {
        self.text.contains('\n')
    }

    /// Same kind, different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(self.kind, text)
    }
}

impl From<crate::error::Error> for Line {
    fn from(err: crate::error::Error) -> Self {
        Line::error(err.to_string())
    }
}
