//! Control directives
//!
//! A [`Directive`] is what a command produces when it should change the
//! session rather than print something. Directives never reach the
//! transcript; the engine consumes them as soon as dispatch returns.

use serde::{Deserialize, Serialize};

use super::Line;

/// Non-displayable control signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "directive", content = "name", rename_all = "kebab-case")]
pub enum Directive {
    /// Empty the transcript
    ClearTranscript,
    /// Ask the host to start an embedded activity (e.g. the snake game)
    LaunchActivity(String),
}

/// Normalized result of dispatching one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text to show
    Line(Line),
    /// Side effect for the engine
    Directive(Directive),
}

impl CommandOutcome {
    /// The line, if this outcome displays something
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            CommandOutcome::Line(line) => Some(line),
            CommandOutcome::Directive(_) => None,
        }
    }
}

impl From<Line> for CommandOutcome {
    fn from(line: Line) -> Self {
        CommandOutcome::Line(line)
    }
}

impl From<Directive> for CommandOutcome {
    fn from(directive: Directive) -> Self {
        CommandOutcome::Directive(directive)
    }
}
