//! Terminal State Management
//!
//! [`SessionState`] is owned by the engine task and mutated only there. The
//! transcript is append-only except for the tail entry, which a reveal may
//! replace. Presentation sees [`SessionSnapshot`] copies only.

use std::fmt;

use serde::Serialize;

use super::input::CommandInput;
use super::reveal::RevealStep;
use crate::models::Line;

/// What the session is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    /// Playing the startup banner
    #[default]
    Booting,
    /// Accepting input
    Idle,
    /// Waiting on a command handler
    Dispatching,
    /// Typing out a result line
    Revealing,
}

impl SessionPhase {
    /// Input is locked in every phase but `Idle`
    pub fn locks_input(self) -> bool {
        self != SessionPhase::Idle
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Booting => "booting",
            SessionPhase::Idle => "idle",
            SessionPhase::Dispatching => "dispatching",
            SessionPhase::Revealing => "revealing",
        };
        f.write_str(name)
    }
}

/// Read-only copy of the session published to the host
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    /// Transcript, oldest first
    pub lines: Vec<Line>,
    /// Input buffer
    pub input: String,
    /// Cursor position in chars
    pub cursor: usize,
    pub phase: SessionPhase,
    pub input_locked: bool,
}

impl SessionSnapshot {
    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }
}

/// Engine-owned session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    transcript: Vec<Line>,
    input: CommandInput,
    phase: SessionPhase,
}

impl SessionState {
    /// Fresh state, booting
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: Line) {
        self.transcript.push(line);
    }

    /// Replace the tail entry, or append when the transcript is empty
    pub fn replace_tail(&mut self, line: Line) {
        match self.transcript.last_mut() {
            Some(tail) => *tail = line,
            None => self.transcript.push(line),
        }
    }

    pub fn apply_reveal(&mut self, step: RevealStep) {
        match step {
            RevealStep::Append(line) => self.append(line),
            RevealStep::Replace(line) => self.replace_tail(line),
        }
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Forget transcript, history and input; back to booting
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.input.reset();
        self.phase = SessionPhase::Booting;
    }

    pub fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn input_locked(&self) -> bool {
        self.phase.locks_input()
    }

    pub fn transcript(&self) -> &[Line] {
        &self.transcript
    }

    pub fn input(&self) -> &CommandInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut CommandInput {
        &mut self.input
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            lines: self.transcript.clone(),
            input: self.input.text().to_string(),
            cursor: self.input.cursor(),
            phase: self.phase,
            input_locked: self.input_locked(),
        }
    }
}
