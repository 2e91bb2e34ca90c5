//! Event Handling and Message Passing
//!
//! Messages crossing the boundary between the host and the session engine.
//! The host sends [`SessionEvent`]s in; the engine sends [`HostSignal`]s out.
//! Both travel over unbounded tokio mpsc channels and are processed in order.

use std::fmt;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// A keystroke from the keyboard surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Complete the command name
    Tab,
    /// History: step back
    Previous,
    /// History: step forward
    Next,
    /// Commit the input buffer
    Submit,
    /// Ask the host to close whatever embeds the terminal
    Escape,
}

/// Host → engine message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Key(KeyInput),
    /// Discard transcript, history and input, then replay the banner
    Reset,
}

impl From<KeyInput> for SessionEvent {
    fn from(key: KeyInput) -> Self {
        SessionEvent::Key(key)
    }
}

/// Engine → host message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSignal {
    /// A submitted command finished and its effect is visible
    CommandCompleted { input: String },
    /// Escape was pressed
    ExitRequested,
    /// A command asked for an embedded activity
    LaunchActivity { name: String },
}

impl fmt::Display for HostSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostSignal::CommandCompleted { input } => write!(f, "command completed: {input}"),
            HostSignal::ExitRequested => write!(f, "exit requested"),
            HostSignal::LaunchActivity { name } => write!(f, "launch activity: {name}"),
        }
    }
}

/// Receiving end of the engine's host signals
#[derive(Debug)]
pub struct HostSignals {
    rx: mpsc::UnboundedReceiver<HostSignal>,
}

impl HostSignals {
    pub(crate) fn channel() -> (mpsc::UnboundedSender<HostSignal>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Next signal; `None` once the engine has stopped
    pub async fn recv(&mut self) -> Option<HostSignal> {
        self.rx.recv().await
    }

    /// Next signal if one is queued, for polling from a UI frame
    pub fn try_recv(&mut self) -> Option<HostSignal> {
        match self.rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Every signal queued right now
    pub fn drain(&mut self) -> Vec<HostSignal> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
