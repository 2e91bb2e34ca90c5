//! Startup banner
//!
//! The scripted lines a fresh session prints before it accepts input. Each
//! banner line arrives one cadence after the previous one; a final settle
//! delay separates the last line from the moment input unlocks.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::schedule::ScheduledTask;
use crate::models::Line;

/// Default pause between banner lines
pub const DEFAULT_BOOT_CADENCE: Duration = Duration::from_millis(800);

/// Default pause between the last banner line and unlocking input
pub const DEFAULT_BOOT_SETTLE: Duration = Duration::from_millis(300);

/// One step of the startup script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootStep {
    /// Append a banner line
    Banner(Line),
    /// Banner finished; unlock input
    Ready,
}

/// Scripted welcome banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootSequence {
    lines: Vec<Line>,
    cadence: Duration,
    settle: Duration,
    skippable: bool,
}

impl BootSequence {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            cadence: DEFAULT_BOOT_CADENCE,
            settle: DEFAULT_BOOT_SETTLE,
            skippable: true,
        }
    }

    /// Banner that unlocks input immediately
    pub fn empty() -> Self {
        Self::new(Vec::new()).with_timing(Duration::ZERO, Duration::ZERO)
    }

    pub fn with_timing(mut self, cadence: Duration, settle: Duration) -> Self {
        self.cadence = cadence;
        self.settle = settle;
        self
    }

    /// Whether Enter may flush the rest of the banner
    pub fn skippable(mut self, skippable: bool) -> Self {
        self.skippable = skippable;
        self
    }

    pub fn is_skippable(&self) -> bool {
        self.skippable
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Total time from start to [`BootStep::Ready`]
    pub fn duration(&self) -> Duration {
        self.cadence * self.lines.len() as u32 + self.settle
    }

    pub fn schedule(&self, cancel: CancellationToken) -> ScheduledTask<BootStep> {
        let steps = self
            .lines
            .iter()
            .cloned()
            .map(|line| (self.cadence, BootStep::Banner(line)))
            .chain(std::iter::once((self.settle, BootStep::Ready)));
        ScheduledTask::from_steps(steps, cancel)
    }
}
