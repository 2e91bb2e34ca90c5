//! Reveal Scheduler
//!
//! Discloses a line's text incrementally to imitate typing. A reveal is a
//! paced sequence of [`RevealStep`]s: the first step appends a new transcript
//! entry, every later step replaces that entry with a longer prefix, and the
//! last step always carries the full text. One reveal adds exactly one line
//! to the transcript whatever the number of increments.
//!
//! A [`RevealPlan`] keeps the full line and the byte offset where each
//! increment ends. Prefixes are copied out one step at a time, so a plan
//! costs one word per increment on top of the text itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::schedule::ScheduledTask;
use crate::models::{Line, LineKind};

/// Default pause between increments
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(20);

/// Unit of text disclosed per increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealGranularity {
    /// One whitespace-separated word at a time
    #[default]
    Word,
    /// One character at a time
    Character,
}

/// Which lines are revealed rather than appended directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationPolicy {
    /// Output-kind lines and anything spanning several rows
    #[default]
    MultiLine,
    /// Every line
    Always,
    /// No line; everything is appended at once
    Never,
}

impl AnimationPolicy {
    pub fn should_reveal(self, line: &Line) -> bool {
        match self {
            AnimationPolicy::Always => true,
            AnimationPolicy::Never => false,
            AnimationPolicy::MultiLine => line.kind == LineKind::Output || line.is_multi_line(),
        }
    }
}

/// One transcript mutation produced by a reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    /// Append a new tail entry
    Append(Line),
    /// Replace the tail entry
    Replace(Line),
}

impl RevealStep {
    pub fn line(&self) -> &Line {
        match self {
            RevealStep::Append(line) | RevealStep::Replace(line) => line,
        }
    }
}

/// Byte offsets where each increment of `text` ends
///
/// Offsets are strictly increasing char boundaries and the last one is
/// `text.len()`. Word increments keep the existing whitespace between words.
/// Empty text yields a single increment ending at 0.
pub fn increment_ends(text: &str, granularity: RevealGranularity) -> Vec<usize> {
    let mut ends: Vec<usize> = match granularity {
        RevealGranularity::Character => text
            .char_indices()
            .map(|(i, ch)| i + ch.len_utf8())
            .collect(),
        RevealGranularity::Word => {
            let mut ends = Vec::new();
            let mut in_word = false;
            for (i, ch) in text.char_indices() {
                if ch.is_whitespace() {
                    if in_word {
                        ends.push(i);
                    }
                    in_word = false;
                } else {
                    in_word = true;
                }
            }
            ends
        }
    };

    if ends.last() != Some(&text.len()) {
        ends.push(text.len());
    }
    ends
}

/// Cumulative prefixes of `text`, ending with `text` itself
pub fn increments(text: &str, granularity: RevealGranularity) -> impl Iterator<Item = &str> + '_ {
    increment_ends(text, granularity)
        .into_iter()
        .map(move |end| &text[..end])
}

/// The increments of one line, with the pause before each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealPlan {
    line: Line,
    ends: Vec<usize>,
    delay: Duration,
}

impl RevealPlan {
    /// Number of steps; never zero
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// The fully revealed line
    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    /// Step `index` and the delay before it
    pub fn step(&self, index: usize) -> Option<(Duration, RevealStep)> {
        let end = *self.ends.get(index)?;
        let partial = self.line.with_text(&self.line.text[..end]);
        Some(if index == 0 {
            (Duration::ZERO, RevealStep::Append(partial))
        } else {
            (self.delay, RevealStep::Replace(partial))
        })
    }

    /// Every step in order, each built when it is reached
    pub fn steps(&self) -> impl Iterator<Item = (Duration, RevealStep)> + '_ {
        (0..self.len()).filter_map(move |index| self.step(index))
    }
}

/// A paced, cancellable reveal of one line
#[derive(Debug)]
pub struct RevealTask {
    plan: RevealPlan,
    /// Indices into the plan, paced by their delays
    pending: ScheduledTask<usize>,
}

impl RevealTask {
    fn new(plan: RevealPlan, cancel: CancellationToken) -> Self {
        let pacing = (0..plan.len()).map(|index| {
            let delay = if index == 0 { Duration::ZERO } else { plan.delay };
            (delay, index)
        });
        let pending = ScheduledTask::from_steps(pacing, cancel);
        Self { plan, pending }
    }

    /// Wait for the next step
    ///
    /// Cancel-safe like [`ScheduledTask::next`].
    pub async fn next(&mut self) -> Option<RevealStep> {
        let index = self.pending.next().await?;
        self.plan.step(index).map(|(_, step)| step)
    }

    pub fn plan(&self) -> &RevealPlan {
        &self.plan
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_finished()
    }

    pub fn is_cancelled(&self) -> bool {
        self.pending.is_cancelled()
    }
}

/// Plans and schedules reveals for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealScheduler {
    granularity: RevealGranularity,
    delay: Duration,
    policy: AnimationPolicy,
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new(RevealGranularity::default(), DEFAULT_REVEAL_DELAY)
    }
}

impl RevealScheduler {
    pub fn new(granularity: RevealGranularity, delay: Duration) -> Self {
        Self {
            granularity,
            delay,
            policy: AnimationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AnimationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn granularity(&self) -> RevealGranularity {
        self.granularity
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether `line` should be revealed instead of appended whole
    pub fn should_reveal(&self, line: &Line) -> bool {
        self.policy.should_reveal(line)
    }

    /// Steps for revealing `line`, with the delay before each
    pub fn plan(&self, line: &Line) -> RevealPlan {
        RevealPlan {
            ends: increment_ends(&line.text, self.granularity),
            line: line.clone(),
            delay: self.delay,
        }
    }

    /// Paced task yielding the steps of [`plan`](Self::plan)
    pub fn schedule(&self, line: &Line, cancel: CancellationToken) -> RevealTask {
        RevealTask::new(self.plan(line), cancel)
    }
}
