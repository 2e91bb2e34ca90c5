//! Paced, cancellable work queue
//!
//! A [`ScheduledTask`] yields queued items one at a time, each after its own
//! delay. The pending timer lives inside the task, so `next()` can be raced in
//! a `select!` and dropped without losing the item or restarting its delay.
//! Cancelling the token empties the queue; nothing is yielded afterwards.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::Sleep;
use tokio_util::sync::CancellationToken;

/// Queue of `(delay, item)` steps driven by tokio timers
#[derive(Debug)]
pub struct ScheduledTask<T> {
    steps: VecDeque<(Duration, T)>,
    /// Armed timer for the front step, created on first poll
    timer: Option<Pin<Box<Sleep>>>,
    cancel: CancellationToken,
}

impl<T> ScheduledTask<T> {
    /// Build a task from `(delay, item)` pairs
    pub fn from_steps(
        steps: impl IntoIterator<Item = (Duration, T)>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            timer: None,
            cancel,
        }
    }

    /// Wait for the next item
    ///
    /// Returns `None` once the queue is empty or the task was cancelled.
    /// Cancel-safe: dropping the future keeps the item and its deadline.
    pub async fn next(&mut self) -> Option<T> {
        if self.cancel.is_cancelled() {
            self.clear();
            return None;
        }

        let delay = self.steps.front()?.0;
        if !delay.is_zero() {
            let timer = self
                .timer
                .get_or_insert_with(|| Box::pin(tokio::time::sleep(delay)));
            let fired = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => false,
                _ = timer.as_mut() => true,
            };
            if !fired {
                self.clear();
                return None;
            }
        }

        self.timer = None;
        self.steps.pop_front().map(|(_, item)| item)
    }

    /// Take every remaining item at once, ignoring delays
    pub fn drain(&mut self) -> Vec<T> {
        self.timer = None;
        if self.cancel.is_cancelled() {
            self.steps.clear();
            return Vec::new();
        }
        self.steps.drain(..).map(|(_, item)| item).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    fn clear(&mut self) {
        self.steps.clear();
        self.timer = None;
    }
}
