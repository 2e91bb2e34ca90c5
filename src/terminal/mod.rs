//! Terminal Session Engine
//!
//! A [`TerminalSession`] owns the [`SessionState`] and is its only mutator.
//! It runs as a tokio task, draining host events and driving whatever job is
//! in progress (banner, dispatch, reveal) from one `select!` loop, so every
//! mutation happens in delivery order on a single task. Input stays locked
//! until the current job finishes.
//!
//! The host talks to the engine through a [`SessionHandle`] and listens on
//! [`HostSignals`]. Dropping the handle cancels the engine: pending timers and
//! handler futures are dropped and the state is never touched again.

pub mod input;
pub mod reveal;
pub mod schedule;
pub mod startup;
pub mod state;

pub use input::{CommandInput, InputResult};
pub use reveal::{
    AnimationPolicy, RevealGranularity, RevealPlan, RevealScheduler, RevealStep, RevealTask,
};
pub use schedule::ScheduledTask;
pub use startup::{BootSequence, BootStep};
pub use state::{SessionPhase, SessionSnapshot, SessionState};

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::commands::CommandDispatcher;
use crate::completion::{CommandCompleter, Completion};
use crate::config::Config;
use crate::content::ContentProvider;
use crate::error::{Error, Result};
use crate::events::{HostSignal, HostSignals, KeyInput, SessionEvent};
use crate::models::{CommandOutcome, Directive, Line};

/// Work the engine is currently driving
enum Job {
    Idle,
    Booting(ScheduledTask<BootStep>),
    Dispatching {
        input: String,
        pending: BoxFuture<'static, CommandOutcome>,
    },
    Revealing {
        input: String,
        task: RevealTask,
    },
}

/// What a job produced when it was last polled
enum Progress {
    Boot(Option<BootStep>),
    Dispatched(CommandOutcome),
    Reveal(Option<RevealStep>),
}

impl Job {
    /// Wait for the job's next step; never resolves while idle
    ///
    /// Cancel-safe: pending futures and timers stay inside the job.
    async fn progress(&mut self) -> Progress {
        match self {
            Job::Idle => std::future::pending().await,
            Job::Booting(task) => Progress::Boot(task.next().await),
            Job::Dispatching { pending, .. } => Progress::Dispatched(pending.as_mut().await),
            Job::Revealing { task, .. } => Progress::Reveal(task.next().await),
        }
    }
}

/// The engine task
pub struct TerminalSession {
    id: Uuid,
    state: SessionState,
    dispatcher: Arc<CommandDispatcher>,
    reveal: RevealScheduler,
    boot: BootSequence,
    /// Rendered prompt used for command echoes
    prompt: String,
    completer: CommandCompleter,
    job: Job,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    signals: mpsc::UnboundedSender<HostSignal>,
    snapshots: watch::Sender<SessionSnapshot>,
    /// Whole-session token, cancelled by the handle
    cancel: CancellationToken,
    /// Token for the current job, replaced on reset
    job_cancel: CancellationToken,
}

impl TerminalSession {
    pub fn builder() -> TerminalSessionBuilder {
        TerminalSessionBuilder::default()
    }

    async fn run(mut self) {
        info!("Terminal session started");
        self.start_boot();
        self.publish();

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                progress = self.job.progress() => self.advance(progress),
            }
            self.publish();
        }

        self.job_cancel.cancel();
        self.job = Job::Idle;
        info!("Terminal session stopped");
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Reset => self.reset(),
            SessionEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key == KeyInput::Escape {
            self.signal(HostSignal::ExitRequested);
            return;
        }

        if self.state.input_locked() {
            if key == KeyInput::Submit {
                self.skip_boot();
            } else {
                debug!("Input locked ({}), ignoring {:?}", self.state.phase(), key);
            }
            return;
        }

        if key == KeyInput::Tab {
            self.complete();
            return;
        }

        let input = self.state.input_mut();
        let result = match key {
            KeyInput::Char(ch) => input.insert_char(ch),
            KeyInput::Backspace => input.backspace(),
            KeyInput::Delete => input.delete(),
            KeyInput::Left => input.cursor_left(),
            KeyInput::Right => input.cursor_right(),
            KeyInput::Home => input.cursor_home(),
            KeyInput::End => input.cursor_end(),
            KeyInput::Previous => input.history_previous(),
            KeyInput::Next => input.history_next(),
            KeyInput::Submit => input.submit(),
            KeyInput::Tab | KeyInput::Escape => InputResult::NoOp,
        };

        match result {
            InputResult::Submitted(command) => self.start_dispatch(command),
            InputResult::EmptySubmit => debug!("Blank submission ignored"),
            _ => {}
        }
    }

    /// Tab: complete the command name, or extend it to the common prefix
    fn complete(&mut self) {
        let typed = self.state.input().text().trim_start().chars().count();
        match self.completer.complete(self.state.input().text()) {
            Completion::Unique(name) => {
                self.state.input_mut().set_text(&name);
            }
            Completion::Ambiguous { common, candidates } => {
                debug!("Completion candidates: {}", candidates.join(", "));
                if common.chars().count() > typed {
                    self.state.input_mut().set_text(&common);
                }
            }
            Completion::None => {}
        }
    }

    fn start_dispatch(&mut self, command: String) {
        debug!("Dispatching '{}'", command);
        self.state
            .append(Line::command_echo(format!("{} {}", self.prompt, command)));
        self.state.set_phase(SessionPhase::Dispatching);

        let dispatcher = Arc::clone(&self.dispatcher);
        let raw = command.clone();
        let pending = async move { dispatcher.dispatch(&raw).await }.boxed();
        self.job = Job::Dispatching {
            input: command,
            pending,
        };
    }

    fn advance(&mut self, progress: Progress) {
        match progress {
            Progress::Boot(Some(BootStep::Banner(line))) => self.state.append(line),
            Progress::Boot(Some(BootStep::Ready)) | Progress::Boot(None) => self.finish_boot(),
            Progress::Dispatched(outcome) => self.apply_outcome(outcome),
            Progress::Reveal(Some(step)) => self.state.apply_reveal(step),
            Progress::Reveal(None) => {
                if let Job::Revealing { input, .. } = std::mem::replace(&mut self.job, Job::Idle) {
                    self.finish_command(input);
                }
            }
        }
    }

    fn apply_outcome(&mut self, outcome: CommandOutcome) {
        let Job::Dispatching { input, .. } = std::mem::replace(&mut self.job, Job::Idle) else {
            return;
        };

        match outcome {
            CommandOutcome::Directive(Directive::ClearTranscript) => {
                self.state.clear_transcript();
                self.finish_command(input);
            }
            CommandOutcome::Directive(Directive::LaunchActivity(name)) => {
                info!("Launching activity '{}'", name);
                self.signal(HostSignal::LaunchActivity { name });
                self.finish_command(input);
            }
            CommandOutcome::Line(line) if self.reveal.should_reveal(&line) => {
                let task = self.reveal.schedule(&line, self.job_cancel.child_token());
                debug!(
                    "Revealing {} line in {} steps",
                    task.plan().line().kind,
                    task.plan().len()
                );
                self.state.set_phase(SessionPhase::Revealing);
                self.job = Job::Revealing { input, task };
            }
            CommandOutcome::Line(line) => {
                self.state.append(line);
                self.finish_command(input);
            }
        }
    }

    /// Unlock input and tell the host, once the effect is visible
    fn finish_command(&mut self, input: String) {
        self.job = Job::Idle;
        self.state.set_phase(SessionPhase::Idle);
        self.publish();
        self.signal(HostSignal::CommandCompleted { input });
    }

    fn start_boot(&mut self) {
        self.state.set_phase(SessionPhase::Booting);
        self.job = Job::Booting(self.boot.schedule(self.job_cancel.child_token()));
    }

    /// Flush the remaining banner lines at once
    fn skip_boot(&mut self) {
        if !self.boot.is_skippable() {
            return;
        }
        let Job::Booting(task) = &mut self.job else {
            return;
        };
        debug!("Skipping startup banner");
        for step in task.drain() {
            if let BootStep::Banner(line) = step {
                self.state.append(line);
            }
        }
        self.finish_boot();
    }

    fn finish_boot(&mut self) {
        self.job = Job::Idle;
        self.state.set_phase(SessionPhase::Idle);
        info!("Terminal session ready");
    }

    fn reset(&mut self) {
        info!("Resetting terminal session");
        self.job_cancel.cancel();
        self.job_cancel = self.cancel.child_token();
        self.job = Job::Idle;
        self.state.reset();
        self.start_boot();
    }

    fn signal(&self, signal: HostSignal) {
        debug!("Host signal: {}", signal);
        if self.signals.send(signal).is_err() {
            debug!("No host listening for signals");
        }
    }

    fn publish(&self) {
        let snapshot = self.state.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

/// Builder for [`TerminalSession`]
#[derive(Default)]
pub struct TerminalSessionBuilder {
    provider: Option<Arc<dyn ContentProvider>>,
    config: Config,
}

impl TerminalSessionBuilder {
    /// Serve commands from `provider` instead of the configured portfolio
    pub fn content(mut self, provider: impl ContentProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Share an existing provider
    pub fn content_provider(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the engine without starting it
    fn build(self) -> Result<(TerminalSession, SessionHandle, HostSignals)> {
        let Self { provider, config } = self;

        let reserved = config.session.reserved_commands();
        let provider = match provider {
            Some(provider) => provider,
            None => Arc::new(config.content.registry(reserved.summaries())?),
        };
        let dispatcher = CommandDispatcher::new(provider, reserved)
            .with_timeout(config.session.handler_timeout());

        let boot = config.boot_sequence(&dispatcher.command_names());
        let completer = CommandCompleter::new(dispatcher.all_names());

        let state = SessionState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (signal_tx, signals) = HostSignals::channel();
        let cancel = CancellationToken::new();
        let id = Uuid::new_v4();

        let session = TerminalSession {
            id,
            state,
            dispatcher: Arc::new(dispatcher),
            reveal: config.reveal.scheduler(),
            boot,
            prompt: config.session.render_prompt(),
            completer,
            job: Job::Idle,
            events: event_rx,
            signals: signal_tx,
            snapshots: snapshot_tx,
            job_cancel: cancel.child_token(),
            cancel: cancel.clone(),
        };

        let handle = SessionHandle {
            id,
            events: event_tx,
            snapshots: snapshot_rx,
            cancel,
            task: None,
        };

        Ok((session, handle, signals))
    }

    /// Start the engine on the current tokio runtime
    pub fn spawn(self) -> Result<(SessionHandle, HostSignals)> {
        let (session, mut handle, signals) = self.build()?;
        let span = info_span!("session", id = %session.id);
        handle.task = Some(tokio::spawn(session.run().instrument(span)));
        Ok((handle, signals))
    }
}

/// Host-side handle to a running session
///
/// Dropping the handle stops the engine.
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    events: mpsc::UnboundedSender<SessionEvent>,
    snapshots: watch::Receiver<SessionSnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn send(&self, event: SessionEvent) -> Result<()> {
        self.events.send(event).map_err(|_| Error::SessionClosed)
    }

    pub fn send_key(&self, key: KeyInput) -> Result<()> {
        self.send(SessionEvent::Key(key))
    }

    /// Type `text` one character at a time
    pub fn type_text(&self, text: &str) -> Result<()> {
        text.chars()
            .try_for_each(|ch| self.send_key(KeyInput::Char(ch)))
    }

    /// Type `command` and press Enter
    pub fn enter(&self, command: &str) -> Result<()> {
        self.type_text(command)?;
        self.send_key(KeyInput::Submit)
    }

    /// Cancel in-flight work, forget transcript and history, replay the banner
    pub fn reset(&self) -> Result<()> {
        self.send(SessionEvent::Reset)
    }

    /// Latest published state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot> {
        let mut rx = self.subscribe();
        let snapshot = rx
            .wait_for(|s| predicate(s))
            .await
            .map_err(|_| Error::SessionClosed)?;
        Ok(snapshot.clone())
    }

    /// Wait for input to unlock
    pub async fn wait_until_idle(&self) -> Result<SessionSnapshot> {
        self.wait_for(SessionSnapshot::is_idle).await
    }

    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }

    /// Stop the engine and wait for its task to finish
    pub async fn shutdown(mut self) -> Result<()> {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.await.map_err(|e| {
                warn!("Terminal session task failed: {}", e);
                Error::SessionClosed
            })?;
        }
        Ok(())
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
