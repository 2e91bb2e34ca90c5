//! Command parsing and dispatch
//!
//! [`CommandDispatcher::dispatch`] turns raw input into a [`CommandOutcome`]
//! and never fails: empty input, unknown names, handler errors and handler
//! timeouts all come back as error-kind lines. The screen-clearing and
//! activity-launch commands are resolved here, before the content provider is
//! consulted, so they keep working whatever the provider registers.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::content::{CommandSummary, ContentProvider, HandlerOutput};
use crate::error::{Error, Result};
use crate::models::{CommandOutcome, Directive, Line};

/// Names that clear the transcript
pub const CLEAR_COMMANDS: [&str; 2] = ["clear", "cls"];

/// Default timeout applied to content handlers
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(10);

/// Input split into a command name and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First token, case-folded
    pub name: String,
    /// Remaining tokens, case preserved
    pub args: Vec<String>,
}

/// Split raw input on whitespace
///
/// Returns [`Error::EmptyCommand`] for blank input.
pub fn parse_input(raw: &str) -> Result<ParsedCommand> {
    let mut tokens = raw.split_whitespace();
    let name = tokens.next().ok_or(Error::EmptyCommand)?.to_lowercase();
    let args = tokens.map(str::to_string).collect();
    Ok(ParsedCommand { name, args })
}

/// Commands resolved by the dispatcher itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedCommands {
    /// Names that launch the embedded activity; empty disables launching
    launch_names: Vec<String>,
    /// Activity name carried by the launch directive
    activity: String,
}

impl ReservedCommands {
    pub fn new<I, S>(launch_names: I, activity: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            launch_names: launch_names
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            activity: activity.to_string(),
        }
    }

    /// Only the clear commands, no activity
    pub fn without_activity() -> Self {
        Self::new(Vec::<String>::new(), "")
    }

    /// Directive for a case-folded command name, if it is reserved
    pub fn resolve(&self, name: &str) -> Option<Directive> {
        if CLEAR_COMMANDS.contains(&name) {
            Some(Directive::ClearTranscript)
        } else if self.launch_names.iter().any(|n| n == name) {
            Some(Directive::LaunchActivity(self.activity.clone()))
        } else {
            None
        }
    }

    /// Help entries for the reserved commands
    pub fn summaries(&self) -> Vec<CommandSummary> {
        let mut summaries = vec![CommandSummary::new(CLEAR_COMMANDS[0], "Clear the terminal screen")
            .with_aliases(&CLEAR_COMMANDS[1..])];
        if let Some((first, rest)) = self.launch_names.split_first() {
            summaries.push(
                CommandSummary::new(first, &format!("Play {}", self.activity)).with_aliases(rest),
            );
        }
        summaries
    }
}

impl Default for ReservedCommands {
    fn default() -> Self {
        Self::new(["snake", "game"], "snake")
    }
}

/// Resolves input against the reserved commands and the content provider
pub struct CommandDispatcher {
    provider: Arc<dyn ContentProvider>,
    reserved: ReservedCommands,
    timeout: Duration,
}

impl CommandDispatcher {
    pub fn new(provider: Arc<dyn ContentProvider>, reserved: ReservedCommands) -> Self {
        Self {
            provider,
            reserved,
            timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    /// Set the per-handler timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Primary names of every command the dispatcher can resolve
    pub fn command_names(&self) -> Vec<String> {
        self.all_commands().into_iter().map(|c| c.name).collect()
    }

    /// Every name and alias the dispatcher can resolve
    pub fn all_names(&self) -> Vec<String> {
        self.all_commands()
            .iter()
            .flat_map(|c| c.names().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    fn all_commands(&self) -> Vec<CommandSummary> {
        let mut commands = self.provider.commands();
        commands.extend(self.reserved.summaries());
        commands
    }

    /// Run one command
    pub async fn dispatch(&self, raw: &str) -> CommandOutcome {
        let parsed = match parse_input(raw) {
            Ok(parsed) => parsed,
            Err(e) => return Line::from(e).into(),
        };

        if let Some(directive) = self.reserved.resolve(&parsed.name) {
            debug!("Reserved command '{}' -> {:?}", parsed.name, directive);
            return directive.into();
        }

        let Some(handler) = self.provider.lookup(&parsed.name) else {
            debug!("Unknown command '{}'", parsed.name);
            return Line::from(Error::CommandNotFound {
                command: parsed.name,
            })
            .into();
        };

        match tokio::time::timeout(self.timeout, handler.execute(&parsed.args)).await {
            Ok(Ok(output)) => normalize(output),
            Ok(Err(e)) => {
                warn!("Command '{}' failed: {:#}", parsed.name, e);
                Line::from(Error::HandlerFailed {
                    command: parsed.name,
                    reason: format!("{e:#}"),
                })
                .into()
            }
            Err(_) => {
                warn!("Command '{}' timed out after {:?}", parsed.name, self.timeout);
                Line::from(Error::HandlerTimeout {
                    command: parsed.name,
                    duration: self.timeout,
                })
                .into()
            }
        }
    }
}

/// Convert handler output into the line/directive union
pub fn normalize(output: HandlerOutput) -> CommandOutcome {
    match output {
        HandlerOutput::Text(text) => Line::output(text).into(),
        HandlerOutput::Line(line) => line.into(),
        HandlerOutput::Directive(directive) => directive.into(),
    }
}
