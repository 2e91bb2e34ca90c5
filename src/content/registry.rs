//! Command registry
//!
//! Maps command names and aliases (case-insensitively) to handlers. The
//! registry is assembled once through [`CommandRegistryBuilder`] and is
//! read-only afterwards. The builder also produces the `help` command, whose
//! text is generated from the final set of registrations so it can never go
//! stale.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{CommandHandler, ContentProvider, HandlerOutput};
use crate::error::{Error, Result};
use crate::models::Line;

/// Name of the generated help command
pub const HELP_COMMAND: &str = "help";

/// Description and names of a command, without its handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    /// Primary name (lowercase)
    pub name: String,
    /// Alternative names (lowercase)
    pub aliases: Vec<String>,
    /// One-line description shown by `help`
    pub description: String,
}

impl CommandSummary {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            aliases: Vec::new(),
            description: description.to_string(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aliases = aliases
            .into_iter()
            .map(|a| a.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Primary name followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// A command: names, description and handler
#[derive(Clone)]
pub struct CommandRegistration {
    summary: CommandSummary,
    handler: Arc<dyn CommandHandler>,
}

impl CommandRegistration {
    /// Register `handler` under `name`
    pub fn new(name: &str, description: &str, handler: impl CommandHandler + 'static) -> Self {
        Self {
            summary: CommandSummary::new(name, description),
            handler: Arc::new(handler),
        }
    }

    /// Add one alias
    pub fn alias(mut self, alias: &str) -> Self {
        self.summary.aliases.push(alias.to_lowercase());
        self
    }

    pub fn name(&self) -> &str {
        &self.summary.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.summary.aliases
    }

    pub fn description(&self) -> &str {
        &self.summary.description
    }

    pub fn summary(&self) -> &CommandSummary {
        &self.summary
    }

    pub fn handler(&self) -> Arc<dyn CommandHandler> {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for CommandRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistration")
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Immutable name/alias table
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    entries: Vec<CommandRegistration>,
    /// Case-folded name or alias -> index into `entries`
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::new()
    }

    /// Registration for a name or alias, ignoring case
    pub fn resolve(&self, name: &str) -> Option<&CommandRegistration> {
        self.index
            .get(&name.to_lowercase())
            .and_then(|&i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandRegistration> {
        self.entries.iter()
    }
}

impl ContentProvider for CommandRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.resolve(name).map(CommandRegistration::handler)
    }

    fn commands(&self) -> Vec<CommandSummary> {
        self.entries.iter().map(|e| e.summary.clone()).collect()
    }
}

/// Builder for [`CommandRegistry`]
#[derive(Debug)]
pub struct CommandRegistryBuilder {
    entries: Vec<CommandRegistration>,
    reserved: Vec<CommandSummary>,
    generate_help: bool,
}

impl CommandRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            reserved: Vec::new(),
            generate_help: true,
        }
    }

    /// Add a command
    pub fn register(mut self, registration: CommandRegistration) -> Self {
        self.entries.push(registration);
        self
    }

    /// Declare a command handled outside the registry (e.g. `clear`)
    ///
    /// Reserved commands appear in the help listing and may not be shadowed
    /// by a registration.
    pub fn reserve(mut self, summary: CommandSummary) -> Self {
        self.reserved.push(summary);
        self
    }

    /// Whether to add the generated `help` command (default: yes)
    pub fn generate_help(mut self, enabled: bool) -> Self {
        self.generate_help = enabled;
        self
    }

    /// Validate names and freeze the table
    pub fn build(self) -> Result<CommandRegistry> {
        let CommandRegistryBuilder {
            mut entries,
            reserved,
            generate_help,
        } = self;

        if generate_help {
            let help_text = render_help(
                entries.iter().map(CommandRegistration::summary),
                &reserved,
            );
            entries.push(
                CommandRegistration::new(
                    HELP_COMMAND,
                    "Show this help message",
                    HelpHandler { text: help_text },
                )
                .alias("h")
                .alias("?"),
            );
        }

        let mut index = HashMap::new();
        for reserved_summary in &reserved {
            for name in reserved_summary.names() {
                validate_name(name)?;
            }
        }

        for (i, entry) in entries.iter().enumerate() {
            for name in entry.summary.names() {
                validate_name(name)?;
                if reserved.iter().any(|r| r.names().any(|n| n == name)) {
                    return Err(Error::InvalidCommandName {
                        name: name.to_string(),
                        reason: "name is reserved by the terminal".to_string(),
                    });
                }
                if index.insert(name.to_string(), i).is_some() {
                    return Err(Error::DuplicateCommand {
                        name: name.to_string(),
                    });
                }
            }
        }

        debug!(
            "Command registry built: {} commands, {} names",
            entries.len(),
            index.len()
        );

        Ok(CommandRegistry { entries, index })
    }
}

impl Default for CommandRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidCommandName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidCommandName {
            name: name.to_string(),
            reason: "name cannot contain whitespace".to_string(),
        });
    }
    Ok(())
}

/// Render the help listing for the given commands
fn render_help<'a>(
    commands: impl Iterator<Item = &'a CommandSummary>,
    reserved: &'a [CommandSummary],
) -> String {
    let mut rows: Vec<(String, String)> = commands
        .chain(reserved.iter())
        .map(|c| {
            let description = if c.aliases.is_empty() {
                c.description.clone()
            } else {
                format!("{} (aliases: {})", c.description, c.aliases.join(", "))
            };
            (c.name.clone(), description)
        })
        .collect();
    rows.push((
        HELP_COMMAND.to_string(),
        "Show this help message (aliases: h, ?)".to_string(),
    ));

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut text = String::from("Available commands:\n\n");
    for (name, description) in &rows {
        text.push_str(&format!("  {name:<width$}  - {description}\n"));
    }
    text.push_str("\nNavigation:\n");
    text.push_str("  Up/Down  - Navigate command history\n");
    text.push_str("  Tab      - Complete command names\n");
    text.push_str("  Esc      - Leave the current activity\n");
    text.push_str("\nType any command to get started!");
    text
}

struct HelpHandler {
    text: String,
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn execute(&self, _args: &[String]) -> anyhow::Result<HandlerOutput> {
        Ok(HandlerOutput::Line(Line::info(self.text.clone())))
    }
}
