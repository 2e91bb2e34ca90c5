//! Content Provider boundary
//!
//! The dispatcher never knows what a command prints. It asks a
//! [`ContentProvider`] for the handler registered under a name and awaits
//! whatever the handler produces. Handlers return a [`HandlerOutput`], which
//! keeps control requests ([`Directive`]) apart from displayable text, so no
//! text payload is ever mistaken for an instruction.
//!
//! - [`registry`] - immutable name/alias table with generated help
//! - [`portfolio`] - the built-in portfolio commands and their data

pub mod portfolio;
pub mod registry;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Directive, Line};

pub use portfolio::Portfolio;
pub use registry::{CommandRegistration, CommandRegistry, CommandRegistryBuilder, CommandSummary};

/// What a handler hands back to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutput {
    /// Plain text, shown as an output-kind line
    Text(String),
    /// Text with an explicit kind
    Line(Line),
    /// Control request for the engine
    Directive(Directive),
}

impl From<String> for HandlerOutput {
    fn from(text: String) -> Self {
        HandlerOutput::Text(text)
    }
}

impl From<&str> for HandlerOutput {
    fn from(text: &str) -> Self {
        HandlerOutput::Text(text.to_string())
    }
}

impl From<Line> for HandlerOutput {
    fn from(line: Line) -> Self {
        HandlerOutput::Line(line)
    }
}

impl From<Directive> for HandlerOutput {
    fn from(directive: Directive) -> Self {
        HandlerOutput::Directive(directive)
    }
}

/// A command implementation
///
/// Handlers may suspend (the engine keeps processing keystrokes meanwhile)
/// and may fail; failures are turned into error lines by the dispatcher.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run the command with the whitespace-split arguments after its name
    async fn execute(&self, args: &[String]) -> anyhow::Result<HandlerOutput>;
}

/// Registry of handlers the dispatcher consults
pub trait ContentProvider: Send + Sync {
    /// Handler registered under `name` or one of its aliases (case-insensitive)
    fn lookup(&self, name: &str) -> Option<Arc<dyn CommandHandler>>;

    /// Every registered command, in registration order
    fn commands(&self) -> Vec<CommandSummary>;
}

/// Adapter turning an async closure into a [`CommandHandler`]
pub struct FnHandler<F> {
    func: F,
}

/// Wrap an async closure as a handler
///
/// ```
/// use folioterm::content::{handler_fn, HandlerOutput};
///
/// let echo = handler_fn(|args: Vec<String>| async move {
///     Ok::<_, anyhow::Error>(HandlerOutput::Text(args.join(" ")))
/// });
/// # let _ = echo;
/// ```
pub fn handler_fn<F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<HandlerOutput>> + Send + 'static,
{
    FnHandler { func }
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<HandlerOutput>> + Send + 'static,
{
    async fn execute(&self, args: &[String]) -> anyhow::Result<HandlerOutput> {
        (self.func)(args.to_vec()).await
    }
}

/// Handler that always returns the same output
#[derive(Debug, Clone)]
pub struct StaticHandler {
    output: HandlerOutput,
}

impl StaticHandler {
    pub fn new(output: impl Into<HandlerOutput>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for StaticHandler {
    async fn execute(&self, _args: &[String]) -> anyhow::Result<HandlerOutput> {
        Ok(self.output.clone())
    }
}
