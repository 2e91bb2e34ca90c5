//! folioterm - a portfolio terminal with typewriter output
//!
//! This library provides the core of folioterm: a simulated command line
//! that answers a fixed set of portfolio commands, reveals its answers word
//! by word, and locks input while it is busy.
//!
//! ## Features
//!
//! - **Command Dispatch:** Case-insensitive names and aliases, generated `help`
//! - **Typewriter Reveal:** Word or character increments on a cancellable schedule
//! - **Startup Banner:** Scripted welcome lines, skippable with Enter
//! - **Input Editing:** Cursor movement, history navigation, Tab completion
//! - **Directives:** Clear and launch requests kept apart from displayable text
//! - **Configuration:** TOML or JSON files with per-section defaults
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`terminal`] - Terminal session engine, input buffer, reveal and banner scheduling
//! - [`commands`] - Command parsing and dispatch to the content provider
//! - [`content`] - Content provider boundary, command registry, built-in portfolio
//! - [`models`] - Data structures (Line, LineKind, Directive)
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### Host Surface
//!
//! - [`events`] - Key events in, host signals out
//! - [`ui`] - egui rendering helpers (colors, transcript view, key translation)
//! - [`completion`] - Command name completion
//! - [`config`] - Configuration loading, validation, prompt formatting
//!
//! ## Quick Start
//!
//! ```no_run
//! use folioterm::terminal::TerminalSession;
//!
//! # async fn run() -> folioterm::Result<()> {
//! let (handle, mut signals) = TerminalSession::builder().spawn()?;
//! handle.wait_until_idle().await?;
//!
//! handle.enter("about")?;
//! let _completed = signals.recv().await;
//! for line in handle.snapshot().lines {
//!     println!("{}", line.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Engine Task:** One tokio task owns the session state and is its only mutator
//! - **Host:** Sends key events over a channel and reads published snapshots
//! - **Signals:** The engine reports completed commands, exit and launch requests
//!
//! Dropping the [`SessionHandle`](terminal::SessionHandle) cancels the engine
//! along with any reveal, banner or handler still in flight.

#[macro_use]
extern crate tracing;

pub mod commands;
pub mod completion;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod models;
pub mod terminal;
pub mod ui;

// Re-exports for core functionality
pub use commands::{CommandDispatcher, ReservedCommands};
pub use config::{Config, ConfigLoader};
pub use content::{ContentProvider, HandlerOutput, Portfolio};
pub use error::{Error, Result};
pub use events::{HostSignal, HostSignals, KeyInput, SessionEvent};
pub use models::{CommandOutcome, Directive, Line, LineKind};
pub use terminal::{SessionHandle, SessionSnapshot, TerminalSession};

// Version information
/// The current version of folioterm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the default locations
///
/// Falls back to [`Config::default`] when loading fails, logging the reason.
///
/// ```no_run
/// let config = folioterm::init();
/// println!("prompt: {}", config.session.render_prompt());
/// ```
pub fn init() -> Config {
    info!("Initializing {} v{}", NAME, VERSION);

    match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    }
}
