//! Error types and Result aliases for folioterm
//!
//! User-visible failures (unknown commands, handler failures) are rendered
//! into the transcript through the `Display` impl of these variants, so the
//! wording here is what the visitor reads.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for folioterm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for folioterm
#[derive(Debug, Error)]
pub enum Error {
    // === Input errors ===
    /// Blank submission
    #[error("Please enter a command. Type 'help' for available commands.")]
    EmptyCommand,

    /// No registration matches the command name
    #[error("Command '{command}' not found. Type 'help' for available commands.")]
    CommandNotFound { command: String },

    // === Handler errors ===
    /// A content handler returned an error
    #[error("Error executing command '{command}': {reason}")]
    HandlerFailed { command: String, reason: String },

    /// A content handler did not finish in time
    #[error("Command '{command}' timed out after {duration:?}")]
    HandlerTimeout { command: String, duration: Duration },

    // === Registry errors ===
    /// Two registrations resolve to the same case-folded name
    #[error("Command name '{name}' is registered more than once")]
    DuplicateCommand { name: String },

    /// Name or alias is blank, contains whitespace, or shadows a reserved command
    #[error("Invalid command name '{name}': {reason}")]
    InvalidCommandName { name: String, reason: String },

    // === Configuration errors ===
    /// Failed to read a configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse a configuration file
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// Failed to serialize configuration
    #[error("Failed to serialize config as {format}: {reason}")]
    ConfigSerializationFailed { format: String, reason: String },

    /// Configuration value out of range
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// No configuration file in any search path
    #[error("Configuration file not found")]
    ConfigNotFound,

    // === Session errors ===
    /// The engine task is gone (shut down or dropped)
    #[error("Terminal session is closed")]
    SessionClosed,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
