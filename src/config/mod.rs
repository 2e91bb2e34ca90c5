//! Configuration management for folioterm
//!
//! One [`Config`] tree covers the session (prompt, timeouts, reserved
//! commands), reveal pacing, the startup banner, the desktop window, and the
//! portfolio content itself. Every section is `#[serde(default)]`, so a
//! partial file only overrides what it names.

pub mod loader;
pub mod prompt;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::commands::ReservedCommands;
use crate::content::Portfolio;
use crate::models::Line;
use crate::terminal::reveal::{AnimationPolicy, RevealGranularity, RevealScheduler};
use crate::terminal::startup::BootSequence;

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};
pub use prompt::{PromptFormatter, PromptVars};

/// Default prompt template
pub const DEFAULT_PROMPT: &str = "$USER@$HOST:$PWD$";

/// Main configuration structure for folioterm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt, handler timeout and reserved commands
    pub session: SessionConfig,

    /// Reveal pacing
    pub reveal: RevealConfig,

    /// Startup banner
    pub boot: BootConfig,

    /// Desktop window
    pub ui: UiConfig,

    /// Portfolio data served by the built-in commands
    pub content: Portfolio,
}

impl Config {
    /// The welcome banner for this configuration
    ///
    /// `commands` is the list shown on the banner's first line.
    pub fn boot_sequence(&self, commands: &[String]) -> BootSequence {
        if !self.boot.enabled {
            return BootSequence::empty();
        }
        let lines: Vec<Line> = self.content.banner(&self.session.render_prompt(), commands);
        BootSequence::new(lines)
            .with_timing(self.boot.cadence(), self.boot.settle())
            .skippable(self.boot.skippable)
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prompt template (`$USER`, `$HOST`, `$PWD`, `$$` for a literal `$`)
    pub prompt: String,

    /// Value of `$USER`
    pub user: String,

    /// Value of `$HOST`
    pub host: String,

    /// Value of `$PWD`
    pub cwd: String,

    /// Time a content handler may take before it is abandoned
    pub handler_timeout_ms: u64,

    /// Names that launch the embedded activity; empty disables it
    pub launch_commands: Vec<String>,

    /// Activity name passed to the host
    pub activity: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            user: "visitor".to_string(),
            host: "portfolio".to_string(),
            cwd: "~".to_string(),
            handler_timeout_ms: 10_000,
            launch_commands: vec!["snake".to_string(), "game".to_string()],
            activity: "snake".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_millis(self.handler_timeout_ms)
    }

    pub fn reserved_commands(&self) -> ReservedCommands {
        ReservedCommands::new(&self.launch_commands, &self.activity)
    }

    pub fn prompt_vars(&self) -> PromptVars {
        PromptVars {
            user: self.user.clone(),
            host: self.host.clone(),
            cwd: self.cwd.clone(),
        }
    }

    /// The prompt as it appears in front of echoed commands
    pub fn render_prompt(&self) -> String {
        PromptFormatter::new(self.prompt.as_str()).render(&self.prompt_vars())
    }
}

/// Reveal configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// `word` or `character`
    pub granularity: RevealGranularity,

    /// Pause between increments
    pub delay_ms: u64,

    /// `multi-line`, `always` or `never`
    pub animate: AnimationPolicy,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            granularity: RevealGranularity::Word,
            delay_ms: 20,
            animate: AnimationPolicy::MultiLine,
        }
    }
}

impl RevealConfig {
    pub fn scheduler(&self) -> RevealScheduler {
        RevealScheduler::new(self.granularity, Duration::from_millis(self.delay_ms))
            .with_policy(self.animate)
    }
}

/// Startup banner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Play the banner at all
    pub enabled: bool,

    /// Pause between banner lines
    pub cadence_ms: u64,

    /// Pause between the last line and unlocking input
    pub settle_ms: u64,

    /// Enter flushes the rest of the banner
    pub skippable: bool,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cadence_ms: 800,
            settle_ms: 300,
            skippable: true,
        }
    }
}

impl BootConfig {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Window title
    pub title: String,

    /// Font size in points
    pub font_size: f32,

    /// Initial window width
    pub width: f32,

    /// Initial window height
    pub height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "folioterm".to_string(),
            font_size: 14.0,
            width: 960.0,
            height: 640.0,
        }
    }
}
