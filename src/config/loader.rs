//! Configuration File Loading
//!
//! Handles loading and saving configuration files from the usual locations,
//! in TOML or JSON, with validation after every load.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::Config;
use crate::error::{Error, Result};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "FOLIOTERM_CONFIG";

/// Upper bound for the reveal delay
pub const MAX_REVEAL_DELAY_MS: u64 = 1_000;

/// Upper bound for the banner cadence
pub const MAX_BOOT_CADENCE_MS: u64 = 10_000;

/// Configuration file loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit file; when set, no other location is searched
    explicit_path: Option<PathBuf>,
    /// Extension-less base paths, tried with each supported format
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
    /// File the last successful load came from
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Fall back to defaults when no file is found
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Loader over the default search paths
    ///
    /// An explicit file named by `FOLIOTERM_CONFIG` takes precedence.
    pub fn new() -> Self {
        Self {
            explicit_path: env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Loader reading exactly one file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit_path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::new().load_with(LoadOptions::default())
    }

    /// Load from this loader's locations
    pub fn load_with(&mut self, options: LoadOptions) -> Result<Config> {
        let found = match &self.explicit_path {
            Some(path) => {
                let path = path.clone();
                if !path.exists() {
                    return Err(Error::ConfigLoadFailed {
                        path,
                        reason: "file does not exist".to_string(),
                    });
                }
                Some((path.clone(), self.load_file(&path)?))
            }
            None => self.find_and_load_config(),
        };

        let config = match found {
            Some((path, config)) => {
                info!("Loaded configuration from {}", path.display());
                self.current_path = Some(path);
                config
            }
            None if options.create_default => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
            None => return Err(Error::ConfigNotFound),
        };

        if options.validate {
            validate_config(&config)?;
        }
        Ok(config)
    }

    /// Read one file; the format follows its extension (TOML otherwise)
    pub fn load_file(&self, path: &Path) -> Result<Config> {
        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Toml);
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        parse_config(&content, format)
    }

    /// Save configuration to the current path or default location
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::get_default_config_path);
        self.save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Toml);
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                }
            })?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSerializationFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        fs::write(path, content)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for base in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = base.with_extension(format.extension());
                if !config_path.exists() {
                    continue;
                }
                match self.load_file(&config_path) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => {
                        // Keep searching; a broken file should not hide a good one
                        warn!("Failed to load config from {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        None
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("folioterm").join("config"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".folioterm").join("config"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".folioterm").join("config"));
        }

        paths
    }

    /// Get the default configuration path
    fn get_default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folioterm")
            .join("config.toml")
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.explicit_path = None;
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse configuration text in the given format
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config> {
    match format {
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason: e.to_string(),
        }),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let invalid = |field: &str, reason: &str| Error::ConfigValidationFailed {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    // Session validation
    if config.session.prompt.trim().is_empty() {
        return Err(invalid("session.prompt", "Prompt cannot be empty"));
    }

    if config.session.handler_timeout_ms == 0 {
        return Err(invalid(
            "session.handler_timeout_ms",
            "Handler timeout must be greater than 0",
        ));
    }

    if config
        .session
        .launch_commands
        .iter()
        .any(|name| name.trim().is_empty() || name.contains(char::is_whitespace))
    {
        return Err(invalid(
            "session.launch_commands",
            "Launch command names must be single non-blank words",
        ));
    }

    if !config.session.launch_commands.is_empty() && config.session.activity.trim().is_empty() {
        return Err(invalid(
            "session.activity",
            "Activity name cannot be empty while launch commands are configured",
        ));
    }

    // Reveal validation
    if config.reveal.delay_ms > MAX_REVEAL_DELAY_MS {
        return Err(invalid(
            "reveal.delay_ms",
            "Reveal delay cannot exceed 1000 ms",
        ));
    }

    // Boot validation
    if config.boot.cadence_ms > MAX_BOOT_CADENCE_MS {
        return Err(invalid(
            "boot.cadence_ms",
            "Banner cadence cannot exceed 10000 ms",
        ));
    }

    // UI validation
    if !(6.0..=72.0).contains(&config.ui.font_size) {
        return Err(invalid(
            "ui.font_size",
            "Font size must be between 6 and 72",
        ));
    }

    if config.ui.width <= 0.0 || config.ui.height <= 0.0 {
        return Err(invalid("ui.width", "Window size must be positive"));
    }

    Ok(())
}
