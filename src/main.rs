//! folioterm - a portfolio terminal for the desktop
//!
//! Hosts a terminal session engine in an eframe window: the visitor types
//! commands at a prompt and the portfolio answers with typewriter-style output.

mod app;

use std::env;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use tracing::{debug, error, info, warn};

use folioterm::config::{Config, ConfigLoader, LoadOptions};
use folioterm::terminal::TerminalSession;

use app::FoliotermApp;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "folioterm", version, about = "A portfolio terminal with typewriter output")]
struct Args {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Initial window width
    #[arg(long)]
    width: Option<f32>,

    /// Initial window height
    #[arg(long)]
    height: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    info!("Starting {} v{}", folioterm::NAME, folioterm::VERSION);
    debug!("Debug mode enabled");

    let config = load_configuration(&args);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("folioterm-engine")
        .build()
        .context("failed to start async runtime")?;
    let _guard = runtime.enter();

    let (handle, signals) = TerminalSession::builder()
        .config(config.clone())
        .spawn()
        .context("failed to start terminal session")?;
    info!("Terminal session {} spawned", handle.id());

    let native_options = create_native_options(&args, &config);
    let runtime_handle = runtime.handle().clone();
    let title = config.ui.title.clone();

    info!("Initializing GUI...");
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(FoliotermApp::new(
                cc,
                handle,
                signals,
                &config,
                &runtime_handle,
            )))
        }),
    )
    .map_err(|e| {
        error!("Application failed: {}", e);
        anyhow::anyhow!("application failed: {e}")
    })?;

    info!("folioterm shutdown complete");
    Ok(())
}

/// Install the tracing subscriber
///
/// `--debug` or `FOLIOTERM_DEBUG=1` switches the default level to debug;
/// `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let debug_env = env::var("FOLIOTERM_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_level = if debug || debug_env { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Load configuration from file or use defaults
fn load_configuration(args: &Args) -> Config {
    info!("Loading configuration...");

    let mut loader = match &args.config {
        Some(path) => {
            debug!("Loading config from: {}", path.display());
            ConfigLoader::with_path(path)
        }
        None => ConfigLoader::new(),
    };

    match loader.load_with(LoadOptions::default()) {
        Ok(config) => {
            match loader.current_path() {
                Some(path) => info!("Configuration loaded from: {}", path.display()),
                None => debug!("Using default configuration"),
            }
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {}", e);
            info!("Falling back to default configuration");
            Config::default()
        }
    }
}

/// Create native options for the application window
fn create_native_options(args: &Args, config: &Config) -> eframe::NativeOptions {
    let width = args.width.unwrap_or(config.ui.width);
    let height = args.height.unwrap_or(config.ui.height);
    debug!("Window size: {}x{}", width, height);

    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.ui.title.clone())
            .with_app_id("folioterm")
            .with_min_inner_size([400.0, 300.0])
            .with_inner_size([width, height])
            .with_resizable(true),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    }
}
