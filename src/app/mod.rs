//! Desktop host for the terminal session
//!
//! `FoliotermApp` implements `eframe::App`. It never mutates session state:
//! each frame it forwards translated key events to the engine, drains host
//! signals, and draws the latest snapshot.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Central Panel                           │
//! │ - transcript, one label per line        │
//! │ - prompt + input (hidden while locked)  │
//! │                                         │
//! │        ┌──────────────────────┐         │
//! │        │ activity overlay     │         │
//! │        └──────────────────────┘         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Repaints are driven by a watcher task on the tokio runtime that wakes egui
//! whenever a new snapshot is published.

use std::time::Duration;

use eframe::egui;
use tracing::{debug, info, warn};

use folioterm::config::Config;
use folioterm::events::{HostSignal, HostSignals, KeyInput, SessionEvent};
use folioterm::terminal::SessionHandle;
use folioterm::ui::{translate_events, TranscriptView, UiColors};

/// Idle polling interval for host signals
const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// The eframe application
pub struct FoliotermApp {
    handle: SessionHandle,
    signals: HostSignals,
    view: TranscriptView,
    prompt: String,
    /// Name of the activity shown in the overlay, if any
    activity: Option<String>,
}

impl FoliotermApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        handle: SessionHandle,
        signals: HostSignals,
        config: &Config,
        runtime: &tokio::runtime::Handle,
    ) -> Self {
        let colors = UiColors::default();
        setup_visual_style(&cc.egui_ctx, &colors);

        let ctx = cc.egui_ctx.clone();
        let mut snapshots = handle.subscribe();
        runtime.spawn(async move {
            while snapshots.changed().await.is_ok() {
                ctx.request_repaint();
            }
            debug!("Snapshot watcher stopped");
        });

        Self::with_session(handle, signals, config, colors)
    }

    fn with_session(
        handle: SessionHandle,
        signals: HostSignals,
        config: &Config,
        colors: UiColors,
    ) -> Self {
        Self {
            handle,
            signals,
            view: TranscriptView::new(config.ui.font_size, colors),
            prompt: config.session.render_prompt(),
            activity: None,
        }
    }

    /// The overlay owns the keyboard; only escape and reset reach the engine
    fn reaches_engine(&self, event: &SessionEvent) -> bool {
        self.activity.is_none()
            || matches!(event, SessionEvent::Key(KeyInput::Escape) | SessionEvent::Reset)
    }

    fn forward_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| translate_events(&i.events));
        for event in events {
            if !self.reaches_engine(&event) {
                continue;
            }
            if let Err(e) = self.handle.send(event) {
                warn!("Dropping key event: {}", e);
                break;
            }
        }
    }

    fn process_signals(&mut self, ctx: &egui::Context) {
        for signal in self.signals.drain() {
            self.handle_signal(ctx, signal);
        }
    }

    fn handle_signal(&mut self, ctx: &egui::Context, signal: HostSignal) {
        match signal {
            HostSignal::CommandCompleted { input } => {
                debug!("Command completed: {}", input);
            }
            HostSignal::LaunchActivity { name } => {
                info!("Opening activity overlay for '{}'", name);
                self.activity = Some(name);
            }
            HostSignal::ExitRequested => match self.activity.take() {
                Some(name) => debug!("Closed activity overlay for '{}'", name),
                None => {
                    info!("Exit requested, closing window");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            },
        }
    }

    fn render_activity_overlay(&mut self, ctx: &egui::Context) {
        let Some(name) = self.activity.clone() else {
            return;
        };
        let colors = self.view.colors().clone();

        egui::Window::new(name.as_str())
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.label(
                    egui::RichText::new(format!("'{name}' is not bundled with this build."))
                        .monospace()
                        .color(colors.warning),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Press Esc to return to the terminal.")
                        .monospace()
                        .color(colors.system),
                );
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    self.activity = None;
                }
            });
    }
}

impl eframe::App for FoliotermApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();
        self.forward_input(&ctx);
        self.process_signals(&ctx);

        let snapshot = self.handle.snapshot();
        let background = self.view.colors().background;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(background)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show_inside(ui, |ui| {
                self.view.show(ui, &snapshot, &self.prompt);
            });

        self.render_activity_overlay(&ctx);

        // Host signals arrive off-frame; poll for them while idle
        ctx.request_repaint_after(IDLE_REPAINT);
    }
}

fn setup_visual_style(ctx: &egui::Context, colors: &UiColors) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = colors.background;
    visuals.window_fill = egui::Color32::from_rgb(24, 27, 36);
    ctx.set_visuals(visuals);
}
