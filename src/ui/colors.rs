//! Color utilities for UI rendering
//!
//! Maps transcript line kinds to egui colors for the terminal's dark theme.

use eframe::egui;

use crate::models::LineKind;

/// Colors used by the terminal view
#[derive(Debug, Clone, PartialEq)]
pub struct UiColors {
    pub background: egui::Color32,
    pub foreground: egui::Color32,
    pub prompt: egui::Color32,
    pub cursor: egui::Color32,
    pub command: egui::Color32,
    pub output: egui::Color32,
    pub error: egui::Color32,
    pub success: egui::Color32,
    pub info: egui::Color32,
    pub warning: egui::Color32,
    pub system: egui::Color32,
}

impl UiColors {
    /// Color for a transcript line of `kind`
    pub fn for_kind(&self, kind: LineKind) -> egui::Color32 {
        match kind {
            LineKind::CommandEcho => self.command,
            LineKind::Output => self.output,
            LineKind::Error => self.error,
            LineKind::Success => self.success,
            LineKind::Info => self.info,
            LineKind::Warning => self.warning,
            LineKind::System => self.system,
        }
    }
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            background: egui::Color32::from_rgb(12, 14, 20),
            foreground: egui::Color32::from_rgb(220, 223, 228),
            prompt: egui::Color32::from_rgb(80, 250, 123),
            cursor: egui::Color32::from_rgb(80, 250, 123),
            command: egui::Color32::from_rgb(80, 250, 123),
            output: egui::Color32::from_rgb(220, 223, 228),
            error: egui::Color32::from_rgb(255, 85, 85),
            success: egui::Color32::from_rgb(0, 255, 100),
            info: egui::Color32::from_rgb(139, 233, 253),
            warning: egui::Color32::from_rgb(255, 200, 0),
            system: egui::Color32::from_rgb(98, 114, 164),
        }
    }
}
