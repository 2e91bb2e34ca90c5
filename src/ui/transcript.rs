//! Transcript view
//!
//! Draws a [`SessionSnapshot`]: every line in its kind's color, followed by
//! the prompt and input buffer. The input row is hidden while input is
//! locked.

use eframe::egui;

use super::colors::UiColors;
use crate::models::Line;
use crate::terminal::SessionSnapshot;

/// Rendering settings for the terminal view
#[derive(Debug, Clone)]
pub struct TranscriptView {
    font_size: f32,
    colors: UiColors,
}

impl TranscriptView {
    pub fn new(font_size: f32, colors: UiColors) -> Self {
        Self { font_size, colors }
    }

    pub fn colors(&self) -> &UiColors {
        &self.colors
    }

    fn font(&self) -> egui::FontId {
        egui::FontId::monospace(self.font_size)
    }

    /// Styled text for one transcript line
    pub fn line_text(&self, line: &Line) -> egui::RichText {
        // Empty lines still take up a row
        let text = if line.text.is_empty() { " " } else { &line.text };
        egui::RichText::new(text)
            .font(self.font())
            .color(self.colors.for_kind(line.kind))
    }

    /// Draw the transcript and, when unlocked, the input row
    pub fn show(&self, ui: &mut egui::Ui, snapshot: &SessionSnapshot, prompt: &str) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                for line in &snapshot.lines {
                    ui.label(self.line_text(line));
                }
                if !snapshot.input_locked {
                    self.show_input(ui, snapshot, prompt);
                }
            });
    }

    fn show_input(&self, ui: &mut egui::Ui, snapshot: &SessionSnapshot, prompt: &str) {
        let (before, after) = split_at_cursor(&snapshot.input, snapshot.cursor);
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(
                egui::RichText::new(format!("{prompt} "))
                    .font(self.font())
                    .color(self.colors.prompt),
            );
            ui.label(
                egui::RichText::new(before)
                    .font(self.font())
                    .color(self.colors.foreground),
            );
            ui.label(
                egui::RichText::new("▏")
                    .font(self.font())
                    .color(self.colors.cursor),
            );
            ui.label(
                egui::RichText::new(after)
                    .font(self.font())
                    .color(self.colors.foreground),
            );
        });
    }
}

impl Default for TranscriptView {
    fn default() -> Self {
        Self::new(14.0, UiColors::default())
    }
}

/// Split `text` at a char-based cursor position
pub fn split_at_cursor(text: &str, cursor: usize) -> (&str, &str) {
    let at = text
        .char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(at)
}
