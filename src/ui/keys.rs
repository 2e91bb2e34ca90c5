//! Keyboard translation
//!
//! Turns egui input events into session events. Text input becomes one
//! `Char` per character; named keys map onto the terminal's keyboard surface.
//! Ctrl/Cmd+R asks for a session reset.

use eframe::egui;

use crate::events::{KeyInput, SessionEvent};

/// Session events produced by one egui event
pub fn translate_event(event: &egui::Event) -> Vec<SessionEvent> {
    match event {
        egui::Event::Text(text) | egui::Event::Paste(text) => text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| SessionEvent::Key(KeyInput::Char(ch)))
            .collect(),
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => {
            if modifiers.command && *key == egui::Key::R {
                return vec![SessionEvent::Reset];
            }
            if modifiers.command || modifiers.alt {
                return Vec::new();
            }
            named_key(*key)
                .map(|k| vec![SessionEvent::Key(k)])
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

/// Translate every event of a frame, in order
pub fn translate_events<'a>(
    events: impl IntoIterator<Item = &'a egui::Event>,
) -> Vec<SessionEvent> {
    events.into_iter().flat_map(translate_event).collect()
}

fn named_key(key: egui::Key) -> Option<KeyInput> {
    let input = match key {
        egui::Key::Enter => KeyInput::Submit,
        egui::Key::Escape => KeyInput::Escape,
        egui::Key::Backspace => KeyInput::Backspace,
        egui::Key::Delete => KeyInput::Delete,
        egui::Key::ArrowLeft => KeyInput::Left,
        egui::Key::ArrowRight => KeyInput::Right,
        egui::Key::Home => KeyInput::Home,
        egui::Key::End => KeyInput::End,
        egui::Key::Tab => KeyInput::Tab,
        egui::Key::ArrowUp => KeyInput::Previous,
        egui::Key::ArrowDown => KeyInput::Next,
        _ => return None,
    };
    Some(input)
}
