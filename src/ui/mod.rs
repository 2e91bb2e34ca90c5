//! UI components and rendering
//!
//! egui helpers for the desktop host: line colors, the transcript view, and
//! keyboard translation. They read [`SessionSnapshot`](crate::terminal::SessionSnapshot)s
//! and produce [`SessionEvent`](crate::events::SessionEvent)s; none of them
//! touch session state directly.

pub mod colors;
pub mod keys;
pub mod transcript;

pub use colors::UiColors;
pub use keys::{translate_event, translate_events};
pub use transcript::TranscriptView;
