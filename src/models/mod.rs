//! Core data models for folioterm
//!
//! This module contains the values that flow between the dispatcher and the
//! session engine: transcript lines and control directives.

pub mod directive;
pub mod line;

// Re-exports for convenience
pub use directive::{CommandOutcome, Directive};
pub use line::{Line, LineKind};
