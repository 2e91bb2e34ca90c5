//! Test Utilities
//!
//! Shared configurations, content providers and session helpers for the
//! integration, contract and property test targets.

#![allow(dead_code)]


pub use fixtures::{
    quiet_config, run_command, spawn_quiet, test_dispatcher, test_provider,
    wait_for_signal, SLOW_HANDLER_DELAY,
};
