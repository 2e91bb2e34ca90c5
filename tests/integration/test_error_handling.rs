//! Integration Tests for Error Handling
//!
//! These tests verify that every failure ends up as a visible transcript
//! line and that the session always returns to idle afterwards.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::fs;
use std::time::Duration;

use folioterm::config::{ConfigLoader, LoadOptions};
use folioterm::error::Error;
use folioterm::events::{HostSignal, KeyInput};
use folioterm::models::LineKind;

use tempfile::TempDir;
use test_utils::{quiet_config, run_command, spawn_quiet, wait_for_signal};

#[tokio::test(start_paused = true)]
async fn test_blank_submission_changes_nothing() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;
    run_command(&handle, &mut signals, "greet").await;
    let before = handle.snapshot();

    handle.type_text("   ").unwrap();
    handle.send_key(KeyInput::Submit).unwrap();
    handle.send_key(KeyInput::Escape).unwrap();
    wait_for_signal(&mut signals, |s| *s == HostSignal::ExitRequested).await;

    let after = handle.snapshot();
    assert_eq!(after.lines, before.lines);
    assert_eq!(after.input, "");
    assert!(after.is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_command() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    let snapshot = run_command(&handle, &mut signals, "foobar").await;
    assert_eq!(snapshot.lines.len(), 2);
    let line = &snapshot.lines[1];
    assert_eq!(line.kind, LineKind::Error);
    assert!(line.text.contains("foobar"));
    assert!(line.text.contains("help"));
    assert!(!snapshot.input_locked);
}

#[tokio::test(start_paused = true)]
async fn test_handler_failure_is_local() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    let snapshot = run_command(&handle, &mut signals, "fail").await;
    let line = &snapshot.lines[1];
    assert_eq!(line.kind, LineKind::Error);
    assert!(line.text.contains("fail"));
    assert!(line.text.contains("disk on fire"));
    assert!(snapshot.is_idle());

    // The next command runs normally
    let snapshot = run_command(&handle, &mut signals, "echo still here").await;
    assert_eq!(snapshot.lines[3].text, "still here");
}

#[tokio::test(start_paused = true)]
async fn test_handler_timeout() {
    let mut config = quiet_config();
    config.session.handler_timeout_ms = 100;
    let (handle, mut signals) = spawn_quiet(config).await;

    let start = tokio::time::Instant::now();
    let snapshot = run_command(&handle, &mut signals, "slow").await;
    assert!(start.elapsed() < Duration::from_secs(1));

    let line = &snapshot.lines[1];
    assert_eq!(line.kind, LineKind::Error);
    assert!(line.text.contains("timed out"));
    assert!(!snapshot.input_locked);
}

#[test]
fn test_missing_explicit_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ConfigLoader::with_path(&path)
        .load_with(LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::ConfigLoadFailed { .. }));
}

#[test]
fn test_malformed_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[session\nprompt = ").unwrap();

    let err = ConfigLoader::with_path(&path)
        .load_with(LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::ConfigParseFailed { .. }));
}

#[test]
fn test_out_of_range_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "reveal": { "delay_ms": 5000 } }"#).unwrap();

    let err = ConfigLoader::with_path(&path)
        .load_with(LoadOptions::default())
        .unwrap_err();
    match err {
        Error::ConfigValidationFailed { field, .. } => assert_eq!(field, "reveal.delay_ms"),
        other => panic!("unexpected error: {other}"),
    }

    // Skipping validation accepts the same file
    let config = ConfigLoader::with_path(&path)
        .load_with(LoadOptions {
            create_default: true,
            validate: false,
        })
        .unwrap();
    assert_eq!(config.reveal.delay_ms, 5000);
}

#[test]
fn test_invalid_registry_reaches_spawn() {
    let mut config = quiet_config();
    config.session.launch_commands = vec!["about".to_string()];

    // `about` is both a portfolio command and a launch name
    let result = tokio_test::block_on(async {
        folioterm::terminal::TerminalSession::builder()
            .config(config)
            .spawn()
            .map(|_| ())
    });
    assert!(matches!(result, Err(Error::InvalidCommandName { .. })));
}
