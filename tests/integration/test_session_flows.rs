//! Integration Tests for Session Flows
//!
//! These tests drive a running engine through its handle the way the desktop
//! host does: keys in, snapshots and signals out. Time is paused so reveal and
//! banner pacing run on the virtual clock.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::time::Duration;

use folioterm::config::Config;
use folioterm::content::Portfolio;
use folioterm::events::{HostSignal, KeyInput};
use folioterm::models::{Line, LineKind};
use folioterm::terminal::{RevealGranularity, SessionPhase, TerminalSession};

use test_utils::{quiet_config, run_command, spawn_quiet, wait_for_signal};

#[tokio::test(start_paused = true)]
async fn test_about_after_banner() {
    let (handle, mut signals) = TerminalSession::builder().spawn().unwrap();
    assert!(handle.snapshot().input_locked, "banner should lock input");

    let ready = handle.wait_until_idle().await.unwrap();
    let banner_len = ready.lines.len();
    assert!(banner_len > 0);

    let snapshot = run_command(&handle, &mut signals, "about").await;
    assert_eq!(snapshot.lines.len(), banner_len + 2);
    assert_eq!(
        snapshot.lines[banner_len],
        Line::command_echo("visitor@portfolio:~$ about")
    );

    let output = &snapshot.lines[banner_len + 1];
    assert_eq!(output.kind, LineKind::Output);
    assert!(output.text.contains(&Portfolio::default().personal.bio));
    assert!(!snapshot.input_locked);
}

#[tokio::test(start_paused = true)]
async fn test_banner_follows_cadence() {
    let config = Config::default();
    let (handle, _signals) = TerminalSession::builder().config(config.clone()).spawn().unwrap();

    tokio::time::sleep(config.boot.cadence() + Duration::from_millis(10)).await;
    let early = handle.snapshot();
    assert_eq!(early.lines.len(), 1);
    assert_eq!(early.phase, SessionPhase::Booting);

    let ready = handle.wait_until_idle().await.unwrap();
    assert!(ready.lines.len() > 1);
}

#[tokio::test(start_paused = true)]
async fn test_clear_empties_transcript() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    run_command(&handle, &mut signals, "greet").await;
    run_command(&handle, &mut signals, "shout").await;
    assert_eq!(handle.snapshot().lines.len(), 4);

    let snapshot = run_command(&handle, &mut signals, "clear").await;
    assert!(snapshot.lines.is_empty());

    run_command(&handle, &mut signals, "greet").await;
    let snapshot = run_command(&handle, &mut signals, "CLS").await;
    assert!(snapshot.lines.is_empty());
    assert!(snapshot.is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_provider_directive_clears() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    run_command(&handle, &mut signals, "greet").await;
    let snapshot = run_command(&handle, &mut signals, "wipe").await;
    assert!(snapshot.lines.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_sentinel_text_is_displayed() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    let snapshot = run_command(&handle, &mut signals, "sentinel").await;
    assert_eq!(snapshot.lines.len(), 2);
    assert_eq!(snapshot.lines[1], Line::output("CLEAR_SCREEN"));
}

#[tokio::test(start_paused = true)]
async fn test_history_navigation() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    for command in ["echo a", "echo b", "echo c"] {
        run_command(&handle, &mut signals, command).await;
    }

    handle.send_key(KeyInput::Previous).unwrap();
    handle.wait_for(|s| s.input == "echo c").await.unwrap();
    handle.send_key(KeyInput::Previous).unwrap();
    handle.wait_for(|s| s.input == "echo b").await.unwrap();
    handle.send_key(KeyInput::Previous).unwrap();
    handle.wait_for(|s| s.input == "echo a").await.unwrap();

    // Clamped at the oldest entry
    handle.send_key(KeyInput::Previous).unwrap();
    handle.send_key(KeyInput::Next).unwrap();
    let snapshot = handle.wait_for(|s| s.input == "echo b").await.unwrap();
    assert_eq!(snapshot.cursor, "echo b".len());
}

#[tokio::test(start_paused = true)]
async fn test_history_recall_runs_again() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    run_command(&handle, &mut signals, "echo again").await;
    handle.send_key(KeyInput::Previous).unwrap();
    handle.send_key(KeyInput::Submit).unwrap();
    wait_for_signal(&mut signals, |s| {
        matches!(s, HostSignal::CommandCompleted { input } if input == "echo again")
    })
    .await;

    let snapshot = handle.snapshot();
    let echoes = snapshot
        .lines
        .iter()
        .filter(|l| l.kind == LineKind::CommandEcho)
        .count();
    assert_eq!(echoes, 2);
}

#[tokio::test(start_paused = true)]
async fn test_reveal_passes_through_each_word() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    let mut rx = handle.subscribe();
    rx.borrow_and_update();
    handle.enter("greet").unwrap();

    let mut seen: Vec<String> = Vec::new();
    loop {
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        if let Some(line) = snapshot.lines.get(1) {
            if seen.last() != Some(&line.text) {
                seen.push(line.text.clone());
            }
            if line.text != "hello world" {
                assert!(snapshot.input_locked, "partial text shown while unlocked");
            }
        }
        if snapshot.is_idle() && !snapshot.lines.is_empty() {
            break;
        }
    }

    assert_eq!(seen, vec!["hello", "hello world"]);
    assert_eq!(
        signals.recv().await,
        Some(HostSignal::CommandCompleted {
            input: "greet".into()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_character_reveal() {
    let mut config = quiet_config();
    config.reveal.granularity = RevealGranularity::Character;
    let (handle, _signals) = spawn_quiet(config).await;

    let mut rx = handle.subscribe();
    rx.borrow_and_update();
    handle.enter("echo hey").unwrap();

    let mut seen: Vec<String> = Vec::new();
    loop {
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        if let Some(line) = snapshot.lines.get(1) {
            if seen.last() != Some(&line.text) {
                seen.push(line.text.clone());
            }
        }
        if snapshot.is_idle() && !snapshot.lines.is_empty() {
            break;
        }
    }

    assert_eq!(seen, vec!["h", "he", "hey"]);
}

#[tokio::test(start_paused = true)]
async fn test_single_line_warning_is_not_revealed() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    let snapshot = run_command(&handle, &mut signals, "shout").await;
    assert_eq!(snapshot.lines[1], Line::warning("LOUD"));
}

#[tokio::test(start_paused = true)]
async fn test_submit_while_locked_is_noop() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    handle.enter("slow").unwrap();
    let locked = handle
        .wait_for(|s| s.phase == SessionPhase::Dispatching)
        .await
        .unwrap();
    assert!(locked.input_locked);

    handle.type_text("about").unwrap();
    handle.send_key(KeyInput::Submit).unwrap();
    handle.send_key(KeyInput::Escape).unwrap();
    wait_for_signal(&mut signals, |s| *s == HostSignal::ExitRequested).await;

    let during = handle.snapshot();
    assert_eq!(during.lines, locked.lines);
    assert_eq!(during.input, "");

    // The slow handler trips the default timeout
    let completed =
        wait_for_signal(&mut signals, |s| matches!(s, HostSignal::CommandCompleted { .. })).await;
    assert_eq!(
        completed,
        HostSignal::CommandCompleted {
            input: "slow".into()
        }
    );
    let after = handle.snapshot();
    assert_eq!(after.lines.len(), 2);
    assert_eq!(after.lines[1].kind, LineKind::Error);
    assert!(after.lines[1].text.contains("timed out"));
    assert!(!after.input_locked);
}

#[tokio::test(start_paused = true)]
async fn test_launch_activity() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    handle.enter("GAME").unwrap();
    assert_eq!(
        signals.recv().await,
        Some(HostSignal::LaunchActivity {
            name: "snake".into()
        })
    );
    assert_eq!(
        signals.recv().await,
        Some(HostSignal::CommandCompleted {
            input: "GAME".into()
        })
    );

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.lines, vec![Line::command_echo("visitor@portfolio:~$ GAME")]);
}

#[tokio::test(start_paused = true)]
async fn test_launch_disabled_falls_through() {
    let mut config = quiet_config();
    config.session.launch_commands.clear();
    let (handle, mut signals) = spawn_quiet(config).await;

    let snapshot = run_command(&handle, &mut signals, "snake").await;
    assert_eq!(snapshot.lines[1].kind, LineKind::Error);
    assert!(snapshot.lines[1].text.contains("snake"));
}

#[tokio::test(start_paused = true)]
async fn test_reset_replays_banner() {
    let (handle, mut signals) = TerminalSession::builder().spawn().unwrap();
    let ready = handle.wait_until_idle().await.unwrap();

    run_command(&handle, &mut signals, "whoami").await;
    handle.reset().unwrap();

    let replayed = handle.wait_for(|s| *s == ready).await.unwrap();
    assert_eq!(replayed.lines, ready.lines);

    // History was forgotten along with the transcript
    handle.send_key(KeyInput::Previous).unwrap();
    handle.type_text("z").unwrap();
    let snapshot = handle.wait_for(|s| !s.input.is_empty()).await.unwrap();
    assert_eq!(snapshot.input, "z");
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_reveal() {
    let mut config = quiet_config();
    config.reveal.delay_ms = 500;
    let (handle, mut signals) = spawn_quiet(config).await;

    handle.enter("echo one two three four five").unwrap();
    handle
        .wait_for(|s| s.phase == SessionPhase::Revealing && s.lines.len() == 2)
        .await
        .unwrap();

    handle.reset().unwrap();
    handle
        .wait_for(|s| s.is_idle() && s.lines.is_empty())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    let snapshot = handle.snapshot();
    assert!(snapshot.lines.is_empty());
    assert_eq!(signals.try_recv(), None);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_handler() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;

    handle.enter("slow").unwrap();
    handle
        .wait_for(|s| s.phase == SessionPhase::Dispatching)
        .await
        .unwrap();
    drop(handle);

    assert_eq!(signals.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_engine() {
    let (handle, mut signals) = spawn_quiet(quiet_config()).await;
    let rx = handle.subscribe();

    handle.shutdown().await.unwrap();
    assert_eq!(signals.recv().await, None);
    assert!(rx.has_changed().is_err());
}
