//! Contract Tests for the Reveal Scheduler
//!
//! Contract: a reveal appends exactly one transcript entry, later steps only
//! replace that entry with longer prefixes of the same kind, the final step
//! carries the full text, and a cancelled reveal yields nothing further.

use std::time::Duration;

use folioterm::models::{Line, LineKind};
use folioterm::terminal::reveal::{increments, AnimationPolicy, RevealGranularity};
use folioterm::terminal::{RevealPlan, RevealScheduler, RevealStep, SessionState};
use tokio_util::sync::CancellationToken;

const DELAY: Duration = Duration::from_millis(20);

#[test]
fn test_plan_shape() {
    let scheduler = RevealScheduler::new(RevealGranularity::Word, DELAY);
    let line = Line::output("one two three");
    let steps: Vec<_> = scheduler.plan(&line).steps().collect();

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0], (Duration::ZERO, RevealStep::Append(Line::output("one"))));
    for (delay, step) in &steps[1..] {
        assert_eq!(*delay, DELAY);
        assert!(matches!(step, RevealStep::Replace(_)));
        assert_eq!(step.line().kind, LineKind::Output);
    }
    assert_eq!(steps.last().map(|(_, s)| s.line()), Some(&line));
}

#[test]
fn test_reveal_adds_one_entry() {
    let scheduler = RevealScheduler::new(RevealGranularity::Character, DELAY);
    let mut state = SessionState::new();
    state.append(Line::command_echo("$ about"));

    let line = Line::info("multi\nline");
    for (_, step) in scheduler.plan(&line).steps() {
        state.apply_reveal(step);
        assert_eq!(state.transcript().len(), 2);
        assert_eq!(state.transcript()[0], Line::command_echo("$ about"));
    }
    assert_eq!(state.transcript()[1], line);
}

#[test]
fn test_empty_line_is_still_appended() {
    let scheduler = RevealScheduler::default();
    let steps: Vec<_> = scheduler.plan(&Line::output("")).steps().collect();
    assert_eq!(steps, vec![(Duration::ZERO, RevealStep::Append(Line::output("")))]);
}

#[test]
fn test_animation_policy() {
    let multi = AnimationPolicy::MultiLine;
    assert!(multi.should_reveal(&Line::output("plain")));
    assert!(multi.should_reveal(&Line::info("first\nsecond")));
    assert!(!multi.should_reveal(&Line::error("Command 'x' not found")));
    assert!(!multi.should_reveal(&Line::warning("LOUD")));

    assert!(AnimationPolicy::Always.should_reveal(&Line::error("x")));
    assert!(!AnimationPolicy::Never.should_reveal(&Line::output("a\nb")));
}

#[test]
fn test_word_increments_keep_spacing() {
    assert_eq!(
        increments("ls  -la\n~", RevealGranularity::Word).collect::<Vec<_>>(),
        vec!["ls", "ls  -la", "ls  -la\n~"]
    );
}

#[test]
fn test_pasted_text_plan_grows_linearly() {
    let scheduler = RevealScheduler::default();
    let small = Line::output("paste ".repeat(1_000).trim_end());
    let large = Line::output("paste ".repeat(8_000).trim_end());

    let small_plan = scheduler.plan(&small);
    let large_plan = scheduler.plan(&large);
    assert_eq!(small_plan.len(), 1_000);
    assert_eq!(large_plan.len(), 8_000);

    let footprint = |plan: &RevealPlan| plan.line().text.len() + std::mem::size_of_val(plan.ends());
    let (small_bytes, large_bytes) = (footprint(&small_plan), footprint(&large_plan));
    assert!(
        large_bytes <= small_bytes * 9,
        "8x the text took {large_bytes} bytes against {small_bytes}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_schedule_is_paced() {
    let scheduler = RevealScheduler::new(RevealGranularity::Word, DELAY);
    let mut task = scheduler.schedule(&Line::output("a b c"), CancellationToken::new());
    let start = tokio::time::Instant::now();

    assert_eq!(task.next().await, Some(RevealStep::Append(Line::output("a"))));
    assert_eq!(start.elapsed(), Duration::ZERO);

    assert_eq!(task.next().await, Some(RevealStep::Replace(Line::output("a b"))));
    assert_eq!(start.elapsed(), DELAY);

    assert_eq!(task.next().await, Some(RevealStep::Replace(Line::output("a b c"))));
    assert_eq!(start.elapsed(), DELAY * 2);

    assert_eq!(task.next().await, None);
    assert!(task.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_schedule_stops() {
    let scheduler = RevealScheduler::new(RevealGranularity::Word, DELAY);
    let cancel = CancellationToken::new();
    let mut task = scheduler.schedule(&Line::output("a b c"), cancel.child_token());

    assert!(task.next().await.is_some());
    cancel.cancel();

    assert_eq!(task.next().await, None);
    assert!(task.is_cancelled());
}
