//! Contract Tests for Command Dispatch
//!
//! Contract: `CommandDispatcher::dispatch` never fails. Every input resolves
//! to exactly one line or one directive, names resolve case-insensitively
//! through their aliases, and reserved commands win over the provider.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;

use folioterm::commands::{parse_input, CommandDispatcher, ReservedCommands};
use folioterm::content::{
    CommandRegistration, CommandRegistry, ContentProvider, Portfolio, StaticHandler,
};
use folioterm::error::Error;
use folioterm::models::{CommandOutcome, Directive, Line, LineKind};

use test_utils::test_dispatcher;

fn portfolio_dispatcher() -> CommandDispatcher {
    let reserved = ReservedCommands::default();
    let registry = Portfolio::default()
        .registry(reserved.summaries())
        .expect("built-in portfolio registry is valid");
    CommandDispatcher::new(Arc::new(registry), reserved)
}

fn expect_line(outcome: CommandOutcome) -> Line {
    match outcome {
        CommandOutcome::Line(line) => line,
        CommandOutcome::Directive(d) => panic!("expected a line, got {d:?}"),
    }
}

#[tokio::test]
async fn test_blank_input_is_an_error_line() {
    let dispatcher = portfolio_dispatcher();
    for raw in ["", " ", "\t", "  \n  "] {
        let line = expect_line(dispatcher.dispatch(raw).await);
        assert_eq!(line.kind, LineKind::Error, "input {raw:?}");
        assert_eq!(line.text, Error::EmptyCommand.to_string());
    }
}

#[tokio::test]
async fn test_aliases_resolve_to_same_handler() {
    let dispatcher = portfolio_dispatcher();

    let help = dispatcher.dispatch("help").await;
    for alias in ["HELP", "h", "H", "?", "  Help  "] {
        assert_eq!(dispatcher.dispatch(alias).await, help, "alias {alias:?}");
    }

    let chat = dispatcher.dispatch("chat").await;
    assert_eq!(dispatcher.dispatch("ai").await, chat);
    assert_eq!(dispatcher.dispatch("AI").await, chat);
}

#[tokio::test]
async fn test_help_lists_every_command() {
    let dispatcher = portfolio_dispatcher();

    let line = expect_line(dispatcher.dispatch("help").await);
    assert_eq!(line.kind, LineKind::Info);
    for name in dispatcher.command_names() {
        if name != "help" {
            assert!(line.text.contains(&name), "help is missing '{name}'");
        }
    }
    assert!(line.text.contains("cls"));
}

#[tokio::test]
async fn test_help_for_custom_provider() {
    let dispatcher = test_dispatcher();

    let line = expect_line(dispatcher.dispatch("help").await);
    for name in ["greet", "hi", "shout", "fail", "slow", "clear", "snake"] {
        assert!(line.text.contains(name), "help is missing '{name}'");
    }
}

#[tokio::test]
async fn test_unknown_command_mentions_token_and_help() {
    let dispatcher = portfolio_dispatcher();

    let line = expect_line(dispatcher.dispatch("foobar --now").await);
    assert_eq!(line.kind, LineKind::Error);
    assert!(line.text.contains("foobar"));
    assert!(line.text.contains("help"));
}

#[tokio::test]
async fn test_reserved_commands_are_directives() {
    let dispatcher = portfolio_dispatcher();

    assert_eq!(
        dispatcher.dispatch("clear").await,
        CommandOutcome::Directive(Directive::ClearTranscript)
    );
    assert_eq!(
        dispatcher.dispatch("CLS extra args").await,
        CommandOutcome::Directive(Directive::ClearTranscript)
    );
    assert_eq!(
        dispatcher.dispatch("snake").await,
        CommandOutcome::Directive(Directive::LaunchActivity("snake".into()))
    );
    assert_eq!(
        dispatcher.dispatch("game").await,
        CommandOutcome::Directive(Directive::LaunchActivity("snake".into()))
    );
}

#[tokio::test]
async fn test_control_words_stay_text() {
    let dispatcher = test_dispatcher();

    let line = expect_line(dispatcher.dispatch("sentinel").await);
    assert_eq!(line, Line::output("CLEAR_SCREEN"));
}

#[tokio::test]
async fn test_arguments_are_passed_through() {
    let dispatcher = portfolio_dispatcher();

    let line = expect_line(dispatcher.dispatch("ECHO Hello   World").await);
    assert_eq!(line, Line::output("Hello World"));
}

#[tokio::test]
async fn test_portfolio_commands_produce_output() {
    let dispatcher = portfolio_dispatcher();
    let portfolio = Portfolio::default();

    let about = expect_line(dispatcher.dispatch("about").await);
    assert_eq!(about.kind, LineKind::Output);
    assert!(about.text.contains(&portfolio.personal.name));

    for command in ["skills", "projects", "resume", "contact", "whoami", "ls", "date", "theme"] {
        let line = expect_line(dispatcher.dispatch(command).await);
        assert_ne!(line.kind, LineKind::Error, "'{command}' failed: {}", line.text);
        assert!(!line.text.is_empty(), "'{command}' printed nothing");
    }
}

#[test]
fn test_parse_input_contract() {
    let parsed = parse_input("  ProJects  --all  ").unwrap();
    assert_eq!(parsed.name, "projects");
    assert_eq!(parsed.args, vec!["--all".to_string()]);

    assert!(matches!(parse_input("   "), Err(Error::EmptyCommand)));
}

#[test]
fn test_registry_rejects_shadowing_reserved_names() {
    let reserved = ReservedCommands::default();
    let mut builder = CommandRegistry::builder().register(CommandRegistration::new(
        "clear",
        "Pretend to clear",
        StaticHandler::new("nope"),
    ));
    for summary in reserved.summaries() {
        builder = builder.reserve(summary);
    }

    assert!(matches!(
        builder.build(),
        Err(Error::InvalidCommandName { .. })
    ));
}

#[test]
fn test_registry_lookup_is_case_insensitive() {
    let registry = CommandRegistry::builder()
        .register(CommandRegistration::new("Alpha", "First", StaticHandler::new("a")))
        .build()
        .unwrap();

    assert!(registry.lookup("alpha").is_some());
    assert!(registry.lookup("ALPHA").is_some());
    assert!(registry.lookup("beta").is_none());
}
