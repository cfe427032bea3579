use deskmate_core::command::args::Args;
use deskmate_core::command::assistant_commands;
use deskmate_core::command::error_policy::MISSING_ARGUMENT_REPLY;
use deskmate_core::{CommandError, CommandResult, CommandTable, Dispatch, Resolution};

fn echo(calls: &mut Vec<String>, args: &Args) -> CommandResult {
    calls.push(args.rest_from(0));
    Ok(format!("echo {}", args.len()))
}

fn needs_name(_calls: &mut Vec<String>, args: &Args) -> CommandResult {
    let name = args.required(0)?;
    Ok(format!("hi {name}"))
}

fn fails(_calls: &mut Vec<String>, _args: &Args) -> CommandResult {
    Err(CommandError::UnknownContact("ghost".to_string()))
}

fn args_of<C>(resolution: &Resolution<'_, C>) -> Vec<String> {
    match resolution {
        Resolution::Matched { args, .. } => args.tokens().to_vec(),
        Resolution::Unmatched { .. } => panic!("expected a match"),
    }
}

#[test]
fn earlier_registration_wins_overlapping_prefixes() {
    let table = CommandTable::new()
        .register("show", echo)
        .register("show all", echo);

    let resolution = table.resolve("show all");
    assert_eq!(resolution.keyword(), Some("show"));
    assert_eq!(args_of(&resolution), vec!["all".to_string()]);
}

#[test]
fn assistant_table_routes_longer_keywords_first() {
    let table = assistant_commands();

    assert_eq!(table.resolve("show all").keyword(), Some("show all"));
    assert_eq!(table.resolve("show list 3").keyword(), Some("show list"));
    assert_eq!(table.resolve("show ann").keyword(), Some("show"));
    assert_eq!(table.resolve("note show all").keyword(), Some("note show all"));
    assert_eq!(table.resolve("note show plans").keyword(), Some("note show"));
    assert_eq!(table.resolve("note tag add x y").keyword(), Some("note tag add"));
}

#[test]
fn keyword_match_is_a_plain_prefix_match() {
    let table = assistant_commands();

    let resolution = table.resolve("add contactfoo");
    assert_eq!(resolution.keyword(), Some("add contact"));
    assert_eq!(args_of(&resolution), vec!["foo".to_string()]);
}

#[test]
fn assistant_table_keeps_routing_order() {
    let keywords: Vec<&str> = assistant_commands().keywords().collect();
    assert_eq!(
        &keywords[..14],
        [
            "show list",
            "delete phone",
            "when birthday",
            "add birthday",
            "add contact",
            "hello",
            "show all",
            "change",
            "show",
            "help",
            "delete contact",
            "search",
            "add email",
            "save",
        ]
    );
    assert!(keywords[14..].iter().all(|keyword| keyword.starts_with("note ")));
}

#[test]
fn unmatched_line_suggests_the_most_similar_keyword() {
    let table = assistant_commands();

    for _ in 0..3 {
        match table.resolve("ad contct") {
            Resolution::Unmatched { suggestion } => assert_eq!(suggestion, Some("add contact")),
            Resolution::Matched { .. } => panic!("typo must not match"),
        }
    }
}

#[test]
fn empty_line_has_no_suggestion() {
    let table = assistant_commands();
    assert!(matches!(
        table.resolve(""),
        Resolution::Unmatched { suggestion: None }
    ));
}

#[test]
fn dispatch_runs_handler_and_folds_errors_into_replies() {
    let table = CommandTable::new()
        .register("echo", echo)
        .register("greet", needs_name)
        .register("fail", fails);
    let mut calls = Vec::new();

    assert_eq!(
        table.dispatch(&mut calls, "echo a b"),
        Dispatch::Reply("echo 2".to_string())
    );
    assert_eq!(calls, vec!["a b".to_string()]);

    assert_eq!(
        table.dispatch(&mut calls, "greet"),
        Dispatch::Reply(MISSING_ARGUMENT_REPLY.to_string())
    );
    assert_eq!(
        table.dispatch(&mut calls, "fail"),
        Dispatch::Reply("User is not in contact list".to_string())
    );
    assert_eq!(
        table.dispatch(&mut calls, "grete bob"),
        Dispatch::Suggestion(Some("greet"))
    );
    assert_eq!(calls.len(), 1, "unmatched lines must not run a handler");
}

#[test]
fn keywords_ignore_case_and_argument_case_follows_registration() {
    let table = CommandTable::new()
        .register("lower", echo)
        .register_as_typed("typed", echo);

    let lowered = table.resolve("LOWER Ann NYC");
    assert_eq!(lowered.keyword(), Some("lower"));
    assert_eq!(args_of(&lowered), vec!["ann".to_string(), "nyc".to_string()]);

    let typed = table.resolve("Typed Ann NYC");
    assert_eq!(typed.keyword(), Some("typed"));
    assert_eq!(args_of(&typed), vec!["Ann".to_string(), "NYC".to_string()]);

    match table.resolve("TYPD") {
        Resolution::Unmatched { suggestion } => assert_eq!(suggestion, Some("typed")),
        Resolution::Matched { .. } => panic!("typo must not match"),
    }
}
