//! Keyword command table with prefix routing and fuzzy suggestions.
//!
//! # Responsibility
//! - Route an input line to the first registered keyword it starts with.
//! - Suggest the closest keyword when no keyword prefixes the input.
//!
//! # Invariants
//! - Registration order is the tie-break between overlapping keywords.
//! - Keywords match case-insensitively; each command decides whether its
//!   arguments are lowercased or kept as typed.
//! - Resolution is a pure function of the line and the table.

use crate::command::args::Args;
use crate::command::error_policy::{guard, Handler};
use crate::command::similarity::similarity_ratio;
use log::debug;

/// How a command receives its argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgCase {
    /// Arguments are lowercased before parsing.
    Lower,
    /// Arguments keep the casing the user typed.
    AsTyped,
}

/// One registered command.
pub struct Command<C> {
    pub keyword: &'static str,
    pub arg_case: ArgCase,
    pub handler: Handler<C>,
}

/// Outcome of resolving one input line.
pub enum Resolution<'t, C> {
    /// `command.keyword` prefixes the line; `args` is what follows it.
    Matched { command: &'t Command<C>, args: Args },
    /// No keyword prefixes the line. `suggestion` is the most similar
    /// keyword, or `None` when nothing shares a character with the input.
    Unmatched { suggestion: Option<&'static str> },
}

impl<C> Resolution<'_, C> {
    /// Keyword of the matched command, if any.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Matched { command, .. } => Some(command.keyword),
            Self::Unmatched { .. } => None,
        }
    }
}

/// What the caller should show after dispatching a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Handler ran; this is its reply (success or rendered failure).
    Reply(String),
    /// Nothing ran; the caller may offer this keyword instead.
    Suggestion(Option<&'static str>),
}

/// Ordered command table.
pub struct CommandTable<C> {
    commands: Vec<Command<C>>,
}

impl<C> Default for CommandTable<C> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<C> CommandTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command with lowercased arguments; earlier registrations
    /// win prefix ties.
    pub fn register(self, keyword: &'static str, handler: Handler<C>) -> Self {
        self.register_with(keyword, ArgCase::Lower, handler)
    }

    /// Appends a command whose arguments keep the user's casing.
    pub fn register_as_typed(self, keyword: &'static str, handler: Handler<C>) -> Self {
        self.register_with(keyword, ArgCase::AsTyped, handler)
    }

    fn register_with(
        mut self,
        keyword: &'static str,
        arg_case: ArgCase,
        handler: Handler<C>,
    ) -> Self {
        self.commands.push(Command {
            keyword,
            arg_case,
            handler,
        });
        self
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|command| command.keyword)
    }

    /// Resolves `line` against the table.
    ///
    /// Keywords are ASCII lowercase and match the line case-insensitively.
    pub fn resolve(&self, line: &str) -> Resolution<'_, C> {
        let matched = self.commands.iter().find_map(|command| {
            strip_keyword(line, command.keyword).map(|rest| (command, rest))
        });
        if let Some((command, rest)) = matched {
            let args = match command.arg_case {
                ArgCase::Lower => Args::parse(&rest.to_lowercase()),
                ArgCase::AsTyped => Args::parse(rest),
            };
            return Resolution::Matched { command, args };
        }

        let line = line.to_lowercase();
        let mut best_ratio = 0.0;
        let mut suggestion = None;
        for command in &self.commands {
            let ratio = similarity_ratio(&line, command.keyword);
            if ratio > best_ratio {
                best_ratio = ratio;
                suggestion = Some(command.keyword);
            }
        }
        Resolution::Unmatched { suggestion }
    }

    /// Resolves `line` and runs the matched handler under the error policy.
    pub fn dispatch(&self, ctx: &mut C, line: &str) -> Dispatch {
        match self.resolve(line) {
            Resolution::Matched { command, args } => {
                debug!(
                    "event=command_dispatch module=command status=matched keyword={} args={}",
                    command.keyword,
                    args.len()
                );
                Dispatch::Reply(guard(command.keyword, command.handler, ctx, &args))
            }
            Resolution::Unmatched { suggestion } => {
                debug!(
                    "event=command_dispatch module=command status=unmatched suggestion={}",
                    suggestion.unwrap_or("none")
                );
                Dispatch::Suggestion(suggestion)
            }
        }
    }
}

/// Text after `keyword` when `line` starts with it, ignoring ASCII case.
fn strip_keyword<'l>(line: &'l str, keyword: &str) -> Option<&'l str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    line.get(keyword.len()..)
}
