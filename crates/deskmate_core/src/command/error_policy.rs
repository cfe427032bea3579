//! Uniform failure policy for command handlers.
//!
//! # Responsibility
//! - Define the single error type every handler returns.
//! - Convert any handler failure into a fixed user-facing reply.
//!
//! # Invariants
//! - No handler failure escapes `guard`; callers always receive a string.
//! - Failure logs carry the error kind only, never user-provided values.

use crate::command::args::Args;
use crate::model::field::FieldError;
use crate::repo::record_store::StoreError;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MISSING_ARGUMENT_REPLY: &str = "You didn't provide enough arguments. Type 'help' to see usage.";
pub const TOO_MANY_ARGUMENTS_REPLY: &str = "You provided too many arguments. Type 'help' to see usage.";
pub const UNKNOWN_CONTACT_REPLY: &str = "User is not in contact list";
pub const UNKNOWN_NOTE_REPLY: &str = "Note is not in the notebook";

/// Result type returned by every command handler.
pub type CommandResult = Result<String, CommandError>;

/// Handler failure, one variant per user-facing failure kind.
#[derive(Debug)]
pub enum CommandError {
    /// A required positional argument is absent.
    MissingArgument { position: usize },
    /// More positional arguments than the command accepts.
    TooManyArguments { accepted: usize, found: usize },
    /// A field constructor rejected an argument.
    InvalidValue(FieldError),
    /// A non-field argument (count, sort key) is malformed.
    InvalidArgument(String),
    UnknownContact(String),
    UnknownNote(String),
    DuplicateNote(String),
    Storage(StoreError),
}

impl CommandError {
    /// Stable kind label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => "missing_argument",
            Self::TooManyArguments { .. } => "too_many_arguments",
            Self::InvalidValue(_) => "invalid_value",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnknownContact(_) => "unknown_contact",
            Self::UnknownNote(_) => "unknown_note",
            Self::DuplicateNote(_) => "duplicate_note",
            Self::Storage(_) => "storage",
        }
    }

    /// Fixed reply shown to the user for this failure.
    pub fn reply(&self) -> String {
        match self {
            Self::MissingArgument { .. } => MISSING_ARGUMENT_REPLY.to_string(),
            Self::TooManyArguments { .. } => TOO_MANY_ARGUMENTS_REPLY.to_string(),
            Self::InvalidValue(err) => err.to_string(),
            Self::InvalidArgument(message) => message.clone(),
            Self::UnknownContact(_) => UNKNOWN_CONTACT_REPLY.to_string(),
            Self::UnknownNote(_) => UNKNOWN_NOTE_REPLY.to_string(),
            Self::DuplicateNote(name) => format!("Note '{name}' already exists"),
            Self::Storage(err) => format!("Storage error: {err}"),
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument { position } => write!(f, "missing argument #{position}"),
            Self::TooManyArguments { accepted, found } => {
                write!(f, "expected at most {accepted} arguments, found {found}")
            }
            Self::InvalidValue(err) => write!(f, "{err}"),
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::UnknownContact(name) => write!(f, "contact not found: {name}"),
            Self::UnknownNote(name) => write!(f, "note not found: {name}"),
            Self::DuplicateNote(name) => write!(f, "note already exists: {name}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for CommandError {
    fn from(value: FieldError) -> Self {
        Self::InvalidValue(value)
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Command handler signature shared by every registered command.
pub type Handler<C> = fn(&mut C, &Args) -> CommandResult;

/// Runs `handler` and folds any failure into its fixed reply.
pub fn guard<C>(keyword: &str, handler: Handler<C>, ctx: &mut C, args: &Args) -> String {
    render(keyword, handler(ctx, args))
}

/// Central formatter for handler outcomes.
pub fn render(keyword: &str, outcome: CommandResult) -> String {
    match outcome {
        Ok(reply) => reply,
        Err(err) => {
            warn!(
                "event=command_failed module=command status=error keyword={keyword} kind={}",
                err.kind()
            );
            err.reply()
        }
    }
}
