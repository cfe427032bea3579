//! Free-text command routing.
//!
//! # Responsibility
//! - Map one input line to a registered handler by keyword prefix.
//! - Apply one error policy to every handler so failures become replies.
//!
//! # Invariants
//! - The assistant table order is fixed: contact commands, then note commands.

pub mod args;
pub mod contact_commands;
pub mod dispatcher;
pub mod error_policy;
pub mod help;
pub mod note_commands;
pub mod similarity;

use crate::service::workspace::Workspace;
use dispatcher::CommandTable;

/// Builds the full assistant command table in routing order.
pub fn assistant_commands() -> CommandTable<Workspace> {
    note_commands::register(contact_commands::register(CommandTable::new()))
}
