//! Assistant session: line handling and the exit protocol.
//!
//! # Responsibility
//! - Trim input lines and detect termination keywords.
//! - Dispatch everything else through the assistant command table.
//! - Apply the yes/no save answer when the session closes.
//!
//! # Invariants
//! - Termination keywords never reach the command table.
//! - Domain failures come back as replies; only the exit keywords end a session.

use crate::command::assistant_commands;
use crate::command::dispatcher::{CommandTable, Dispatch};
use crate::config::AssistantConfig;
use crate::repo::record_store::StoreResult;
use crate::service::workspace::Workspace;
use log::info;
use std::fmt::{Display, Formatter};

/// Exact (lowercased, trimmed) lines that end the session.
pub const TERMINATION_KEYWORDS: &[&str] = &[".", "close", "bye", "good bye", "exit"];

pub const SAVE_PROMPT: &str = "Do you want to save changes? 'y/n'";
pub const INVALID_ANSWER_REPLY: &str = "Incorrect input! Try again please.";
pub const FAREWELL: &str = "Goodbye and good luck";

/// Whether `line` is a termination keyword.
pub fn is_termination(line: &str) -> bool {
    let normalized = line.trim().to_lowercase();
    TERMINATION_KEYWORDS.contains(&normalized.as_str())
}

/// Answer to the save confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAnswer {
    Save,
    Discard,
}

impl SaveAnswer {
    /// Parses `y`/`n`. Anything else is `None` and must be re-prompted.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "y" => Some(Self::Save),
            "n" => Some(Self::Discard),
            _ => None,
        }
    }
}

/// What the caller should do with one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the handler reply.
    Output(String),
    /// No command matched; offer this keyword.
    Suggestion(&'static str),
    /// No command matched and nothing is similar enough to suggest.
    Unknown,
    /// Start the save confirmation and end the session.
    Exit,
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Output(text) => f.write_str(text),
            Self::Suggestion(keyword) => write!(f, "Maybe you meant '{keyword}'?"),
            Self::Unknown => write!(f, "Unknown command. Type 'help' to see available commands."),
            Self::Exit => f.write_str(SAVE_PROMPT),
        }
    }
}

/// One interactive session over a workspace.
pub struct Assistant {
    workspace: Workspace,
    commands: CommandTable<Workspace>,
}

impl Assistant {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            commands: assistant_commands(),
        }
    }

    /// Loads the snapshots named by `config`.
    pub fn open(config: &AssistantConfig) -> StoreResult<Self> {
        Ok(Self::new(Workspace::open(config.snapshot_paths())?))
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Handles one raw input line.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if is_termination(line) {
            return Reply::Exit;
        }
        match self.commands.dispatch(&mut self.workspace, line) {
            Dispatch::Reply(text) => Reply::Output(text),
            Dispatch::Suggestion(Some(keyword)) => Reply::Suggestion(keyword),
            Dispatch::Suggestion(None) => Reply::Unknown,
        }
    }

    /// Applies the save answer and returns the closing message.
    ///
    /// # Errors
    /// - Propagates snapshot write failures so the caller can report them.
    pub fn close(&self, answer: SaveAnswer) -> StoreResult<String> {
        match answer {
            SaveAnswer::Save => {
                self.workspace.save()?;
                info!("event=session_close module=session status=ok saved=true");
                Ok(format!("Your data was saved\n{FAREWELL}"))
            }
            SaveAnswer::Discard => {
                info!("event=session_close module=session status=ok saved=false");
                Ok(FAREWELL.to_string())
            }
        }
    }
}
