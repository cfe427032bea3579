//! Core domain logic for the deskmate assistant.
//! Contacts, notes, their stores and the free-text command dispatcher live
//! here; the CLI crate only reads lines and prints replies.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use command::dispatcher::{CommandTable, Dispatch, Resolution};
pub use command::error_policy::{CommandError, CommandResult};
pub use config::AssistantConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{ContactRecord, ContactView};
pub use model::field::{Birthday, Email, Field, FieldError, Name, Phone};
pub use model::note::{NoteRecord, NoteView};
pub use repo::contact_book::ContactBook;
pub use repo::note_book::NoteBook;
pub use repo::record_store::{Record, RecordStore, StoreError, StoreResult};
pub use service::workspace::{SnapshotPaths, Workspace};
pub use session::{is_termination, Assistant, Reply, SaveAnswer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
