//! SQLite snapshot files: connection bootstrap and schema versioning.
//!
//! # Responsibility
//! - Open snapshot files with the current schema applied.
//! - Refuse files written by a newer schema.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Stores must not read or write rows before migrations succeed.

use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating a snapshot file.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected the file header; the file is not a snapshot at all.
    NotASnapshot(rusqlite::Error),
    /// Any other SQLite failure on an otherwise recognizable file.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer deskmate; it must not be touched.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Whether replacing the file with a fresh snapshot loses nothing readable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnsupportedSchemaVersion { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotASnapshot(_) => write!(f, "file is not a deskmate snapshot"),
            Self::Sqlite(err) => write!(f, "snapshot database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "snapshot format v{db_version} is newer than this deskmate (v{latest_supported}); upgrade before opening it"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotASnapshot(err) | Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(ErrorCode::NotADatabase) => Self::NotASnapshot(value),
            _ => Self::Sqlite(value),
        }
    }
}
