//! Keyed record stores and snapshot persistence.
//!
//! # Responsibility
//! - Hold contacts and notes in memory behind one generic store contract.
//! - Keep SQLite row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Snapshot reads re-validate every field before records are rebuilt.
//! - Snapshot writes replace the whole file; there is no incremental append.

pub mod contact_book;
pub mod note_book;
pub mod record_store;
