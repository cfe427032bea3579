//! Domain model for contacts and notes.
//!
//! # Responsibility
//! - Define validated field types and the records that own them.
//!
//! # Invariants
//! - Records never hold a field value that bypassed its constructor.
//! - A record exclusively owns its fields; nothing is shared across records.

pub mod contact;
pub mod field;
pub mod note;
