//! Session-level use-case services.
//!
//! # Responsibility
//! - Bundle the stores a session works on and their persistence locations.
//! - Keep command handlers decoupled from snapshot file handling.

pub mod workspace;
