//! Session-wide state shared by every command handler.
//!
//! # Responsibility
//! - Own the contact and note stores for one assistant session.
//! - Load both snapshots at startup and write both back on save.
//!
//! # Invariants
//! - Exactly one caller mutates the stores at a time; there is no locking.
//! - A failed load never aborts startup unless the snapshot is newer than
//!   this binary understands.

use crate::repo::contact_book::ContactBook;
use crate::repo::note_book::NoteBook;
use crate::repo::record_store::StoreResult;
use log::info;
use std::path::{Path, PathBuf};

/// File locations of the contact and note snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub contacts: PathBuf,
    pub notes: PathBuf,
}

impl SnapshotPaths {
    /// Standard snapshot file names inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            contacts: data_dir.join(crate::config::CONTACTS_SNAPSHOT_FILE),
            notes: data_dir.join(crate::config::NOTES_SNAPSHOT_FILE),
        }
    }
}

/// Contact and note stores plus where they persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub contacts: ContactBook,
    pub notes: NoteBook,
    paths: SnapshotPaths,
}

impl Workspace {
    /// Empty stores that will persist to `paths`. No I/O happens here.
    pub fn new(paths: SnapshotPaths) -> Self {
        Self {
            contacts: ContactBook::new(),
            notes: NoteBook::new(),
            paths,
        }
    }

    /// Loads both snapshots, creating fresh ones where missing or unreadable.
    pub fn open(paths: SnapshotPaths) -> StoreResult<Self> {
        let contacts = ContactBook::open_or_create(&paths.contacts)?;
        let notes = NoteBook::open_or_create(&paths.notes)?;
        info!(
            "event=workspace_open module=service status=ok contacts={} notes={}",
            contacts.len(),
            notes.len()
        );
        Ok(Self {
            contacts,
            notes,
            paths,
        })
    }

    /// Writes both stores back to their snapshot files.
    pub fn save(&self) -> StoreResult<()> {
        self.contacts.save_snapshot(&self.paths.contacts)?;
        self.notes.save_snapshot(&self.paths.notes)?;
        Ok(())
    }

    pub fn paths(&self) -> &SnapshotPaths {
        &self.paths
    }
}
