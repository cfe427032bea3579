//! Generic keyed record store with whole-file snapshot persistence.
//!
//! # Responsibility
//! - Keep records unique by key in a stable iteration order.
//! - Answer substring search and bounded listing queries.
//! - Load and replace a complete snapshot file in one step.
//!
//! # Invariants
//! - A record's `key()` is the only key it is stored under.
//! - Re-adding an existing key overwrites in place and keeps its position.
//! - Saving writes a temp file and renames it over the snapshot, so the
//!   previous snapshot stays intact until the new one is complete.

use crate::db::{open_db, DbError};
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure while reading or writing a snapshot.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Io(std::io::Error),
    MissingSnapshot(PathBuf),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::MissingSnapshot(path) => write!(f, "snapshot not found: {}", path.display()),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::MissingSnapshot(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Contract every stored record kind fulfils.
pub trait Record: Clone {
    /// Unique, case-sensitive store key.
    fn key(&self) -> &str;
    /// Whether the record matches an already lowercased search needle.
    fn matches(&self, needle: &str) -> bool;
    /// One-line description used by search and listing.
    fn summary(&self) -> String;
}

/// Row mapping between a record kind and its snapshot tables.
pub trait SnapshotTable: Record + Sized {
    /// Table name used in log events.
    const TABLE: &'static str;

    /// Reads every record in store order, re-validating each field.
    fn read_all(conn: &Connection) -> StoreResult<Vec<Self>>;

    /// Replaces the table contents with `records`, preserving order.
    fn write_all(conn: &Connection, records: &[Self]) -> StoreResult<()>;
}

/// Keyed collection of records in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, overwriting any record with the same key.
    pub fn add(&mut self, record: R) {
        match self
            .records
            .iter_mut()
            .find(|existing| existing.key() == record.key())
        {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Removes the record under `key`. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<R> {
        let index = self.records.iter().position(|record| record.key() == key)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, key: &str) -> Option<&R> {
        self.records.iter().find(|record| record.key() == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut R> {
        self.records.iter_mut().find(|record| record.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// Case-insensitive search; one summary line per matching record.
    ///
    /// Returns an empty string when nothing matches.
    pub fn search(&self, needle: &str) -> String {
        let needle = needle.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.matches(&needle))
            .map(Record::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Summaries of the first `min(count, len)` records.
    ///
    /// Non-positive counts yield an empty string.
    pub fn list(&self, count: i64) -> String {
        let take = usize::try_from(count).unwrap_or(0);
        self.records
            .iter()
            .take(take)
            .map(Record::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<R: SnapshotTable> RecordStore<R> {
    /// Loads a complete snapshot.
    ///
    /// # Errors
    /// - `StoreError::MissingSnapshot` when `path` does not exist.
    /// - `StoreError::Db` when the file is not a readable snapshot.
    /// - `StoreError::InvalidData` when a persisted field fails validation.
    pub fn load_snapshot(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::MissingSnapshot(path.to_path_buf()));
        }

        let started_at = Instant::now();
        let conn = open_db(path)?;
        let records = R::read_all(&conn)?;
        info!(
            "event=snapshot_load module=repo status=ok table={} records={} duration_ms={}",
            R::TABLE,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Self { records })
    }

    /// Replaces the snapshot at `path` with the full store contents.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let started_at = Instant::now();
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let staging = staging_path(path);
        remove_if_exists(&staging)?;
        {
            let mut conn = open_db(&staging)?;
            let tx = conn.transaction()?;
            R::write_all(&tx, &self.records)?;
            tx.commit()?;
        }
        fs::rename(&staging, path)?;

        info!(
            "event=snapshot_save module=repo status=ok table={} records={} duration_ms={}",
            R::TABLE,
            self.records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Loads `path`, or starts empty and writes a fresh snapshot when the
    /// file is missing or unreadable.
    ///
    /// # Errors
    /// - Snapshots written by a newer schema are reported, never overwritten.
    /// - Fails when the fresh snapshot cannot be written.
    pub fn open_or_create(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        match Self::load_snapshot(path) {
            Ok(store) => Ok(store),
            Err(StoreError::Db(err)) if !err.is_recoverable() => Err(StoreError::Db(err)),
            Err(err) => {
                if matches!(err, StoreError::MissingSnapshot(_)) {
                    info!(
                        "event=snapshot_load module=repo status=missing table={}",
                        R::TABLE
                    );
                } else {
                    warn!(
                        "event=snapshot_load module=repo status=recovered table={} error={}",
                        R::TABLE,
                        err
                    );
                }
                let store = Self::new();
                store.save_snapshot(path)?;
                Ok(store)
            }
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = OsString::from(path.as_os_str());
    staging.push(".tmp");
    PathBuf::from(staging)
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}
