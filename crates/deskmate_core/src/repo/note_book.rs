//! Note store and its snapshot row mapping.

use crate::model::field::{Field, Name};
use crate::model::note::{NoteRecord, NOTE_TIMESTAMP_FORMAT};
use crate::repo::record_store::{Record, RecordStore, SnapshotTable, StoreError, StoreResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

/// Notebook keyed by note name.
pub type NoteBook = RecordStore<NoteRecord>;

impl Record for NoteRecord {
    fn key(&self) -> &str {
        self.name().as_str()
    }

    fn matches(&self, needle: &str) -> bool {
        self.name().as_str().to_lowercase().contains(needle)
            || self.tags().iter().any(|tag| tag.contains(needle))
            || self.text().to_lowercase().contains(needle)
    }

    fn summary(&self) -> String {
        self.describe().to_string()
    }
}

impl SnapshotTable for NoteRecord {
    const TABLE: &'static str = "notes";

    fn read_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        let mut note_stmt = conn.prepare(
            "SELECT name, body, created_at, changed_at FROM notes ORDER BY position ASC;",
        )?;
        let mut tag_stmt =
            conn.prepare("SELECT tag FROM note_tags WHERE note_name = ?1 ORDER BY tag ASC;")?;

        let rows = note_stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>("name")?,
                row.get::<_, String>("body")?,
                row.get::<_, String>("created_at")?,
                row.get::<_, String>("changed_at")?,
            ))
        })?;

        let mut notes = Vec::new();
        for row in rows {
            let (name_text, body, created_text, changed_text) = row?;
            let tags = tag_stmt
                .query_map([name_text.as_str()], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            let name = Name::parse(&name_text)
                .map_err(|err| StoreError::InvalidData(format!("notes.name: {err}")))?;
            let created_at = parse_timestamp("notes.created_at", &created_text)?;
            let changed_at = parse_timestamp("notes.changed_at", &changed_text)?;
            let note = NoteRecord::from_parts(name, body, tags, created_at, changed_at)
                .map_err(|err| StoreError::InvalidData(format!("note_tags.tag: {err}")))?;
            notes.push(note);
        }

        Ok(notes)
    }

    fn write_all(conn: &Connection, records: &[Self]) -> StoreResult<()> {
        conn.execute_batch("DELETE FROM note_tags; DELETE FROM notes;")?;

        let mut insert_note = conn.prepare(
            "INSERT INTO notes (name, position, body, created_at, changed_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;
        let mut insert_tag =
            conn.prepare("INSERT INTO note_tags (note_name, tag) VALUES (?1, ?2);")?;

        for (position, note) in records.iter().enumerate() {
            insert_note.execute(params![
                note.name().as_str(),
                position as i64,
                note.text(),
                note.created_at().format(NOTE_TIMESTAMP_FORMAT).to_string(),
                note.changed_at().format(NOTE_TIMESTAMP_FORMAT).to_string(),
            ])?;
            for tag in note.tags() {
                insert_tag.execute(params![note.name().as_str(), tag])?;
            }
        }

        Ok(())
    }
}

fn parse_timestamp(column: &str, text: &str) -> StoreResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, NOTE_TIMESTAMP_FORMAT)
        .map_err(|_| StoreError::InvalidData(format!("{column}: invalid timestamp")))
}
