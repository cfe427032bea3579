//! Note record: named text with tags and creation/change timestamps.
//!
//! # Invariants
//! - Tags are trimmed, lowercase, deduplicated and sorted.
//! - Timestamps carry whole seconds so they survive snapshot round-trips.
//! - `changed_at` is never earlier than `created_at`.

use crate::model::field::{FieldError, Name};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Text format used to render and persist note timestamps.
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    name: Name,
    text: String,
    tags: Vec<String>,
    created_at: NaiveDateTime,
    changed_at: NaiveDateTime,
}

/// Flat display projection of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub name: String,
    pub tags: String,
    pub created: String,
    pub changed: String,
}

impl Display for NoteView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Note: {}; Tags: {}; Created: {}; Changed: {}",
            self.name, self.tags, self.created, self.changed
        )
    }
}

impl NoteRecord {
    /// Creates a note stamped with `now` for both timestamps.
    pub fn new(name: Name, text: impl Into<String>, now: NaiveDateTime) -> Self {
        let now = truncate_to_seconds(now);
        Self {
            name,
            text: text.into(),
            tags: Vec::new(),
            created_at: now,
            changed_at: now,
        }
    }

    /// Rebuilds a note from persisted parts.
    ///
    /// # Errors
    /// - Returns `FieldError::BlankTag` when any tag is blank.
    pub fn from_parts(
        name: Name,
        text: String,
        tags: Vec<String>,
        created_at: NaiveDateTime,
        changed_at: NaiveDateTime,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            name,
            text,
            tags: normalize_tags(&tags)?,
            created_at: truncate_to_seconds(created_at),
            changed_at: truncate_to_seconds(changed_at.max(created_at)),
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn changed_at(&self) -> NaiveDateTime {
        self.changed_at
    }

    /// Replaces the full text and bumps `changed_at`.
    pub fn replace_text(&mut self, text: impl Into<String>, now: NaiveDateTime) {
        self.text = text.into();
        self.touch(now);
    }

    /// Merges `tags` into the current tag set.
    ///
    /// # Errors
    /// - Returns `FieldError::BlankTag` and leaves tags unchanged when any
    ///   input tag is blank.
    pub fn add_tags(&mut self, tags: &[String], now: NaiveDateTime) -> Result<(), FieldError> {
        let mut merged = self.tags.clone();
        merged.extend(tags.iter().cloned());
        self.tags = normalize_tags(&merged)?;
        self.touch(now);
        Ok(())
    }

    pub fn clear_tags(&mut self, now: NaiveDateTime) {
        self.tags.clear();
        self.touch(now);
    }

    /// Case-insensitive substring match over tags.
    pub fn has_tag_like(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags.iter().any(|tag| tag.contains(&needle))
    }

    pub fn describe(&self) -> NoteView {
        NoteView {
            name: self.name.to_string(),
            tags: self.tags.join(", "),
            created: self.created_at.format(NOTE_TIMESTAMP_FORMAT).to_string(),
            changed: self.changed_at.format(NOTE_TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn touch(&mut self, now: NaiveDateTime) {
        self.changed_at = truncate_to_seconds(now).max(self.created_at);
    }
}

/// Current local wall-clock time at second precision.
pub fn now() -> NaiveDateTime {
    truncate_to_seconds(Local::now().naive_local())
}

/// Normalizes tags to a sorted, deduplicated, lowercase list.
///
/// # Errors
/// - Returns `FieldError::BlankTag` when any tag is blank after trimming.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, FieldError> {
    let mut normalized = BTreeSet::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(FieldError::BlankTag);
        }
        normalized.insert(trimmed.to_lowercase());
    }
    Ok(normalized.into_iter().collect())
}

fn truncate_to_seconds(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}
