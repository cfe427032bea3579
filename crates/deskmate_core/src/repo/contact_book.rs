//! Contact store and its snapshot row mapping.
//!
//! # Invariants
//! - Contact rows are written in store order via `contacts.position`.
//! - Phones are written per contact in list order via `contact_phones.position`.
//! - Read paths re-validate every field and reject invalid persisted state.

use crate::model::contact::ContactRecord;
use crate::model::field::{Birthday, Email, Field, FieldError, Name, Phone};
use crate::repo::record_store::{Record, RecordStore, SnapshotTable, StoreError, StoreResult};
use rusqlite::{params, Connection};

/// Process-wide contact collection keyed by contact name.
pub type ContactBook = RecordStore<ContactRecord>;

impl Record for ContactRecord {
    fn key(&self) -> &str {
        self.name().as_str()
    }

    fn matches(&self, needle: &str) -> bool {
        self.name().as_str().to_lowercase().contains(needle)
            || self
                .phones()
                .iter()
                .any(|phone| phone.as_str().contains(needle))
    }

    fn summary(&self) -> String {
        self.describe().to_string()
    }
}

impl SnapshotTable for ContactRecord {
    const TABLE: &'static str = "contacts";

    fn read_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        let mut contact_stmt =
            conn.prepare("SELECT name, birthday, email FROM contacts ORDER BY position ASC;")?;
        let mut phone_stmt = conn.prepare(
            "SELECT phone
             FROM contact_phones
             WHERE contact_name = ?1
             ORDER BY position ASC;",
        )?;

        let rows = contact_stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>("name")?,
                row.get::<_, Option<String>>("birthday")?,
                row.get::<_, Option<String>>("email")?,
            ))
        })?;

        let mut contacts = Vec::new();
        for row in rows {
            let (name_text, birthday_text, email_text) = row?;
            let phone_texts = phone_stmt
                .query_map([name_text.as_str()], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            let name = Name::parse(&name_text).map_err(|err| invalid("contacts.name", err))?;
            let phones = phone_texts
                .iter()
                .map(|text| Phone::parse(text))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| invalid("contact_phones.phone", err))?;
            let birthday = birthday_text
                .as_deref()
                .map(Birthday::parse)
                .transpose()
                .map_err(|err| invalid("contacts.birthday", err))?;
            let email = email_text
                .as_deref()
                .map(Email::parse)
                .transpose()
                .map_err(|err| invalid("contacts.email", err))?;

            contacts.push(ContactRecord::from_parts(name, phones, birthday, email));
        }

        Ok(contacts)
    }

    fn write_all(conn: &Connection, records: &[Self]) -> StoreResult<()> {
        conn.execute_batch("DELETE FROM contact_phones; DELETE FROM contacts;")?;

        let mut insert_contact = conn.prepare(
            "INSERT INTO contacts (name, position, birthday, email) VALUES (?1, ?2, ?3, ?4);",
        )?;
        let mut insert_phone = conn.prepare(
            "INSERT INTO contact_phones (contact_name, position, phone) VALUES (?1, ?2, ?3);",
        )?;

        for (position, record) in records.iter().enumerate() {
            insert_contact.execute(params![
                record.name().as_str(),
                position as i64,
                record.birthday().map(|birthday| birthday.to_string()),
                record.email().map(Email::as_str),
            ])?;
            for (phone_position, phone) in record.phones().iter().enumerate() {
                insert_phone.execute(params![
                    record.name().as_str(),
                    phone_position as i64,
                    phone.as_str(),
                ])?;
            }
        }

        Ok(())
    }
}

fn invalid(column: &str, err: FieldError) -> StoreError {
    StoreError::InvalidData(format!("{column}: {err}"))
}
