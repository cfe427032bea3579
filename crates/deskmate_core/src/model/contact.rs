//! Contact record: one identity plus validated phones, birthday and email.
//!
//! # Responsibility
//! - Own every field attached to one contact.
//! - Produce confirmation/"not found" messages for phone edits.
//!
//! # Invariants
//! - Phones keep insertion order; duplicates are allowed.
//! - `change_phone` only inspects the first phone before answering.

use crate::model::field::{Birthday, Email, Field, FieldError, Name, Phone};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Aggregate owned by the contact store, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
    email: Option<Email>,
}

/// Flat display projection of a contact.
///
/// Missing optional fields render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub name: String,
    pub phones: String,
    pub birthday: String,
    pub email: String,
}

impl Display for ContactView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {}; Phones: {}; Birthday: {}; Email: {}",
            self.name, self.phones, self.birthday, self.email
        )
    }
}

impl ContactRecord {
    /// Creates a contact with no phones and no optional fields.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
            email: None,
        }
    }

    /// Creates a contact holding a single phone.
    pub fn with_phone(name: Name, phone: Phone) -> Self {
        let mut record = Self::new(name);
        record.phones.push(phone);
        record
    }

    /// Rebuilds a contact from already validated parts.
    pub fn from_parts(
        name: Name,
        phones: Vec<Phone>,
        birthday: Option<Birthday>,
        email: Option<Email>,
    ) -> Self {
        Self {
            name,
            phones,
            birthday,
            email,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Appends a phone. Always succeeds.
    pub fn add_phone(&mut self, phone: Phone) -> String {
        let message = format!("Phone {phone} was added successfully");
        self.phones.push(phone);
        message
    }

    /// Swaps `old` for `new`, moving the new phone to the end of the list.
    ///
    /// Only the first phone is compared; a match further down the list
    /// still reports "not found".
    pub fn change_phone(&mut self, old: &Phone, new: Phone) -> String {
        match self.phones.first() {
            Some(first) if first == old => {
                self.phones.remove(0);
                let message = format!("Phone {old} was successfully changed to {new}");
                self.phones.push(new);
                message
            }
            _ => format!("Phone number '{old}' was not found in the record"),
        }
    }

    /// Removes the first phone equal to `raw`.
    ///
    /// # Errors
    /// - Returns `FieldError` when `raw` is not a valid phone; the list is
    ///   not searched in that case.
    pub fn remove_phone(&mut self, raw: &str) -> Result<String, FieldError> {
        let phone = Phone::parse(raw)?;
        match self.phones.iter().position(|candidate| *candidate == phone) {
            Some(index) => {
                self.phones.remove(index);
                Ok(format!(
                    "Phone {phone} was successfully removed from {}",
                    self.name
                ))
            }
            None => Ok(format!("Number {phone} not found")),
        }
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = Some(email);
    }

    /// Days until the next birthday, or `None` when no birthday is set.
    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.birthday
            .as_ref()
            .map(|birthday| birthday.days_until_next(today))
    }

    /// Human-readable birthday countdown.
    pub fn birthday_countdown(&self, today: NaiveDate) -> String {
        match self.days_to_birthday(today) {
            Some(days) => format!("{}'s birthday will be in {days} days", self.name),
            None => format!("{}'s birthday is unknown", self.name),
        }
    }

    pub fn describe(&self) -> ContactView {
        ContactView {
            name: self.name.to_string(),
            phones: self
                .phones
                .iter()
                .map(Phone::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            birthday: self
                .birthday
                .map(|birthday| birthday.to_string())
                .unwrap_or_default(),
            email: self
                .email
                .as_ref()
                .map(|email| email.to_string())
                .unwrap_or_default(),
        }
    }
}
