//! Validated scalar fields attached to records.
//!
//! # Responsibility
//! - Provide one constructor per field kind that returns either a valid value
//!   or a typed `FieldError`.
//! - Render birthdays back to the exact `DD-MM-YYYY` text they were parsed from.
//!
//! # Invariants
//! - A field value only exists if its raw text passed validation.
//! - `Field::replace` validates before assignment; on failure the old value stays.
//! - `Birthday` never holds a date later than the day it was validated on.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed text format used to parse and render birthdays.
pub const BIRTHDAY_FORMAT: &str = "%d-%m-%Y";

const PHONE_LENGTH: usize = 12;
const PHONE_PREFIX: &str = "380";

static BIRTHDAY_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("valid birthday regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z][\w+.]+@\w+[.][a-z]{2,3}").expect("valid email regex")
});

/// Validation failure for a single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    EmptyName,
    PhoneLength { found: usize },
    PhonePrefix,
    PhoneDigits,
    BirthdayFormat,
    BirthdayInFuture { birthday: NaiveDate, today: NaiveDate },
    EmailFormat,
    BlankTag,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name can't be empty."),
            Self::PhoneLength { .. } => {
                write!(f, "Phone must contain {PHONE_LENGTH} characters.")
            }
            Self::PhonePrefix => write!(f, "Phone must start with '{PHONE_PREFIX}'."),
            Self::PhoneDigits => write!(f, "Phone number must include digits only."),
            Self::BirthdayFormat => write!(f, "Birthday must be in a format 'DD-MM-YYYY'."),
            Self::BirthdayInFuture { .. } => {
                write!(f, "Birthday can't be later than the current date.")
            }
            Self::EmailFormat => write!(f, "Wrong format. Example: \"mymail@gmail.com\""),
            Self::BlankTag => write!(f, "Tag can't be blank."),
        }
    }
}

impl Error for FieldError {}

/// Common contract for every validated field kind.
pub trait Field: Sized + Display {
    /// Validates raw user text and builds the field.
    fn parse(raw: &str) -> Result<Self, FieldError>;

    /// Replaces the held value with freshly validated text.
    ///
    /// The current value is untouched when `raw` is rejected.
    fn replace(&mut self, raw: &str) -> Result<(), FieldError> {
        *self = Self::parse(raw)?;
        Ok(())
    }
}

/// Record identity. Any non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field for Name {
    fn parse(raw: &str) -> Result<Self, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::EmptyName);
        }
        Ok(Self(raw.to_string()))
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ukrainian mobile number: 12 ASCII digits starting with `380`.
///
/// Non-ASCII digits (Arabic-Indic, fullwidth, ...) are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field for Phone {
    fn parse(raw: &str) -> Result<Self, FieldError> {
        let found = raw.chars().count();
        if found != PHONE_LENGTH {
            return Err(FieldError::PhoneLength { found });
        }
        if !raw.starts_with(PHONE_PREFIX) {
            return Err(FieldError::PhonePrefix);
        }
        if !raw.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(FieldError::PhoneDigits);
        }
        Ok(Self(raw.to_string()))
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar birthday, never later than the validation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses `DD-MM-YYYY` text, rejecting dates after `today`.
    ///
    /// `Field::parse` calls this with the local calendar date.
    pub fn parse_on(raw: &str, today: NaiveDate) -> Result<Self, FieldError> {
        if !BIRTHDAY_SHAPE_RE.is_match(raw) {
            return Err(FieldError::BirthdayFormat);
        }
        let birthday = NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
            .map_err(|_| FieldError::BirthdayFormat)?;
        if birthday > today {
            return Err(FieldError::BirthdayInFuture { birthday, today });
        }
        Ok(Self(birthday))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Days from `today` until the next anniversary of this birthday.
    ///
    /// Returns 0 when the anniversary is today. Feb 29 birthdays fall on
    /// Feb 28 in non-leap years.
    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        let this_year = anniversary_in(self.0, today.year());
        let next = if this_year < today {
            anniversary_in(self.0, today.year() + 1)
        } else {
            this_year
        };
        (next - today).num_days()
    }
}

impl Field for Birthday {
    fn parse(raw: &str) -> Result<Self, FieldError> {
        Self::parse_on(raw, today())
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

/// Email address matching a basic `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field for Email {
    fn parse(raw: &str) -> Result<Self, FieldError> {
        if !EMAIL_RE.is_match(raw) {
            return Err(FieldError::EmailFormat);
        }
        Ok(Self(raw.to_string()))
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! serialize_as_text {
    ($($field:ty),+) => {
        $(
            impl Serialize for $field {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

serialize_as_text!(Name, Phone, Birthday, Email);

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn anniversary_in(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(birthday)
}

#[cfg(test)]
mod tests {
    use super::{anniversary_in, Birthday, Field, FieldError, Name, Phone};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn replace_keeps_previous_value_on_rejection() {
        let mut phone = Phone::parse("380501112233").unwrap();
        let err = phone.replace("12345").unwrap_err();
        assert_eq!(err, FieldError::PhoneLength { found: 5 });
        assert_eq!(phone.as_str(), "380501112233");

        phone.replace("380679998877").unwrap();
        assert_eq!(phone.as_str(), "380679998877");
    }

    #[test]
    fn name_rejects_empty_text_only() {
        assert_eq!(Name::parse("").unwrap_err(), FieldError::EmptyName);
        assert_eq!(Name::parse(" ").unwrap().as_str(), " ");
    }

    #[test]
    fn leap_day_anniversary_falls_back_to_feb_28() {
        assert_eq!(anniversary_in(date(2000, 2, 29), 2023), date(2023, 2, 28));
        assert_eq!(anniversary_in(date(2000, 2, 29), 2024), date(2024, 2, 29));
    }

    #[test]
    fn birthday_today_counts_zero_days() {
        let today = date(2024, 5, 10);
        let birthday = Birthday::parse_on("10-05-1990", today).unwrap();
        assert_eq!(birthday.days_until_next(today), 0);
    }
}
