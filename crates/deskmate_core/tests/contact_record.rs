use chrono::NaiveDate;
use deskmate_core::{Birthday, ContactRecord, Email, Field, FieldError, Name, Phone};

fn phone(raw: &str) -> Phone {
    Phone::parse(raw).unwrap()
}

fn contact(name: &str, phones: &[&str]) -> ContactRecord {
    let mut record = ContactRecord::new(Name::parse(name).unwrap());
    for raw in phones {
        record.add_phone(phone(raw));
    }
    record
}

fn phone_texts(record: &ContactRecord) -> Vec<&str> {
    record.phones().iter().map(Phone::as_str).collect()
}

#[test]
fn add_phone_appends_duplicates_in_order() {
    let mut record = contact("Ann", &["380501112233"]);

    let message = record.add_phone(phone("380501112233"));
    record.add_phone(phone("380671112233"));

    assert_eq!(message, "Phone 380501112233 was added successfully");
    assert_eq!(
        phone_texts(&record),
        vec!["380501112233", "380501112233", "380671112233"]
    );
}

#[test]
fn change_phone_replaces_first_phone_and_moves_new_one_last() {
    let mut record = contact("Ann", &["380501112233", "380671112233"]);

    let message = record.change_phone(&phone("380501112233"), phone("380991112233"));

    assert_eq!(
        message,
        "Phone 380501112233 was successfully changed to 380991112233"
    );
    assert_eq!(phone_texts(&record), vec!["380671112233", "380991112233"]);
}

#[test]
fn change_phone_only_inspects_the_first_phone() {
    let mut record = contact("Ann", &["380501112233", "380671112233"]);

    let message = record.change_phone(&phone("380671112233"), phone("380991112233"));

    assert_eq!(
        message,
        "Phone number '380671112233' was not found in the record"
    );
    assert_eq!(phone_texts(&record), vec!["380501112233", "380671112233"]);
}

#[test]
fn change_phone_on_empty_record_reports_not_found() {
    let mut record = contact("Ann", &[]);
    let message = record.change_phone(&phone("380501112233"), phone("380991112233"));
    assert!(message.contains("was not found"));
    assert!(record.phones().is_empty());
}

#[test]
fn remove_phone_validates_before_searching() {
    let mut record = contact("Ann", &["380501112233"]);

    let err = record.remove_phone("0501112233").unwrap_err();
    assert_eq!(err, FieldError::PhoneLength { found: 10 });
    assert_eq!(phone_texts(&record), vec!["380501112233"]);
}

#[test]
fn remove_phone_removes_first_match_or_reports_not_found() {
    let mut record = contact("Ann", &["380671112233", "380501112233", "380501112233"]);

    let removed = record.remove_phone("380501112233").unwrap();
    assert_eq!(removed, "Phone 380501112233 was successfully removed from Ann");
    assert_eq!(phone_texts(&record), vec!["380671112233", "380501112233"]);

    let missing = record.remove_phone("380990000000").unwrap();
    assert_eq!(missing, "Number 380990000000 not found");
}

#[test]
fn birthday_and_email_are_overwritten() {
    let mut record = contact("Ann", &[]);
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    record.set_birthday(Birthday::parse_on("01-01-1990", today).unwrap());
    record.set_birthday(Birthday::parse_on("15-06-1990", today).unwrap());
    record.set_email(Email::parse("ann@mail.com").unwrap());
    record.set_email(Email::parse("ann@work.org").unwrap());

    assert_eq!(record.birthday().unwrap().to_string(), "15-06-1990");
    assert_eq!(record.email().unwrap().as_str(), "ann@work.org");
    assert_eq!(record.days_to_birthday(today), Some(5));
    assert_eq!(
        record.birthday_countdown(today),
        "Ann's birthday will be in 5 days"
    );
}

#[test]
fn missing_birthday_is_unknown() {
    let record = contact("Ann", &[]);
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    assert_eq!(record.days_to_birthday(today), None);
    assert_eq!(record.birthday_countdown(today), "Ann's birthday is unknown");
}

#[test]
fn describe_joins_phones_and_blanks_missing_fields() {
    let record = contact("Ann", &["380501112233", "380671112233"]);
    let view = record.describe();

    assert_eq!(view.name, "Ann");
    assert_eq!(view.phones, "380501112233, 380671112233");
    assert_eq!(view.birthday, "");
    assert_eq!(view.email, "");
    assert_eq!(
        view.to_string(),
        "Name: Ann; Phones: 380501112233, 380671112233; Birthday: ; Email: "
    );
}

#[test]
fn contact_view_serializes_as_flat_strings() {
    let mut record = contact("Ann", &["380501112233"]);
    record.set_email(Email::parse("ann@mail.com").unwrap());

    let json = serde_json::to_value(record.describe()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Ann",
            "phones": "380501112233",
            "birthday": "",
            "email": "ann@mail.com"
        })
    );
}
