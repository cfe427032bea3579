use chrono::NaiveDate;
use deskmate_core::model::field::today;
use deskmate_core::{Birthday, Email, Field, FieldError, Name, Phone};
use proptest::prelude::*;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn phone_accepts_twelve_digits_with_380_prefix() {
    let phone = Phone::parse("380501112233").unwrap();
    assert_eq!(phone.as_str(), "380501112233");
    assert_eq!(phone.to_string(), "380501112233");
}

#[test]
fn phone_reports_the_first_failed_rule() {
    assert_eq!(
        Phone::parse("38050111223").unwrap_err(),
        FieldError::PhoneLength { found: 11 }
    );
    assert_eq!(
        Phone::parse("095011122334").unwrap_err(),
        FieldError::PhonePrefix
    );
    assert_eq!(
        Phone::parse("3805011122x3").unwrap_err(),
        FieldError::PhoneDigits
    );
    assert_eq!(
        Phone::parse("380-50-111-2").unwrap_err(),
        FieldError::PhoneDigits
    );
}

#[test]
fn phone_rejects_non_ascii_digits() {
    assert_eq!(
        Phone::parse("380５０１１１２２３３").unwrap_err(),
        FieldError::PhoneDigits
    );
    assert_eq!(
        Phone::parse("380٥٠١١١٢٢٣٣").unwrap_err(),
        FieldError::PhoneDigits
    );
}

#[test]
fn phone_errors_render_user_messages() {
    assert_eq!(
        Phone::parse("123").unwrap_err().to_string(),
        "Phone must contain 12 characters."
    );
    assert_eq!(
        Phone::parse("123456789012").unwrap_err().to_string(),
        "Phone must start with '380'."
    );
}

proptest! {
    #[test]
    fn phone_is_valid_iff_length_digits_and_prefix_hold(raw in "[0-9a-z+ -]{0,14}") {
        let expected = raw.chars().count() == 12
            && raw.chars().all(|ch| ch.is_ascii_digit())
            && raw.starts_with("380");
        prop_assert_eq!(Phone::parse(&raw).is_ok(), expected);
    }

    #[test]
    fn every_380_number_with_nine_more_digits_is_valid(suffix in "[0-9]{9}") {
        let raw = format!("380{suffix}");
        let phone = Phone::parse(&raw).unwrap();
        prop_assert_eq!(phone.as_str(), raw.as_str());
    }

    #[test]
    fn birthday_text_round_trips(day in 1u32..=28, month in 1u32..=12, year in 1900i32..=2020) {
        let raw = format!("{day:02}-{month:02}-{year:04}");
        let birthday = Birthday::parse(&raw).unwrap();
        prop_assert_eq!(birthday.to_string(), raw);
        prop_assert_eq!(birthday.date(), date(year, month, day));
    }
}

#[test]
fn birthday_rejects_tomorrow() {
    let tomorrow = today().succ_opt().unwrap();
    let raw = tomorrow.format("%d-%m-%Y").to_string();

    let err = Birthday::parse(&raw).unwrap_err();
    assert!(matches!(err, FieldError::BirthdayInFuture { .. }));
    assert_eq!(
        err.to_string(),
        "Birthday can't be later than the current date."
    );
}

#[test]
fn birthday_accepts_today() {
    let raw = today().format("%d-%m-%Y").to_string();
    assert_eq!(Birthday::parse(&raw).unwrap().to_string(), raw);
}

#[test]
fn birthday_requires_exact_dd_mm_yyyy_shape() {
    for raw in ["1-2-2000", "2000-01-01", "01/02/2000", "31-02-2000", "01-13-2000", ""] {
        assert_eq!(
            Birthday::parse(raw).unwrap_err(),
            FieldError::BirthdayFormat,
            "input {raw:?}"
        );
    }
}

#[test]
fn birthday_counts_days_to_next_anniversary() {
    let birthday = Birthday::parse_on("15-06-1990", date(2024, 6, 10)).unwrap();

    assert_eq!(birthday.days_until_next(date(2024, 6, 10)), 5);
    assert_eq!(birthday.days_until_next(date(2024, 6, 15)), 0);
    assert_eq!(birthday.days_until_next(date(2024, 6, 20)), 360);
}

#[test]
fn email_requires_local_part_domain_and_short_tld() {
    assert_eq!(
        Email::parse("mymail@gmail.com").unwrap().as_str(),
        "mymail@gmail.com"
    );
    assert!(Email::parse("first.last@mail.ua").is_ok());

    for raw in ["mymail", "a@b.com", "1abc@mail.com", "name@mail", "name@mail.c"] {
        assert_eq!(
            Email::parse(raw).unwrap_err(),
            FieldError::EmailFormat,
            "input {raw:?}"
        );
    }
}

#[test]
fn name_accepts_any_non_empty_text() {
    assert_eq!(Name::parse("Ann").unwrap().as_str(), "Ann");
    assert_eq!(Name::parse("").unwrap_err(), FieldError::EmptyName);
}

#[test]
fn replace_revalidates_from_scratch() {
    let mut email = Email::parse("old@mail.com").unwrap();

    assert!(email.replace("broken").is_err());
    assert_eq!(email.as_str(), "old@mail.com");

    email.replace("new@mail.com").unwrap();
    assert_eq!(email.as_str(), "new@mail.com");
}
