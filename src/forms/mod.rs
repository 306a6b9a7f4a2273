//! Подготовка пользовательского ввода перед отправкой на сервер.
//!
//! Форматирование телефонов и дат повторяет поведение полей ввода: пользователь
//! видит `010-1234-5678` и `1990-01-01`, а сервер получает только цифры.

pub mod admin;
pub mod member;
pub mod review;

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::ValidationError;

pub use admin::{CinemaForm, MovieForm, ScheduleForm, ScheduleRequest, ScreenForm, SeatForm};
pub use member::{GuestContact, LoginForm, ProfileForm, ProfileUpdate, SignupForm};
pub use review::ReviewForm;

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// `01012345678` -> `010-1234-5678`, по мере ввода.
pub fn format_phone_number(value: &str) -> String {
    let numbers = digits(value);
    match numbers.len() {
        0..=3 => numbers,
        4..=7 => format!("{}-{}", &numbers[..3], &numbers[3..]),
        n => format!("{}-{}-{}", &numbers[..3], &numbers[3..7], &numbers[7..n.min(11)]),
    }
}

pub fn strip_hyphens(value: &str) -> String {
    value.replace('-', "")
}

/// `19900101` -> `1990-01-01`; неполный ввод остаётся цифрами.
pub fn format_birth_date(value: &str) -> String {
    let numbers = digits(value);
    if numbers.len() >= 8 {
        format!("{}-{}-{}", &numbers[..4], &numbers[4..6], &numbers[6..8])
    } else {
        numbers
    }
}

/// `1990-01-01` -> `19900101`.
pub fn birth_date_for_server(value: &str) -> String {
    strip_hyphens(value)
}

/// Дата для параметра пути: `YYYYMMDD`.
pub fn to_date_param(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn parse_date_param(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Мобильный номер: 10-11 цифр, начинается с `01`. Дефисы допускаются.
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let stripped = strip_hyphens(value.trim());
    let valid = (10..=11).contains(&stripped.len())
        && stripped.starts_with("01")
        && stripped.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(invalid("phone_number", "expected a mobile number like 010-1234-5678"))
    }
}

pub fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    let stripped = strip_hyphens(value.trim());
    match NaiveDate::parse_from_str(&stripped, "%Y%m%d") {
        Ok(_) if stripped.len() == 8 => Ok(()),
        _ => Err(invalid("birth_date", "expected a date like 1990-01-01")),
    }
}

pub fn validate_date_param(value: &str) -> Result<(), ValidationError> {
    parse_date_param(value)
        .map(|_| ())
        .ok_or_else(|| invalid("date", "expected a date like 2025-06-03"))
}
