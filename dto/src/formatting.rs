use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

pub const CURRENCY_LABEL: &str = "KSh";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DISPLAYED_DATE_FORMAT: &str = "%B %-d, %Y at %I:%M %p";

/// Return `value` unless it is empty.
pub fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// Format an amount such as `50000` into `50,000 KSh`.
///
/// Only the leading integer is considered, so `12.9` is displayed as `12 KSh`.
/// Anything that doesn't start with a number is displayed as `0 KSh`.
pub fn format_amount(amount: &str) -> String {
    let (negative, digits) = parse_leading_integer(amount);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return format!("0 {CURRENCY_LABEL}");
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{} {CURRENCY_LABEL}", group_thousands(digits))
}

/// Split the leading integer of `text` into its sign and its digits.
fn parse_leading_integer(text: &str) -> (bool, &str) {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_count = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();

    (negative, &unsigned[..digits_count])
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Turn a ward identifier such as `nairobi-west` into `Nairobi West`.
pub fn format_ward(ward: &str) -> String {
    let mut previous_is_word_character = false;
    ward.replace('-', " ")
        .chars()
        .map(|character| {
            let is_word_character = character.is_ascii_alphanumeric() || character == '_';
            let character = if is_word_character && !previous_is_word_character {
                character.to_ascii_uppercase()
            } else {
                character
            };
            previous_is_word_character = is_word_character;
            character
        })
        .collect()
}

/// Format a submission date such as `2026-10-15T10:30:00Z` into `October 15, 2026 at 10:30 AM`,
/// as seen from `timezone`.
///
/// Dates without offset are considered as being in `timezone`, except bare dates which are UTC.
/// Return `None` when the date can't be understood.
pub fn format_submitted_at<Tz>(submitted_at: &str, timezone: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let instant = parse_submitted_at(submitted_at.trim(), timezone)?;
    Some(
        instant
            .with_timezone(timezone)
            .format(DISPLAYED_DATE_FORMAT)
            .to_string(),
    )
}

fn parse_submitted_at<Tz: TimeZone>(submitted_at: &str, timezone: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(submitted_at) {
        return Some(date_time.with_timezone(&Utc));
    }
    if let Ok(date_time) = DateTime::parse_from_rfc2822(submitted_at) {
        return Some(date_time.with_timezone(&Utc));
    }
    if let Some(date_time) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(submitted_at, format).ok())
    {
        return timezone
            .from_local_datetime(&date_time)
            .earliest()
            .map(|date_time| date_time.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(submitted_at, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date_time| date_time.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        amount = {"50000", "abc", "", "0", "999", "1000", "1234567", "12.9", "  42", "+7", "-1500", "-0", "007", "50000KSh", "1e5"},
        expected = {"50,000 KSh", "0 KSh", "0 KSh", "0 KSh", "999 KSh", "1,000 KSh", "1,234,567 KSh", "12 KSh", "42 KSh", "7 KSh", "-1,500 KSh", "0 KSh", "7 KSh", "50,000 KSh", "1 KSh"}
    )]
    fn should_format_amount(amount: &str, expected: &str) {
        assert_eq!(expected, format_amount(amount));
    }

    #[test]
    fn should_format_amount_larger_than_any_integer_type() {
        assert_eq!(
            "123,456,789,012,345,678,901,234 KSh",
            format_amount("123456789012345678901234")
        );
    }

    #[parameterized(
        ward = {"nairobi-west", "", "kibra", "MAKADARA", "south-c-ward", "o'brien", "  lower  ", "ward_7"},
        expected = {"Nairobi West", "", "Kibra", "MAKADARA", "South C Ward", "O'Brien", "  Lower  ", "Ward_7"}
    )]
    fn should_format_ward(ward: &str, expected: &str) {
        assert_eq!(expected, format_ward(ward));
    }

    #[parameterized(
        submitted_at = {"2026-10-15T10:30:00.000Z", "2026-10-15T21:05:59Z", "2026-10-15T13:30:00+03:00", "2026-10-15T10:30", "2026-10-15 10:30:00", "2026-10-15", "Thu, 15 Oct 2026 10:30:00 +0000"},
        expected = {"October 15, 2026 at 10:30 AM", "October 15, 2026 at 09:05 PM", "October 15, 2026 at 10:30 AM", "October 15, 2026 at 10:30 AM", "October 15, 2026 at 10:30 AM", "October 15, 2026 at 12:00 AM", "October 15, 2026 at 10:30 AM"}
    )]
    fn should_format_submitted_at(submitted_at: &str, expected: &str) {
        assert_eq!(
            Some(expected.to_owned()),
            format_submitted_at(submitted_at, &Utc)
        );
    }

    #[test]
    fn should_format_submitted_at_in_given_timezone() {
        let nairobi = FixedOffset::east_opt(3 * 3600).unwrap();

        assert_eq!(
            Some("October 15, 2026 at 01:30 PM".to_owned()),
            format_submitted_at("2026-10-15T10:30:00Z", &nairobi)
        );
        assert_eq!(
            Some("October 15, 2026 at 10:30 AM".to_owned()),
            format_submitted_at("2026-10-15T10:30:00", &nairobi)
        );
    }

    #[parameterized(submitted_at = {"", "yesterday", "2026-13-45", "15/10/2026"})]
    fn should_fail_to_format_submitted_at(submitted_at: &str) {
        assert_eq!(None, format_submitted_at(submitted_at, &Utc));
    }

    #[test]
    fn should_use_fallback_only_when_empty() {
        assert_eq!("Applicant", or_fallback("", "Applicant"));
        assert_eq!("Jane", or_fallback("Jane", "Applicant"));
        assert_eq!(" ", or_fallback(" ", "Applicant"));
    }
}
