//! ISO-8601 text input and output.
//!
//! The six principal forms live on the value types themselves: `Display`
//! prints the canonical ISO form and `FromStr` parses it strictly, for
//! [`LocalDate`], [`LocalTime`], [`LocalDateTime`], [`OffsetDateTime`],
//! [`ZonedDateTime`], [`crate::Instant`], [`ZoneOffset`], and
//! [`crate::Duration`]. This module carries the remaining named forms —
//! offset date, offset time, ordinal date, week date, basic date, and
//! RFC 1123 — plus the `Writeable` wrappers over the printers.

use writeable::Writeable;

use crate::components::{LocalDate, LocalTime, ZoneOffset};
use crate::fields::TemporalField;
use crate::{CivilError, CivilResult};

pub(crate) mod format;
pub(crate) mod parse;

mod rfc1123;

pub use format::{
    FormattableDate, FormattableDateTime, FormattableOffset, FormattableOffsetDateTime,
    FormattableTime,
};
pub use rfc1123::{format_rfc1123, parse_rfc1123};

/// Formats `YYYY-DDD`, such as `2008-155`.
pub fn format_ordinal_date(date: LocalDate) -> String {
    let mut out = String::with_capacity(8);
    // Writing to a String cannot fail.
    let _ = format::write_ordinal_date(&mut out, date);
    out
}

/// Parses `YYYY-DDD` to a date.
pub fn parse_ordinal_date(input: &str) -> CivilResult<LocalDate> {
    parse::parse_ordinal_date(input)
}

/// Formats `YYYY-Www-D`, such as `2004-W05-2`.
pub fn format_week_date(date: LocalDate) -> CivilResult<String> {
    let (week_based_year, week, day_of_week) = date.iso_week_date()?;
    let mut out = String::with_capacity(10);
    let _ = format::write_week_date(&mut out, week_based_year, week, day_of_week.value());
    Ok(out)
}

/// Parses `YYYY-Www-D` to a date.
pub fn parse_week_date(input: &str) -> CivilResult<LocalDate> {
    parse::parse_week_date(input)
}

/// Formats `YYYYMMDD`, such as `20080630`.
///
/// Only years 0 to 9999 are representable without separators.
pub fn format_basic_date(date: LocalDate) -> CivilResult<String> {
    if !(0..=9999).contains(&date.year()) {
        return Err(CivilError::ValueOutOfRange {
            field: TemporalField::Year,
            value: i64::from(date.year()),
            min: 0,
            max: 9999,
        });
    }
    Ok(format!(
        "{:04}{:02}{:02}",
        date.year(),
        date.month(),
        date.day()
    ))
}

/// Parses `YYYYMMDD` to a date.
pub fn parse_basic_date(input: &str) -> CivilResult<LocalDate> {
    parse::parse_basic_date(input)
}

/// Formats a date with an offset identifier, such as `2008-06-30+02:00`.
pub fn format_offset_date(date: LocalDate, offset: ZoneOffset) -> String {
    let mut out = FormattableDate(date).write_to_string().into_owned();
    let _ = FormattableOffset(offset).write_to(&mut out);
    out
}

/// Parses a date with an offset identifier.
pub fn parse_offset_date(input: &str) -> CivilResult<(LocalDate, ZoneOffset)> {
    parse::parse_offset_date(input)
}

/// Formats a time with an offset identifier, such as `11:05:30+02:00`.
pub fn format_offset_time(time: LocalTime, offset: ZoneOffset) -> String {
    let mut out = FormattableTime(time).write_to_string().into_owned();
    let _ = FormattableOffset(offset).write_to(&mut out);
    out
}

/// Parses a time with an offset identifier.
pub fn parse_offset_time(input: &str) -> CivilResult<(LocalTime, ZoneOffset)> {
    parse::parse_offset_time(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_date_both_ways() {
        let date = LocalDate::of(2008, 6, 3).unwrap();
        assert_eq!(format_ordinal_date(date), "2008-155");
        assert_eq!(parse_ordinal_date("2008-155").unwrap(), date);
    }

    #[test]
    fn week_date_both_ways() {
        let date = LocalDate::of(2004, 1, 27).unwrap();
        assert_eq!(format_week_date(date).unwrap(), "2004-W05-2");
        assert_eq!(parse_week_date("2004-W05-2").unwrap(), date);
    }

    #[test]
    fn basic_date_both_ways() {
        let date = LocalDate::of(2008, 6, 30).unwrap();
        assert_eq!(format_basic_date(date).unwrap(), "20080630");
        assert_eq!(parse_basic_date("20080630").unwrap(), date);
        assert!(format_basic_date(LocalDate::of(10_000, 1, 1).unwrap()).is_err());
        assert!(format_basic_date(LocalDate::of(-1, 1, 1).unwrap()).is_err());
    }

    #[test]
    fn offset_date_and_time_both_ways() {
        let date = LocalDate::of(2008, 6, 30).unwrap();
        let offset = ZoneOffset::of_hours(2).unwrap();
        let text = format_offset_date(date, offset);
        assert_eq!(text, "2008-06-30+02:00");
        assert_eq!(parse_offset_date(&text).unwrap(), (date, offset));

        let time = LocalTime::of(11, 5, 30, 0).unwrap();
        let text = format_offset_time(time, ZoneOffset::UTC);
        assert_eq!(text, "11:05:30Z");
        assert_eq!(parse_offset_time(&text).unwrap(), (time, ZoneOffset::UTC));
    }

    #[test]
    fn round_trip_across_year_magnitudes() {
        for year in [-999_999_999, -10_000, -999, 0, 1, 999, 2008, 9999, 10_000, 999_999_999] {
            let date = LocalDate::of(year, 6, 15).unwrap();
            let text = date.to_string();
            assert_eq!(text.parse::<LocalDate>().unwrap(), date, "{text}");
            let ordinal = format_ordinal_date(date);
            assert_eq!(parse_ordinal_date(&ordinal).unwrap(), date, "{ordinal}");
        }
    }
}
