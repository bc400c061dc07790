//! The RFC 1123 date-time form, English names only.

use core::fmt::Write;

use crate::components::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZoneOffset};
use crate::fields::TemporalField;
use crate::text::parse::Cursor;
use crate::{CivilError, CivilResult};

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats an offset date-time as `EEE, dd MMM yyyy HH:mm:ss Z`, such as
/// `Tue, 03 Jun 2008 11:05:30 Z`.
///
/// Only positive four-digit years are representable; the zero offset prints
/// as `Z` and any other as `±HHMM`. Sub-second precision is dropped.
pub fn format_rfc1123(value: OffsetDateTime) -> CivilResult<String> {
    let date = value.date();
    if !(1..=9999).contains(&date.year()) {
        return Err(CivilError::ValueOutOfRange {
            field: TemporalField::Year,
            value: i64::from(date.year()),
            min: 1,
            max: 9999,
        });
    }
    let time = value.time();
    let mut out = String::with_capacity(31);
    let _ = write!(
        out,
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} ",
        DAY_NAMES[usize::from(date.day_of_week().value()) - 1],
        date.day(),
        MONTH_NAMES[usize::from(date.month()) - 1],
        date.year(),
        time.hour(),
        time.minute(),
        time.second(),
    );
    let total = value.offset().total_seconds();
    if total == 0 {
        out.push('Z');
    } else {
        let abs = total.unsigned_abs();
        let _ = write!(
            out,
            "{}{:02}{:02}",
            if total < 0 { '-' } else { '+' },
            abs / 3600,
            (abs / 60) % 60
        );
    }
    Ok(out)
}

/// Parses the RFC 1123 form; month and day names are matched
/// case-insensitively and the parsed day-of-week is checked against the
/// date.
pub fn parse_rfc1123(input: &str) -> CivilResult<OffsetDateTime> {
    let mut cursor = Cursor::new(input);

    let day_of_week = name_index(&mut cursor, &DAY_NAMES, "expected a day name")?;
    cursor.expect(b',', "expected ',' after the day name")?;
    cursor.expect(b' ', "expected a space after the comma")?;
    let day = cursor.two_digits()?;
    cursor.expect(b' ', "expected a space after the day")?;
    let month = name_index(&mut cursor, &MONTH_NAMES, "expected a month name")? + 1;
    cursor.expect(b' ', "expected a space after the month")?;
    let year = rfc_year(&mut cursor)?;
    cursor.expect(b' ', "expected a space after the year")?;
    let hour = cursor.two_digits()?;
    cursor.expect(b':', "expected ':' after the hour")?;
    let minute = cursor.two_digits()?;
    cursor.expect(b':', "expected ':' after the minute")?;
    let second = cursor.two_digits()?;
    cursor.expect(b' ', "expected a space before the offset")?;
    let offset = rfc_offset(&mut cursor)?;
    cursor.finish()?;

    let date = LocalDate::of(year, month as u8, day as u8)
        .map_err(|_| cursor.err("no such calendar date"))?;
    if usize::from(date.day_of_week().value()) - 1 != day_of_week {
        return Err(cursor.err("day-of-week does not match the date"));
    }
    let time = LocalTime::of(hour as u8, minute as u8, second as u8, 0)
        .map_err(|_| cursor.err("time field out of range"))?;
    Ok(LocalDateTime::of(date, time).at_offset(offset))
}

fn rfc_year(cursor: &mut Cursor<'_>) -> CivilResult<i32> {
    Ok(cursor.digits(4, 4)? as i32)
}

fn name_index(
    cursor: &mut Cursor<'_>,
    names: &[&str],
    message: &'static str,
) -> CivilResult<usize> {
    let mut word = [0u8; 3];
    for slot in &mut word {
        match cursor.bump() {
            Some(byte) if byte.is_ascii_alphabetic() => *slot = byte.to_ascii_uppercase(),
            _ => return Err(cursor.err(message)),
        }
    }
    names
        .iter()
        .position(|name| name.as_bytes().eq_ignore_ascii_case(&word))
        .ok_or_else(|| cursor.err(message))
}

fn rfc_offset(cursor: &mut Cursor<'_>) -> CivilResult<ZoneOffset> {
    match cursor.peek() {
        Some(b'Z' | b'z') => {
            cursor.bump();
            Ok(ZoneOffset::UTC)
        }
        Some(b'G' | b'g' | b'U' | b'u') => {
            // GMT or UT, case-insensitively.
            let mut word = Vec::new();
            while cursor.peek().is_some_and(|byte| byte.is_ascii_alphabetic()) {
                word.extend(cursor.bump().map(|b| b.to_ascii_uppercase()));
            }
            if word == b"GMT" || word == b"UT" {
                Ok(ZoneOffset::UTC)
            } else {
                Err(cursor.err("unknown offset name"))
            }
        }
        Some(b'+' | b'-') => {
            let sign = if cursor.bump() == Some(b'-') { -1 } else { 1 };
            let hours = cursor.two_digits()? as i32;
            let minutes = cursor.two_digits()? as i32;
            ZoneOffset::of_total_seconds(sign * (hours * 3600 + minutes * 60))
                .map_err(|_| cursor.err("offset outside the valid range"))
        }
        _ => Err(cursor.err("expected an offset")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LocalDateTime, ZonedDateTime};
    use crate::zone::resolver::Strict;
    use crate::zone::ZoneId;

    fn sample() -> OffsetDateTime {
        LocalDateTime::of(
            LocalDate::of(2008, 6, 3).unwrap(),
            LocalTime::of(11, 5, 30, 0).unwrap(),
        )
        .at_offset(ZoneOffset::UTC)
    }

    #[test]
    fn formats_utc_with_z() {
        assert_eq!(format_rfc1123(sample()).unwrap(), "Tue, 03 Jun 2008 11:05:30 Z");
    }

    #[test]
    fn formats_from_a_zoned_value() {
        let zoned = ZonedDateTime::of(
            sample().date_time(),
            ZoneId::of("UTC").unwrap(),
            &Strict,
        )
        .unwrap();
        assert_eq!(
            format_rfc1123(zoned.to_offset_date_time()).unwrap(),
            "Tue, 03 Jun 2008 11:05:30 Z"
        );
    }

    #[test]
    fn formats_nonzero_offsets_without_colon() {
        let odt = sample().with_offset_same_local(ZoneOffset::of_hours(2).unwrap());
        assert_eq!(
            format_rfc1123(odt).unwrap(),
            "Tue, 03 Jun 2008 11:05:30 +0200"
        );
        let negative = sample().with_offset_same_local(
            ZoneOffset::of_hours_minutes(-5, -30).unwrap(),
        );
        assert_eq!(
            format_rfc1123(negative).unwrap(),
            "Tue, 03 Jun 2008 11:05:30 -0530"
        );
    }

    #[test]
    fn rejects_unrepresentable_years() {
        let negative_year = LocalDateTime::of(
            LocalDate::of(-1, 6, 3).unwrap(),
            LocalTime::of(0, 0, 0, 0).unwrap(),
        )
        .at_offset(ZoneOffset::UTC);
        assert!(matches!(
            format_rfc1123(negative_year),
            Err(CivilError::ValueOutOfRange { .. })
        ));
        let big_year = LocalDateTime::of(
            LocalDate::of(10_000, 6, 3).unwrap(),
            LocalTime::of(0, 0, 0, 0).unwrap(),
        )
        .at_offset(ZoneOffset::UTC);
        assert!(format_rfc1123(big_year).is_err());
    }

    #[test]
    fn parses_and_round_trips() {
        let parsed = parse_rfc1123("Tue, 03 Jun 2008 11:05:30 Z").unwrap();
        assert_eq!(parsed, sample());
        // Case-insensitive names and alternate UTC spellings.
        assert_eq!(parse_rfc1123("tue, 03 jun 2008 11:05:30 GMT").unwrap(), sample());
        assert_eq!(parse_rfc1123("TUE, 03 JUN 2008 11:05:30 ut").unwrap(), sample());
        let offset = parse_rfc1123("Tue, 03 Jun 2008 11:05:30 +0200").unwrap();
        assert_eq!(offset.offset(), ZoneOffset::of_hours(2).unwrap());

        let text = format_rfc1123(sample()).unwrap();
        assert_eq!(parse_rfc1123(&text).unwrap(), sample());
    }

    #[test]
    fn rejects_inconsistent_day_of_week() {
        assert!(matches!(
            parse_rfc1123("Mon, 03 Jun 2008 11:05:30 Z"),
            Err(CivilError::Parse { .. })
        ));
    }
}
