//! Strict hand-rolled parsers for the ISO-8601 text forms.
//!
//! Parsing never reinterprets out-of-range values; any violation surfaces as
//! [`CivilError::Parse`] with the offending index.

use crate::components::{
    DayOfWeek, Duration, LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZoneOffset,
    ZonedDateTime,
};
use crate::zone::ZoneId;
use crate::{CivilError, CivilResult};

pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn err(&self, message: &'static str) -> CivilError {
        CivilError::parse(self.input, self.pos, message)
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, byte: u8, message: &'static str) -> CivilResult<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.err(message))
        }
    }

    fn digit(&mut self) -> CivilResult<u32> {
        match self.peek() {
            Some(byte @ b'0'..=b'9') => {
                self.pos += 1;
                Ok(u32::from(byte - b'0'))
            }
            _ => Err(self.err("expected a digit")),
        }
    }

    pub(crate) fn two_digits(&mut self) -> CivilResult<u32> {
        Ok(self.digit()? * 10 + self.digit()?)
    }

    pub(crate) fn digits(&mut self, min: usize, max: usize) -> CivilResult<i64> {
        let mut count = 0usize;
        let mut value = 0i64;
        while count < max {
            match self.peek() {
                Some(byte @ b'0'..=b'9') => {
                    self.pos += 1;
                    value = value * 10 + i64::from(byte - b'0');
                    count += 1;
                }
                _ => break,
            }
        }
        if count < min {
            return Err(self.err("expected more digits"));
        }
        Ok(value)
    }

    pub(crate) fn finish(&self) -> CivilResult<()> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.err("unparsed trailing text"))
        }
    }
}

fn date_error(cursor: &Cursor<'_>, error: CivilError) -> CivilError {
    match error {
        CivilError::DateNotValid { .. } => cursor.err("day does not exist in that month"),
        CivilError::WeekNotValid { .. } => {
            cursor.err("week does not exist in that week-based year")
        }
        _ => cursor.err("date-time field out of range"),
    }
}

/// A proleptic year: four digits, or a mandatory sign with four to nine
/// digits.
fn year(cursor: &mut Cursor<'_>) -> CivilResult<i32> {
    let negative = match cursor.peek() {
        Some(b'+') => {
            cursor.pos += 1;
            false
        }
        Some(b'-') => {
            cursor.pos += 1;
            true
        }
        _ => {
            return Ok(cursor.digits(4, 4)? as i32);
        }
    };
    let value = cursor.digits(4, 9)?;
    let signed = if negative { -value } else { value };
    Ok(signed as i32)
}

fn month_day(cursor: &mut Cursor<'_>) -> CivilResult<(u32, u32)> {
    cursor.expect(b'-', "expected '-' before the month")?;
    let month = cursor.two_digits()?;
    cursor.expect(b'-', "expected '-' before the day")?;
    let day = cursor.two_digits()?;
    Ok((month, day))
}

pub(crate) fn date(cursor: &mut Cursor<'_>) -> CivilResult<LocalDate> {
    let year = year(cursor)?;
    let (month, day) = month_day(cursor)?;
    LocalDate::of(year, month as u8, day as u8).map_err(|e| date_error(cursor, e))
}

pub(crate) fn time(cursor: &mut Cursor<'_>) -> CivilResult<LocalTime> {
    let hour = cursor.two_digits()?;
    cursor.expect(b':', "expected ':' after the hour")?;
    let minute = cursor.two_digits()?;
    let (second, nano) = if cursor.eat(b':') {
        let second = cursor.two_digits()?;
        let nano = if cursor.eat(b'.') {
            let start = cursor.pos;
            let digits = cursor.digits(1, 9)?;
            let count = cursor.pos - start;
            (digits * 10i64.pow(9 - count as u32)) as u32
        } else {
            0
        };
        (second, nano)
    } else {
        (0, 0)
    };
    LocalTime::of(hour as u8, minute as u8, second as u8, nano)
        .map_err(|e| date_error(cursor, e))
}

pub(crate) fn offset(cursor: &mut Cursor<'_>) -> CivilResult<ZoneOffset> {
    match cursor.bump() {
        Some(b'Z' | b'z') => Ok(ZoneOffset::UTC),
        Some(sign @ (b'+' | b'-')) => {
            let hours = cursor.two_digits()? as i32;
            let mut total = hours * 3600;
            if cursor.eat(b':') {
                total += cursor.two_digits()? as i32 * 60;
                if cursor.eat(b':') {
                    total += cursor.two_digits()? as i32;
                }
            }
            if sign == b'-' {
                total = -total;
            }
            ZoneOffset::of_total_seconds(total)
                .map_err(|_| cursor.err("offset outside the range -18:00 to +18:00"))
        }
        _ => Err(cursor.err("expected an offset: 'Z' or a signed hour")),
    }
}

// ==== Whole-string entry points ====

pub(crate) fn parse_local_date(input: &str) -> CivilResult<LocalDate> {
    let mut cursor = Cursor::new(input);
    let value = date(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}

pub(crate) fn parse_local_time(input: &str) -> CivilResult<LocalTime> {
    let mut cursor = Cursor::new(input);
    let value = time(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}

fn date_time(cursor: &mut Cursor<'_>) -> CivilResult<LocalDateTime> {
    let date = date(cursor)?;
    cursor.expect(b'T', "expected 'T' between date and time")?;
    let time = time(cursor)?;
    Ok(LocalDateTime::of(date, time))
}

pub(crate) fn parse_local_date_time(input: &str) -> CivilResult<LocalDateTime> {
    let mut cursor = Cursor::new(input);
    let value = date_time(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}

pub(crate) fn parse_offset(input: &str) -> CivilResult<ZoneOffset> {
    let mut cursor = Cursor::new(input);
    let value = offset(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}

pub(crate) fn parse_offset_date_time(input: &str) -> CivilResult<OffsetDateTime> {
    let mut cursor = Cursor::new(input);
    let local = date_time(&mut cursor)?;
    let offset = offset(&mut cursor)?;
    cursor.finish()?;
    Ok(OffsetDateTime::of(local, offset))
}

pub(crate) fn parse_zoned_date_time(input: &str) -> CivilResult<ZonedDateTime> {
    let mut cursor = Cursor::new(input);
    let local = date_time(&mut cursor)?;
    let offset = offset(&mut cursor)?;
    let value = OffsetDateTime::of(local, offset);
    let zone = if cursor.eat(b'[') {
        let start = cursor.pos;
        while cursor.peek().is_some_and(|byte| byte != b']') {
            cursor.pos += 1;
        }
        let region = &cursor.input[start..cursor.pos];
        cursor.expect(b']', "expected ']' after the zone identifier")?;
        // Unchecked so text round-trips do not depend on registry contents.
        ZoneId::unchecked(region)?
    } else {
        ZoneId::from_offset(offset)
    };
    cursor.finish()?;
    if zone.as_offset().is_some() {
        // Offset zones accept the value as-is; the pair is self-consistent.
        ZonedDateTime::of_offset_date_time(value, zone)
    } else {
        match zone.rules() {
            Ok(_) => ZonedDateTime::of_offset_date_time(value, zone),
            // Unknown regions keep the parsed offset, failing later at rules
            // access rather than during parsing.
            Err(CivilError::UnknownZone { .. }) => {
                Ok(new_zoned_unchecked(value, zone))
            }
            Err(e) => Err(e),
        }
    }
}

fn new_zoned_unchecked(value: OffsetDateTime, zone: ZoneId) -> ZonedDateTime {
    // Reuses the offset-zone acceptance path with the region attached.
    ZonedDateTime::of_parts_unchecked(value.date_time(), value.offset(), zone)
}

pub(crate) fn parse_ordinal_date(input: &str) -> CivilResult<LocalDate> {
    let mut cursor = Cursor::new(input);
    let year = year(&mut cursor)?;
    cursor.expect(b'-', "expected '-' before the day of year")?;
    let day_of_year = cursor.digits(3, 3)?;
    cursor.finish()?;
    LocalDate::of_year_day(year, day_of_year as u16).map_err(|e| date_error(&cursor, e))
}

pub(crate) fn parse_week_date(input: &str) -> CivilResult<LocalDate> {
    let mut cursor = Cursor::new(input);
    let week_based_year = year(&mut cursor)?;
    cursor.expect(b'-', "expected '-' before the week")?;
    cursor.expect(b'W', "expected 'W' before the week number")?;
    let week = cursor.two_digits()?;
    cursor.expect(b'-', "expected '-' before the day of week")?;
    let day = cursor.digits(1, 1)?;
    cursor.finish()?;
    let day_of_week =
        DayOfWeek::of(day as u8).map_err(|_| cursor.err("day of week must be 1 to 7"))?;
    LocalDate::of_week_date(week_based_year, week as u8, day_of_week)
        .map_err(|e| date_error(&cursor, e))
}

pub(crate) fn parse_basic_date(input: &str) -> CivilResult<LocalDate> {
    let mut cursor = Cursor::new(input);
    let year = cursor.digits(4, 4)?;
    let month = cursor.two_digits()?;
    let day = cursor.two_digits()?;
    cursor.finish()?;
    LocalDate::of(year as i32, month as u8, day as u8).map_err(|e| date_error(&cursor, e))
}

pub(crate) fn parse_offset_date(input: &str) -> CivilResult<(LocalDate, ZoneOffset)> {
    let mut cursor = Cursor::new(input);
    let date = date(&mut cursor)?;
    let offset = offset(&mut cursor)?;
    cursor.finish()?;
    Ok((date, offset))
}

pub(crate) fn parse_offset_time(input: &str) -> CivilResult<(LocalTime, ZoneOffset)> {
    let mut cursor = Cursor::new(input);
    let time = time(&mut cursor)?;
    let offset = offset(&mut cursor)?;
    cursor.finish()?;
    Ok((time, offset))
}

// ==== Durations ====

pub(crate) fn parse_duration(input: &str) -> CivilResult<Duration> {
    let mut cursor = Cursor::new(input);
    let negate = match cursor.peek() {
        Some(b'-') => {
            cursor.pos += 1;
            true
        }
        Some(b'+') => {
            cursor.pos += 1;
            false
        }
        _ => false,
    };
    if !(cursor.eat(b'P') || cursor.eat(b'p')) {
        return Err(cursor.err("expected 'P'"));
    }

    let mut any = false;
    let mut total_seconds = 0i64;
    let mut nanos = 0i64;

    if let Some(days) = duration_component(&mut cursor, b'D')? {
        total_seconds = days
            .checked_mul(86_400)
            .ok_or(CivilError::ArithmeticOverflow)?;
        any = true;
    }

    if cursor.eat(b'T') || cursor.eat(b't') {
        let mut any_time = false;
        if let Some(hours) = duration_component(&mut cursor, b'H')? {
            let seconds = hours
                .checked_mul(3600)
                .ok_or(CivilError::ArithmeticOverflow)?;
            total_seconds = total_seconds
                .checked_add(seconds)
                .ok_or(CivilError::ArithmeticOverflow)?;
            any_time = true;
        }
        if let Some(minutes) = duration_component(&mut cursor, b'M')? {
            let seconds = minutes
                .checked_mul(60)
                .ok_or(CivilError::ArithmeticOverflow)?;
            total_seconds = total_seconds
                .checked_add(seconds)
                .ok_or(CivilError::ArithmeticOverflow)?;
            any_time = true;
        }
        if let Some((seconds, fraction)) = duration_seconds(&mut cursor)? {
            total_seconds = total_seconds
                .checked_add(seconds)
                .ok_or(CivilError::ArithmeticOverflow)?;
            nanos = fraction;
            any_time = true;
        }
        if !any_time {
            return Err(cursor.err("'T' must be followed by a time component"));
        }
        any = true;
    }

    if !any {
        return Err(cursor.err("duration has no components"));
    }
    cursor.finish()?;

    let duration = Duration::of_seconds_adjusted(total_seconds, nanos)?;
    if negate {
        duration.negated()
    } else {
        Ok(duration)
    }
}

/// A signed integer component terminated by `marker` (case-insensitive),
/// returning `None` without consuming when the component is absent.
fn duration_component(cursor: &mut Cursor<'_>, marker: u8) -> CivilResult<Option<i64>> {
    let start = cursor.pos;
    let negative = match cursor.peek() {
        Some(b'-') => {
            cursor.pos += 1;
            true
        }
        Some(b'+') => {
            cursor.pos += 1;
            false
        }
        _ => false,
    };
    if !cursor.peek().is_some_and(|byte| byte.is_ascii_digit()) {
        cursor.pos = start;
        return Ok(None);
    }
    let value = cursor.digits(1, 18)?;
    let upper = cursor.peek().map(|byte| byte.to_ascii_uppercase());
    if upper != Some(marker) {
        cursor.pos = start;
        return Ok(None);
    }
    cursor.pos += 1;
    Ok(Some(if negative { -value } else { value }))
}

/// The seconds component with an optional fraction, returning the fraction
/// in signed nanoseconds.
fn duration_seconds(cursor: &mut Cursor<'_>) -> CivilResult<Option<(i64, i64)>> {
    let start = cursor.pos;
    let negative = match cursor.peek() {
        Some(b'-') => {
            cursor.pos += 1;
            true
        }
        Some(b'+') => {
            cursor.pos += 1;
            false
        }
        _ => false,
    };
    if !cursor.peek().is_some_and(|byte| byte.is_ascii_digit()) {
        cursor.pos = start;
        return Ok(None);
    }
    let seconds = cursor.digits(1, 18)?;
    let mut nanos = 0i64;
    if cursor.eat(b'.') {
        let fraction_start = cursor.pos;
        let digits = cursor.digits(1, 9)?;
        let count = cursor.pos - fraction_start;
        nanos = digits * 10i64.pow(9 - count as u32);
    }
    let upper = cursor.peek().map(|byte| byte.to_ascii_uppercase());
    if upper != Some(b'S') {
        cursor.pos = start;
        return Ok(None);
    }
    cursor.pos += 1;
    Ok(Some(if negative {
        (-seconds, -nanos)
    } else {
        (seconds, nanos)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Temporal;
    use crate::fields::TemporalUnit;

    #[test]
    fn local_date_forms() {
        assert_eq!(
            parse_local_date("2008-06-30").unwrap(),
            LocalDate::of(2008, 6, 30).unwrap()
        );
        assert_eq!(
            parse_local_date("-0999-01-02").unwrap(),
            LocalDate::of(-999, 1, 2).unwrap()
        );
        assert_eq!(
            parse_local_date("+999999999-08-06").unwrap(),
            LocalDate::of(999_999_999, 8, 6).unwrap()
        );
        for bad in [
            "2008-6-30",
            "2008/06/30",
            "20080630",
            "12008-06-30",
            "2008-13-01",
            "2007-02-29",
            "2008-06-30x",
            "",
        ] {
            assert!(
                matches!(parse_local_date(bad), Err(CivilError::Parse { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn local_time_forms() {
        assert_eq!(
            parse_local_time("11:05").unwrap(),
            LocalTime::of(11, 5, 0, 0).unwrap()
        );
        assert_eq!(
            parse_local_time("11:05:30").unwrap(),
            LocalTime::of(11, 5, 30, 0).unwrap()
        );
        assert_eq!(
            parse_local_time("11:05:30.123456789").unwrap(),
            LocalTime::of(11, 5, 30, 123_456_789).unwrap()
        );
        assert_eq!(
            parse_local_time("11:05:30.5").unwrap(),
            LocalTime::of(11, 5, 30, 500_000_000).unwrap()
        );
        for bad in ["24:00", "11:60", "11:05:61", "11:05:30.", "11", "11:05:30.0000000001"] {
            assert!(
                matches!(parse_local_time(bad), Err(CivilError::Parse { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn offset_forms() {
        assert_eq!(parse_offset("Z").unwrap(), ZoneOffset::UTC);
        assert_eq!(parse_offset("z").unwrap(), ZoneOffset::UTC);
        assert_eq!(
            parse_offset("+01:00").unwrap(),
            ZoneOffset::of_hours(1).unwrap()
        );
        assert_eq!(parse_offset("+01").unwrap(), ZoneOffset::of_hours(1).unwrap());
        assert_eq!(
            parse_offset("-05:30:30").unwrap(),
            ZoneOffset::of_hours_minutes_seconds(-5, -30, -30).unwrap()
        );
        for bad in ["+19:00", "01:00", "+1:00", "+01:0"] {
            assert!(
                matches!(parse_offset(bad), Err(CivilError::Parse { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn composed_forms() {
        let local = parse_local_date_time("2008-06-30T11:05:30").unwrap();
        assert_eq!(local.date(), LocalDate::of(2008, 6, 30).unwrap());
        assert_eq!(local.time(), LocalTime::of(11, 5, 30, 0).unwrap());

        let odt = parse_offset_date_time("2008-06-30T11:05:30+02:00").unwrap();
        assert_eq!(odt.offset(), ZoneOffset::of_hours(2).unwrap());

        let (date, offset) = parse_offset_date("2008-06-30+02:00").unwrap();
        assert_eq!(date, LocalDate::of(2008, 6, 30).unwrap());
        assert_eq!(offset, ZoneOffset::of_hours(2).unwrap());

        let (time, offset) = parse_offset_time("11:05:30Z").unwrap();
        assert_eq!(time, LocalTime::of(11, 5, 30, 0).unwrap());
        assert_eq!(offset, ZoneOffset::UTC);

        assert!(parse_offset_date_time("2008-06-30T11:05:30").is_err());
    }

    #[test]
    fn zoned_form() {
        let zoned = parse_zoned_date_time("2008-06-30T11:05:30+02:00[Europe/Paris]").unwrap();
        assert_eq!(zoned.zone().id(), "Europe/Paris");
        assert_eq!(zoned.offset(), ZoneOffset::of_hours(2).unwrap());

        let offset_only = parse_zoned_date_time("2008-06-30T11:05:30+02:00").unwrap();
        assert_eq!(offset_only.zone().id(), "+02:00");

        // Unknown regions parse; rules access fails later.
        let unknown = parse_zoned_date_time("2008-06-30T11:05:30+02:00[Mars/Olympus]").unwrap();
        assert_eq!(unknown.zone().id(), "Mars/Olympus");
        assert!(unknown.zone().rules().is_err());

        // A wrong offset for a known zone is rejected.
        assert!(matches!(
            parse_zoned_date_time("2008-06-30T11:05:30+05:00[Europe/Paris]"),
            Err(CivilError::OffsetInvalidForZone { .. })
        ));
    }

    #[test]
    fn ordinal_and_week_and_basic_dates() {
        assert_eq!(
            parse_ordinal_date("2008-155").unwrap(),
            LocalDate::of(2008, 6, 3).unwrap()
        );
        assert!(parse_ordinal_date("2007-366").is_err());
        assert_eq!(
            parse_week_date("2004-W05-2").unwrap(),
            LocalDate::of(2004, 1, 27).unwrap()
        );
        assert!(parse_week_date("2005-W53-1").is_err());
        assert!(parse_week_date("2004-W05-8").is_err());
        assert_eq!(
            parse_basic_date("20080630").unwrap(),
            LocalDate::of(2008, 6, 30).unwrap()
        );
        assert!(parse_basic_date("2008-06-30").is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("PT0S").unwrap(), Duration::ZERO);
        assert_eq!(
            parse_duration("PT2H30M").unwrap(),
            Duration::of_seconds(9000)
        );
        assert_eq!(
            parse_duration("P2DT3H4M5S").unwrap(),
            Duration::of_seconds(2 * 86_400 + 3 * 3600 + 4 * 60 + 5)
        );
        assert_eq!(
            parse_duration("PT-0.5S").unwrap(),
            Duration::of_seconds_adjusted(-1, 500_000_000).unwrap()
        );
        assert_eq!(
            parse_duration("-PT6H").unwrap(),
            Duration::of_hours(-6).unwrap()
        );
        assert_eq!(parse_duration("PT1.5S").unwrap(), Duration::of_millis(1500));
        for bad in ["P", "PT", "P1Y", "PT1W", "1H", "PT1H2X"] {
            assert!(parse_duration(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn duration_text_round_trip() {
        for value in [
            Duration::ZERO,
            Duration::of_seconds(9000),
            Duration::of_millis(-1500),
            Duration::of_nanos(1),
            Duration::of_seconds_adjusted(-1, 500_000_000).unwrap(),
            Duration::of_seconds(-61),
        ] {
            let text = value.to_string();
            assert_eq!(parse_duration(&text).unwrap(), value, "{text}");
        }
    }

    #[test]
    fn display_parse_round_trip_for_principal_types() {
        let date = LocalDate::of(2008, 6, 30).unwrap();
        assert_eq!(date.to_string().parse::<LocalDate>().unwrap(), date);

        let big = LocalDate::of(999_999_999, 8, 6).unwrap();
        assert_eq!(big.to_string(), "+999999999-08-06");
        assert_eq!(big.to_string().parse::<LocalDate>().unwrap(), big);

        let time = LocalTime::of(11, 5, 30, 123_000_000).unwrap();
        assert_eq!(time.to_string().parse::<LocalTime>().unwrap(), time);

        let local = LocalDateTime::of(date, time);
        assert_eq!(local.to_string(), "2008-06-30T11:05:30.123");
        assert_eq!(local.to_string().parse::<LocalDateTime>().unwrap(), local);

        let odt = local.at_offset(ZoneOffset::of_hours_minutes(5, 30).unwrap());
        assert_eq!(odt.to_string(), "2008-06-30T11:05:30.123+05:30");
        assert_eq!(odt.to_string().parse::<OffsetDateTime>().unwrap(), odt);

        // An instant formats at UTC and parses from any offset.
        let instant = odt.to_instant();
        assert_eq!(
            odt.to_string().parse::<crate::components::Instant>().unwrap(),
            instant
        );
    }

    #[test]
    fn parse_is_strict_about_ranges() {
        let err = parse_local_date("2008-00-01").unwrap_err();
        match err {
            CivilError::Parse { error_index, .. } => assert!(error_index > 0),
            other => panic!("unexpected error {other:?}"),
        }
        // Minutes and hours never wrap.
        assert!(parse_local_time("11:99").is_err());
        assert!(
            LocalTime::of(11, 5, 0, 0)
                .unwrap()
                .plus(0, TemporalUnit::Hours)
                .is_ok()
        );
    }
}
