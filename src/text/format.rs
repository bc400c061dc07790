//! Printers for the ISO-8601 text forms.
//!
//! The core writers are plain `fmt::Write` functions shared by the value
//! types' `Display` impls; the `Formattable*` wrappers expose the same
//! output through [`Writeable`] with exact length hints.

use core::fmt::{self, Write};

use writeable::{LengthHint, Writeable};

use crate::components::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZoneOffset};

/// Writes a proleptic year: padded to four digits, `-` for negative years,
/// and an explicit `+` for years beyond 9999.
pub(crate) fn write_year<W: Write + ?Sized>(out: &mut W, year: i32) -> fmt::Result {
    let abs = i64::from(year).unsigned_abs();
    if year < 0 {
        out.write_char('-')?;
    } else if year > 9999 {
        out.write_char('+')?;
    }
    if abs < 10_000 {
        write!(out, "{abs:04}")
    } else {
        write!(out, "{abs}")
    }
}

/// `YYYY-MM-DD`.
pub(crate) fn write_date<W: Write + ?Sized>(out: &mut W, date: LocalDate) -> fmt::Result {
    write_year(out, date.year())?;
    write!(out, "-{:02}-{:02}", date.month(), date.day())
}

/// `HH:MM:SS[.fff[fff[fff]]]` with seconds always present and the fraction
/// elided when zero, printed in three-digit groups.
pub(crate) fn write_time<W: Write + ?Sized>(out: &mut W, time: LocalTime) -> fmt::Result {
    write!(
        out,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )?;
    let nano = time.nano();
    if nano == 0 {
        return Ok(());
    }
    if nano % 1_000_000 == 0 {
        write!(out, ".{:03}", nano / 1_000_000)
    } else if nano % 1_000 == 0 {
        write!(out, ".{:06}", nano / 1_000)
    } else {
        write!(out, ".{nano:09}")
    }
}

/// `YYYY-DDD`.
pub(crate) fn write_ordinal_date<W: Write + ?Sized>(out: &mut W, date: LocalDate) -> fmt::Result {
    write_year(out, date.year())?;
    write!(out, "-{:03}", date.day_of_year())
}

/// `YYYY-Www-D` from precomputed week fields.
pub(crate) fn write_week_date<W: Write + ?Sized>(
    out: &mut W,
    week_based_year: i32,
    week: u8,
    day_of_week: u8,
) -> fmt::Result {
    write_year(out, week_based_year)?;
    write!(out, "-W{week:02}-{day_of_week}")
}

fn year_length_hint(year: i32) -> usize {
    let digits = i64::from(year).unsigned_abs().to_string().len().max(4);
    digits + usize::from(year < 0 || year > 9999)
}

/// A date as `Writeable`, printing the ISO local date form.
#[derive(Debug, Clone, Copy)]
pub struct FormattableDate(pub LocalDate);

impl Writeable for FormattableDate {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_date(sink, self.0)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(year_length_hint(self.0.year()) + 6)
    }
}

writeable::impl_display_with_writeable!(FormattableDate);

/// A time as `Writeable`, printing the ISO local time form.
#[derive(Debug, Clone, Copy)]
pub struct FormattableTime(pub LocalTime);

impl Writeable for FormattableTime {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_time(sink, self.0)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let nano = self.0.nano();
        let fraction = if nano == 0 {
            0
        } else if nano % 1_000_000 == 0 {
            4
        } else if nano % 1_000 == 0 {
            7
        } else {
            10
        };
        LengthHint::exact(8 + fraction)
    }
}

writeable::impl_display_with_writeable!(FormattableTime);

/// An offset as `Writeable`, printing the canonical offset identifier.
#[derive(Debug, Clone, Copy)]
pub struct FormattableOffset(pub ZoneOffset);

impl Writeable for FormattableOffset {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write!(sink, "{}", self.0)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let total = self.0.total_seconds();
        LengthHint::exact(if total == 0 {
            1
        } else if total % 60 == 0 {
            6
        } else {
            9
        })
    }
}

writeable::impl_display_with_writeable!(FormattableOffset);

/// A date-time as `Writeable`, printing the ISO local date-time form.
#[derive(Debug, Clone, Copy)]
pub struct FormattableDateTime(pub LocalDateTime);

impl Writeable for FormattableDateTime {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_date(sink, self.0.date())?;
        sink.write_char('T')?;
        write_time(sink, self.0.time())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattableDate(self.0.date()).writeable_length_hint()
            + LengthHint::exact(1)
            + FormattableTime(self.0.time()).writeable_length_hint()
    }
}

writeable::impl_display_with_writeable!(FormattableDateTime);

/// An offset date-time as `Writeable`.
#[derive(Debug, Clone, Copy)]
pub struct FormattableOffsetDateTime(pub OffsetDateTime);

impl Writeable for FormattableOffsetDateTime {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        FormattableDateTime(self.0.date_time()).write_to(sink)?;
        FormattableOffset(self.0.offset()).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattableDateTime(self.0.date_time()).writeable_length_hint()
            + FormattableOffset(self.0.offset()).writeable_length_hint()
    }
}

writeable::impl_display_with_writeable!(FormattableOffsetDateTime);

#[cfg(test)]
mod tests {
    use super::*;
    use writeable::assert_writeable_eq;

    #[test]
    fn year_padding_and_signs() {
        let mut out = String::new();
        write_year(&mut out, 2008).unwrap();
        assert_eq!(out, "2008");
        out.clear();
        write_year(&mut out, 123).unwrap();
        assert_eq!(out, "0123");
        out.clear();
        write_year(&mut out, -999).unwrap();
        assert_eq!(out, "-0999");
        out.clear();
        write_year(&mut out, 10_000).unwrap();
        assert_eq!(out, "+10000");
        out.clear();
        write_year(&mut out, 999_999_999).unwrap();
        assert_eq!(out, "+999999999");
    }

    #[test]
    fn writeable_hints_are_exact() {
        assert_writeable_eq!(
            FormattableDate(LocalDate::of(2008, 6, 30).unwrap()),
            "2008-06-30"
        );
        assert_writeable_eq!(
            FormattableDate(LocalDate::of(999_999_999, 8, 6).unwrap()),
            "+999999999-08-06"
        );
        assert_writeable_eq!(
            FormattableTime(LocalTime::of(11, 5, 30, 0).unwrap()),
            "11:05:30"
        );
        assert_writeable_eq!(
            FormattableTime(LocalTime::of(11, 5, 30, 123_000_000).unwrap()),
            "11:05:30.123"
        );
        assert_writeable_eq!(
            FormattableTime(LocalTime::of(11, 5, 30, 123_456_789).unwrap()),
            "11:05:30.123456789"
        );
        assert_writeable_eq!(
            FormattableOffset(ZoneOffset::of_hours(-5).unwrap()),
            "-05:00"
        );
        assert_writeable_eq!(FormattableOffset(ZoneOffset::UTC), "Z");
    }
}
