//! A date paired with a wall-clock time, without a zone or offset.

use core::fmt;
use core::str::FromStr;

use crate::components::{LocalDate, LocalTime, OffsetDateTime, ZoneOffset};
use crate::fields::{Temporal, TemporalField, TemporalUnit, ValueRange};
use crate::utils;
use crate::{CivilError, CivilResult, NANOS_PER_DAY, SECONDS_PER_DAY};

/// A date-time without a zone or offset, such as 2008-06-30T11:05:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}

impl LocalDateTime {
    /// The smallest supported date-time.
    pub const MIN: LocalDateTime = LocalDateTime {
        date: LocalDate::MIN,
        time: LocalTime::MIDNIGHT,
    };
    /// The largest supported date-time.
    pub const MAX: LocalDateTime = LocalDateTime {
        date: LocalDate::MAX,
        time: LocalTime::MAX,
    };

    pub(crate) const fn new_unchecked(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// Combines a date and a time.
    pub const fn of(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// The date part.
    pub const fn date(self) -> LocalDate {
        self.date
    }

    /// The time part.
    pub const fn time(self) -> LocalTime {
        self.time
    }

    pub const fn year(self) -> i32 {
        self.date.year()
    }

    pub const fn month(self) -> u8 {
        self.date.month()
    }

    pub const fn day(self) -> u8 {
        self.date.day()
    }

    pub const fn hour(self) -> u8 {
        self.time.hour()
    }

    pub const fn minute(self) -> u8 {
        self.time.minute()
    }

    pub const fn second(self) -> u8 {
        self.time.second()
    }

    pub const fn nano(self) -> u32 {
        self.time.nano()
    }

    /// Replaces the date part.
    pub const fn with_date(self, date: LocalDate) -> Self {
        Self {
            date,
            time: self.time,
        }
    }

    /// Replaces the time part.
    pub const fn with_time(self, time: LocalTime) -> Self {
        Self {
            date: self.date,
            time,
        }
    }

    pub fn plus_years(self, years: i64) -> CivilResult<Self> {
        Ok(self.with_date(self.date.plus_years(years)?))
    }

    pub fn plus_months(self, months: i64) -> CivilResult<Self> {
        Ok(self.with_date(self.date.plus_months(months)?))
    }

    pub fn plus_weeks(self, weeks: i64) -> CivilResult<Self> {
        Ok(self.with_date(self.date.plus_weeks(weeks)?))
    }

    pub fn plus_days(self, days: i64) -> CivilResult<Self> {
        Ok(self.with_date(self.date.plus_days(days)?))
    }

    pub fn plus_hours(self, hours: i64) -> CivilResult<Self> {
        self.plus_scaled(hours, 3_600_000_000_000)
    }

    pub fn plus_minutes(self, minutes: i64) -> CivilResult<Self> {
        self.plus_scaled(minutes, 60_000_000_000)
    }

    pub fn plus_seconds(self, seconds: i64) -> CivilResult<Self> {
        self.plus_scaled(seconds, 1_000_000_000)
    }

    pub fn plus_nanos(self, nanos: i64) -> CivilResult<Self> {
        self.plus_scaled(nanos, 1)
    }

    pub fn minus_days(self, days: i64) -> CivilResult<Self> {
        Ok(self.with_date(self.date.minus_days(days)?))
    }

    pub fn minus_hours(self, hours: i64) -> CivilResult<Self> {
        self.plus_total_nanos(-i128::from(hours) * 3_600_000_000_000)
    }

    pub fn minus_minutes(self, minutes: i64) -> CivilResult<Self> {
        self.plus_total_nanos(-i128::from(minutes) * 60_000_000_000)
    }

    pub fn minus_seconds(self, seconds: i64) -> CivilResult<Self> {
        self.plus_total_nanos(-i128::from(seconds) * 1_000_000_000)
    }

    pub fn minus_nanos(self, nanos: i64) -> CivilResult<Self> {
        self.plus_total_nanos(-i128::from(nanos))
    }

    fn plus_scaled(self, amount: i64, nanos_per_unit: i64) -> CivilResult<Self> {
        self.plus_total_nanos(i128::from(amount) * i128::from(nanos_per_unit))
    }

    /// Adds a nanosecond amount, carrying whole-day overflow into the date.
    fn plus_total_nanos(self, total: i128) -> CivilResult<Self> {
        let shifted = i128::from(self.time.nano_of_day() as i64) + total;
        let day_delta = i64::try_from(shifted.div_euclid(i128::from(NANOS_PER_DAY)))
            .map_err(|_| CivilError::ArithmeticOverflow)?;
        let time = LocalTime::of_nano_of_day_unchecked(
            shifted.rem_euclid(i128::from(NANOS_PER_DAY)) as u64,
        );
        Ok(Self {
            date: self.date.plus_days(day_delta)?,
            time,
        })
    }

    /// The epoch-second of this date-time at a fixed offset.
    pub fn to_epoch_second(self, offset: ZoneOffset) -> i64 {
        let epoch_day = self.date.to_epoch_day();
        epoch_day * i64::from(SECONDS_PER_DAY) + i64::from(self.time.second_of_day())
            - i64::from(offset.total_seconds())
    }

    /// The date-time at a fixed offset for an epoch-second and nanosecond.
    ///
    /// Fails with [`CivilError::ArithmeticOverflow`] when the instant lies
    /// beyond the materializable year range.
    pub fn from_epoch_second(
        epoch_second: i64,
        nano: u32,
        offset: ZoneOffset,
    ) -> CivilResult<Self> {
        let local_second =
            utils::checked_add(epoch_second, i64::from(offset.total_seconds()))?;
        let epoch_day = utils::floor_div(local_second, i64::from(SECONDS_PER_DAY));
        let second_of_day = utils::floor_mod(local_second, i64::from(SECONDS_PER_DAY));
        let date =
            LocalDate::from_epoch_day(epoch_day).map_err(|_| CivilError::ArithmeticOverflow)?;
        let time = LocalTime::of_nano_of_day_unchecked(
            second_of_day as u64 * u64::from(crate::NANOS_PER_SECOND) + u64::from(nano),
        );
        Ok(Self { date, time })
    }

    /// Pairs this date-time with a fixed offset.
    pub const fn at_offset(self, offset: ZoneOffset) -> OffsetDateTime {
        OffsetDateTime::new_unchecked(self, offset)
    }

    /// Resolves this date-time in a zone with the given policy.
    pub fn at_zone(
        self,
        zone: crate::zone::ZoneId,
        resolver: &dyn crate::zone::resolver::Resolver,
    ) -> CivilResult<crate::components::ZonedDateTime> {
        crate::components::ZonedDateTime::of(self, zone, resolver)
    }
}

impl Temporal for LocalDateTime {
    fn is_supported(&self, field: TemporalField) -> bool {
        field.is_date_based() || field.is_time_based()
    }

    fn range(&self, field: TemporalField) -> CivilResult<ValueRange> {
        if field.is_date_based() {
            self.date.range(field)
        } else if field.is_time_based() {
            self.time.range(field)
        } else {
            Err(CivilError::UnsupportedField { field })
        }
    }

    fn get(&self, field: TemporalField) -> CivilResult<i64> {
        if field.is_date_based() {
            self.date.get(field)
        } else {
            self.time.get(field)
        }
    }

    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self> {
        if field.is_date_based() {
            Ok(self.with_date(self.date.with(field, value)?))
        } else {
            Ok(self.with_time(self.time.with(field, value)?))
        }
    }

    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        match unit {
            TemporalUnit::Nanos => self.plus_nanos(amount),
            TemporalUnit::Micros => self.plus_scaled(amount, 1_000),
            TemporalUnit::Millis => self.plus_scaled(amount, 1_000_000),
            TemporalUnit::Seconds => self.plus_seconds(amount),
            TemporalUnit::Minutes => self.plus_minutes(amount),
            TemporalUnit::Hours => self.plus_hours(amount),
            TemporalUnit::HalfDays => self.plus_scaled(amount, 12 * 3_600_000_000_000),
            _ => Ok(self.with_date(self.date.plus(amount, unit)?)),
        }
    }

    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        if unit.is_time_based() {
            let days = self.date.days_until(end.date);
            let nanos = i128::from(days) * i128::from(NANOS_PER_DAY)
                + (i128::from(end.time.nano_of_day() as i64)
                    - i128::from(self.time.nano_of_day() as i64));
            let per_unit = match unit {
                TemporalUnit::Nanos => 1i128,
                TemporalUnit::Micros => 1_000,
                TemporalUnit::Millis => 1_000_000,
                TemporalUnit::Seconds => 1_000_000_000,
                TemporalUnit::Minutes => 60_000_000_000,
                TemporalUnit::Hours => 3_600_000_000_000,
                _ => 12 * 3_600_000_000_000,
            };
            i64::try_from(nanos / per_unit).map_err(|_| CivilError::ArithmeticOverflow)
        } else {
            let mut end_date = end.date;
            if end_date > self.date && end.time < self.time {
                end_date = end_date.minus_days(1)?;
            } else if end_date < self.date && end.time > self.time {
                end_date = end_date.plus_days(1)?;
            }
            self.date.until(&end_date, unit)
        }
    }
}

impl fmt::Display for LocalDateTime {
    /// The ISO-8601 form, such as `2008-06-30T11:05:30`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl FromStr for LocalDateTime {
    type Err = CivilError;

    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_local_date_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> LocalDateTime {
        LocalDateTime::of(
            LocalDate::of(year, month, day).unwrap(),
            LocalTime::of(hour, minute, 0, 0).unwrap(),
        )
    }

    #[test]
    fn time_arithmetic_carries_days() {
        let base = dt(2008, 6, 30, 23, 30);
        assert_eq!(base.plus_hours(1).unwrap(), dt(2008, 7, 1, 0, 30));
        assert_eq!(base.plus_minutes(30).unwrap(), dt(2008, 7, 1, 0, 0));
        assert_eq!(dt(2008, 1, 1, 0, 0).minus_hours(1).unwrap(), dt(2007, 12, 31, 23, 0));
        assert_eq!(base.plus_seconds(86_400).unwrap(), dt(2008, 7, 1, 23, 30));
    }

    #[test]
    fn epoch_second_round_trip() {
        let base = dt(2008, 6, 30, 11, 5);
        let offset = ZoneOffset::of_hours(2).unwrap();
        let epoch_second = base.to_epoch_second(offset);
        assert_eq!(
            LocalDateTime::from_epoch_second(epoch_second, 0, offset).unwrap(),
            base
        );
        assert_eq!(dt(1970, 1, 1, 0, 0).to_epoch_second(ZoneOffset::UTC), 0);
        assert_eq!(
            dt(1970, 1, 1, 0, 0).to_epoch_second(ZoneOffset::of_hours(1).unwrap()),
            -3600
        );
    }

    #[test]
    fn from_epoch_second_beyond_range_overflows() {
        assert_eq!(
            LocalDateTime::from_epoch_second(i64::MAX - 10, 0, ZoneOffset::UTC),
            Err(CivilError::ArithmeticOverflow)
        );
    }

    #[test]
    fn field_dispatch() {
        let base = dt(2008, 6, 30, 11, 5);
        assert_eq!(base.get(TemporalField::HourOfDay).unwrap(), 11);
        assert_eq!(base.get(TemporalField::DayOfMonth).unwrap(), 30);
        assert_eq!(
            base.with(TemporalField::HourOfDay, 0).unwrap(),
            dt(2008, 6, 30, 0, 5)
        );
        assert_eq!(
            base.with(TemporalField::MonthOfYear, 2).unwrap(),
            dt(2008, 2, 29, 11, 5)
        );
        assert_eq!(
            base.get(TemporalField::InstantSeconds),
            Err(CivilError::UnsupportedField {
                field: TemporalField::InstantSeconds
            })
        );
    }

    #[test]
    fn plus_unit_round_trip() {
        let base = dt(2008, 3, 30, 1, 30);
        for unit in [
            TemporalUnit::Nanos,
            TemporalUnit::Seconds,
            TemporalUnit::Minutes,
            TemporalUnit::Hours,
            TemporalUnit::HalfDays,
            TemporalUnit::Days,
            TemporalUnit::Weeks,
            TemporalUnit::Years,
        ] {
            let moved = base.plus(5, unit).unwrap();
            assert_eq!(moved.minus(5, unit).unwrap(), base, "{unit}");
        }
    }

    #[test]
    fn until_mixed_units() {
        let start = dt(2008, 6, 30, 23, 0);
        let end = dt(2008, 7, 1, 1, 0);
        assert_eq!(start.until(&end, TemporalUnit::Hours).unwrap(), 2);
        assert_eq!(start.until(&end, TemporalUnit::Days).unwrap(), 0);
        let full_day = dt(2008, 7, 1, 23, 0);
        assert_eq!(start.until(&full_day, TemporalUnit::Days).unwrap(), 1);
        assert_eq!(end.until(&start, TemporalUnit::Hours).unwrap(), -2);
    }
}
