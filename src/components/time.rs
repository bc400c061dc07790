//! A wall-clock time of day without a date or zone.

use core::fmt;
use core::str::FromStr;

use crate::fields::{Temporal, TemporalField, TemporalUnit};
use crate::utils;
use crate::{CivilError, CivilResult, NANOS_PER_DAY};

const NANOS_PER_HOUR: i64 = 3_600_000_000_000;
const NANOS_PER_MINUTE: i64 = 60_000_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A time of day to nanosecond precision, such as 11:05:30.
///
/// Stored as a single nanosecond-of-day for fast arithmetic; the four-field
/// form is reachable through the accessors and [`LocalTime::of`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    nano_of_day: u64,
}

impl LocalTime {
    /// 00:00.
    pub const MIDNIGHT: LocalTime = LocalTime { nano_of_day: 0 };
    /// 12:00.
    pub const NOON: LocalTime = LocalTime {
        nano_of_day: 12 * NANOS_PER_HOUR as u64,
    };
    /// The smallest time of day, 00:00.
    pub const MIN: LocalTime = LocalTime::MIDNIGHT;
    /// The largest time of day, 23:59:59.999999999.
    pub const MAX: LocalTime = LocalTime {
        nano_of_day: NANOS_PER_DAY as u64 - 1,
    };

    pub(crate) const fn of_nano_of_day_unchecked(nano_of_day: u64) -> Self {
        Self { nano_of_day }
    }

    /// A time from an hour, minute, second, and nanosecond, each validated.
    pub fn of(hour: u8, minute: u8, second: u8, nano: u32) -> CivilResult<Self> {
        TemporalField::HourOfDay
            .base_range()
            .check(i64::from(hour), TemporalField::HourOfDay)?;
        TemporalField::MinuteOfHour
            .base_range()
            .check(i64::from(minute), TemporalField::MinuteOfHour)?;
        TemporalField::SecondOfMinute
            .base_range()
            .check(i64::from(second), TemporalField::SecondOfMinute)?;
        TemporalField::NanoOfSecond
            .base_range()
            .check(i64::from(nano), TemporalField::NanoOfSecond)?;
        Ok(Self {
            nano_of_day: u64::from(hour) * NANOS_PER_HOUR as u64
                + u64::from(minute) * NANOS_PER_MINUTE as u64
                + u64::from(second) * NANOS_PER_SECOND as u64
                + u64::from(nano),
        })
    }

    /// A time from a second-of-day count.
    pub fn of_second_of_day(second_of_day: u32) -> CivilResult<Self> {
        TemporalField::SecondOfDay
            .base_range()
            .check(i64::from(second_of_day), TemporalField::SecondOfDay)?;
        Ok(Self {
            nano_of_day: u64::from(second_of_day) * NANOS_PER_SECOND as u64,
        })
    }

    /// A time from a nanosecond-of-day count.
    pub fn of_nano_of_day(nano_of_day: i64) -> CivilResult<Self> {
        TemporalField::NanoOfDay
            .base_range()
            .check(nano_of_day, TemporalField::NanoOfDay)?;
        Ok(Self {
            nano_of_day: nano_of_day as u64,
        })
    }

    /// The hour of the day, 0 to 23.
    pub const fn hour(self) -> u8 {
        (self.nano_of_day / NANOS_PER_HOUR as u64) as u8
    }

    /// The minute of the hour, 0 to 59.
    pub const fn minute(self) -> u8 {
        ((self.nano_of_day / NANOS_PER_MINUTE as u64) % 60) as u8
    }

    /// The second of the minute, 0 to 59.
    pub const fn second(self) -> u8 {
        ((self.nano_of_day / NANOS_PER_SECOND as u64) % 60) as u8
    }

    /// The nanosecond of the second, 0 to 999,999,999.
    pub const fn nano(self) -> u32 {
        (self.nano_of_day % NANOS_PER_SECOND as u64) as u32
    }

    /// The second-of-day count.
    pub const fn second_of_day(self) -> u32 {
        (self.nano_of_day / NANOS_PER_SECOND as u64) as u32
    }

    /// The nanosecond-of-day count.
    pub const fn nano_of_day(self) -> u64 {
        self.nano_of_day
    }

    pub fn with_hour(self, hour: u8) -> CivilResult<Self> {
        Self::of(hour, self.minute(), self.second(), self.nano())
    }

    pub fn with_minute(self, minute: u8) -> CivilResult<Self> {
        Self::of(self.hour(), minute, self.second(), self.nano())
    }

    pub fn with_second(self, second: u8) -> CivilResult<Self> {
        Self::of(self.hour(), self.minute(), second, self.nano())
    }

    pub fn with_nano(self, nano: u32) -> CivilResult<Self> {
        Self::of(self.hour(), self.minute(), self.second(), nano)
    }

    /// Adds hours, wrapping around midnight.
    pub fn plus_hours(self, hours: i64) -> Self {
        self.plus_nanos((hours % 24) * NANOS_PER_HOUR)
    }

    /// Adds minutes, wrapping around midnight.
    pub fn plus_minutes(self, minutes: i64) -> Self {
        self.plus_nanos((minutes % 1440) * NANOS_PER_MINUTE)
    }

    /// Adds seconds, wrapping around midnight.
    pub fn plus_seconds(self, seconds: i64) -> Self {
        self.plus_nanos((seconds % 86_400) * NANOS_PER_SECOND)
    }

    /// Adds nanoseconds, wrapping around midnight; the day overflow is
    /// discarded.
    pub fn plus_nanos(self, nanos: i64) -> Self {
        let shifted = self.nano_of_day as i64 + utils::floor_mod(nanos, NANOS_PER_DAY);
        Self {
            nano_of_day: utils::floor_mod(shifted, NANOS_PER_DAY) as u64,
        }
    }

    pub fn minus_hours(self, hours: i64) -> Self {
        self.plus_hours(-(hours % 24))
    }

    pub fn minus_minutes(self, minutes: i64) -> Self {
        self.plus_minutes(-(minutes % 1440))
    }

    pub fn minus_seconds(self, seconds: i64) -> Self {
        self.plus_seconds(-(seconds % 86_400))
    }

    pub fn minus_nanos(self, nanos: i64) -> Self {
        let shifted = self.nano_of_day as i64 - utils::floor_mod(nanos, NANOS_PER_DAY);
        Self {
            nano_of_day: utils::floor_mod(shifted, NANOS_PER_DAY) as u64,
        }
    }
}

impl Temporal for LocalTime {
    fn is_supported(&self, field: TemporalField) -> bool {
        field.is_time_based()
    }

    fn get(&self, field: TemporalField) -> CivilResult<i64> {
        let nod = self.nano_of_day as i64;
        match field {
            TemporalField::NanoOfSecond => Ok(i64::from(self.nano())),
            TemporalField::NanoOfDay => Ok(nod),
            TemporalField::MicroOfSecond => Ok(i64::from(self.nano() / 1000)),
            TemporalField::MicroOfDay => Ok(nod / 1000),
            TemporalField::MilliOfSecond => Ok(i64::from(self.nano() / 1_000_000)),
            TemporalField::MilliOfDay => Ok(nod / 1_000_000),
            TemporalField::SecondOfMinute => Ok(i64::from(self.second())),
            TemporalField::SecondOfDay => Ok(i64::from(self.second_of_day())),
            TemporalField::MinuteOfHour => Ok(i64::from(self.minute())),
            TemporalField::MinuteOfDay => Ok(i64::from(self.hour()) * 60 + i64::from(self.minute())),
            TemporalField::HourOfAmpm => Ok(i64::from(self.hour() % 12)),
            TemporalField::ClockHourOfAmpm => {
                let hour = self.hour() % 12;
                Ok(i64::from(if hour == 0 { 12 } else { hour }))
            }
            TemporalField::HourOfDay => Ok(i64::from(self.hour())),
            TemporalField::ClockHourOfDay => {
                Ok(i64::from(if self.hour() == 0 { 24 } else { self.hour() }))
            }
            TemporalField::AmpmOfDay => Ok(i64::from(self.hour() / 12)),
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self> {
        let value = self.range(field)?.check(value, field)?;
        match field {
            TemporalField::NanoOfSecond => self.with_nano(value as u32),
            TemporalField::NanoOfDay => Self::of_nano_of_day(value),
            TemporalField::MicroOfSecond => self.with_nano(value as u32 * 1000),
            TemporalField::MicroOfDay => Self::of_nano_of_day(value * 1000),
            TemporalField::MilliOfSecond => self.with_nano(value as u32 * 1_000_000),
            TemporalField::MilliOfDay => Self::of_nano_of_day(value * 1_000_000),
            TemporalField::SecondOfMinute => self.with_second(value as u8),
            TemporalField::SecondOfDay => {
                Ok(Self::of_second_of_day(value as u32)?.plus_nanos(i64::from(self.nano())))
            }
            TemporalField::MinuteOfHour => self.with_minute(value as u8),
            TemporalField::MinuteOfDay => Self::of(
                (value / 60) as u8,
                (value % 60) as u8,
                self.second(),
                self.nano(),
            ),
            TemporalField::HourOfAmpm => {
                self.with_hour((self.hour() / 12) * 12 + value as u8)
            }
            TemporalField::ClockHourOfAmpm => {
                let hour = if value == 12 { 0 } else { value as u8 };
                self.with_hour((self.hour() / 12) * 12 + hour)
            }
            TemporalField::HourOfDay => self.with_hour(value as u8),
            TemporalField::ClockHourOfDay => {
                self.with_hour(if value == 24 { 0 } else { value as u8 })
            }
            TemporalField::AmpmOfDay => {
                self.with_hour(value as u8 * 12 + self.hour() % 12)
            }
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        match unit {
            TemporalUnit::Nanos => Ok(self.plus_nanos(amount)),
            TemporalUnit::Micros => Ok(self.plus_nanos((amount % 86_400_000_000) * 1000)),
            TemporalUnit::Millis => Ok(self.plus_nanos((amount % 86_400_000) * 1_000_000)),
            TemporalUnit::Seconds => Ok(self.plus_seconds(amount)),
            TemporalUnit::Minutes => Ok(self.plus_minutes(amount)),
            TemporalUnit::Hours => Ok(self.plus_hours(amount)),
            TemporalUnit::HalfDays => Ok(self.plus_hours((amount % 2) * 12)),
            _ => Err(CivilError::UnsupportedUnit { unit }),
        }
    }

    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        let nanos = end.nano_of_day as i64 - self.nano_of_day as i64;
        match unit {
            TemporalUnit::Nanos => Ok(nanos),
            TemporalUnit::Micros => Ok(nanos / 1000),
            TemporalUnit::Millis => Ok(nanos / 1_000_000),
            TemporalUnit::Seconds => Ok(nanos / NANOS_PER_SECOND),
            TemporalUnit::Minutes => Ok(nanos / NANOS_PER_MINUTE),
            TemporalUnit::Hours => Ok(nanos / NANOS_PER_HOUR),
            TemporalUnit::HalfDays => Ok(nanos / (12 * NANOS_PER_HOUR)),
            _ => Err(CivilError::UnsupportedUnit { unit }),
        }
    }
}

impl fmt::Display for LocalTime {
    /// The ISO-8601 form with seconds always present, such as `11:05:30` or
    /// `11:05:30.123`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::text::format::write_time(f, *self)
    }
}

impl FromStr for LocalTime {
    type Err = CivilError;

    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_local_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_and_nano_of_day_forms_agree() {
        let t = LocalTime::of(11, 5, 30, 123_456_789).unwrap();
        assert_eq!(t.hour(), 11);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.second(), 30);
        assert_eq!(t.nano(), 123_456_789);
        assert_eq!(
            LocalTime::of_nano_of_day(t.nano_of_day() as i64).unwrap(),
            t
        );
        assert_eq!(LocalTime::of_second_of_day(86_399).unwrap(), LocalTime::of(23, 59, 59, 0).unwrap());
    }

    #[test]
    fn constructors_validate() {
        assert!(LocalTime::of(24, 0, 0, 0).is_err());
        assert!(LocalTime::of(0, 60, 0, 0).is_err());
        assert!(LocalTime::of_nano_of_day(NANOS_PER_DAY).is_err());
        assert!(LocalTime::of_nano_of_day(-1).is_err());
    }

    #[test]
    fn arithmetic_wraps_around_midnight() {
        let t = LocalTime::of(23, 30, 0, 0).unwrap();
        assert_eq!(t.plus_hours(1), LocalTime::of(0, 30, 0, 0).unwrap());
        assert_eq!(t.plus_hours(25), LocalTime::of(0, 30, 0, 0).unwrap());
        assert_eq!(t.plus_hours(-24), t);
        assert_eq!(
            LocalTime::MIDNIGHT.minus_nanos(1),
            LocalTime::MAX
        );
        assert_eq!(LocalTime::MAX.plus_nanos(1), LocalTime::MIDNIGHT);
    }

    #[test]
    fn clock_hour_fields() {
        let midnight = LocalTime::MIDNIGHT;
        assert_eq!(midnight.get(TemporalField::ClockHourOfDay).unwrap(), 24);
        assert_eq!(midnight.get(TemporalField::ClockHourOfAmpm).unwrap(), 12);
        assert_eq!(midnight.get(TemporalField::AmpmOfDay).unwrap(), 0);
        let t = LocalTime::of(15, 0, 0, 0).unwrap();
        assert_eq!(t.get(TemporalField::HourOfAmpm).unwrap(), 3);
        assert_eq!(t.get(TemporalField::AmpmOfDay).unwrap(), 1);
        assert_eq!(
            t.with(TemporalField::AmpmOfDay, 0).unwrap(),
            LocalTime::of(3, 0, 0, 0).unwrap()
        );
        assert_eq!(
            midnight.with(TemporalField::ClockHourOfDay, 24).unwrap(),
            midnight
        );
    }

    #[test]
    fn with_field() {
        let t = LocalTime::of(11, 5, 30, 500).unwrap();
        assert_eq!(
            t.with(TemporalField::SecondOfDay, 0).unwrap(),
            LocalTime::of(0, 0, 0, 500).unwrap()
        );
        assert_eq!(
            t.with(TemporalField::MinuteOfDay, 61).unwrap(),
            LocalTime::of(1, 1, 30, 500).unwrap()
        );
        assert!(matches!(
            t.with(TemporalField::HourOfDay, 24),
            Err(CivilError::ValueOutOfRange { .. })
        ));
        assert_eq!(
            t.with(TemporalField::EpochDay, 0),
            Err(CivilError::UnsupportedField {
                field: TemporalField::EpochDay
            })
        );
    }

    #[test]
    fn until_truncates() {
        let start = LocalTime::of(10, 0, 0, 0).unwrap();
        let end = LocalTime::of(11, 30, 0, 0).unwrap();
        assert_eq!(start.until(&end, TemporalUnit::Hours).unwrap(), 1);
        assert_eq!(start.until(&end, TemporalUnit::Minutes).unwrap(), 90);
        assert_eq!(end.until(&start, TemporalUnit::Hours).unwrap(), -1);
        assert_eq!(
            start.until(&end, TemporalUnit::Days),
            Err(CivilError::UnsupportedUnit {
                unit: TemporalUnit::Days
            })
        );
    }
}
