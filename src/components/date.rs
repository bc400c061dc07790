//! A calendar date in the proleptic Gregorian (ISO-8601) calendar.

use core::fmt;
use core::str::FromStr;

use crate::chronology::{Chronology, IsoChronology};
use crate::components::{LocalDateTime, LocalTime};
use crate::fields::{
    Temporal, TemporalField, TemporalUnit, ValueRange, MAX_YEAR, MIN_YEAR,
};
use crate::utils;
use crate::{CivilError, CivilResult};

/// Days from year 0 to 1970 in the proleptic Gregorian calendar.
const DAYS_0000_TO_1970: i64 = 719_528;
/// Days per 400-year cycle.
const DAYS_PER_CYCLE: i64 = 146_097;

/// A day of the week, numbered 1 (Monday) through 7 (Sunday) as in ISO-8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DayOfWeek {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl DayOfWeek {
    /// The ISO numeric value, 1 (Monday) to 7 (Sunday).
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// The day of the week for an ISO value of 1 to 7.
    pub fn of(value: u8) -> CivilResult<Self> {
        match value {
            1 => Ok(DayOfWeek::Monday),
            2 => Ok(DayOfWeek::Tuesday),
            3 => Ok(DayOfWeek::Wednesday),
            4 => Ok(DayOfWeek::Thursday),
            5 => Ok(DayOfWeek::Friday),
            6 => Ok(DayOfWeek::Saturday),
            7 => Ok(DayOfWeek::Sunday),
            _ => Err(CivilError::ValueOutOfRange {
                field: TemporalField::DayOfWeek,
                value: i64::from(value),
                min: 1,
                max: 7,
            }),
        }
    }

    pub(crate) fn from_value_wrapping(value: i64) -> Self {
        match utils::floor_mod(value - 1, 7) + 1 {
            1 => DayOfWeek::Monday,
            2 => DayOfWeek::Tuesday,
            3 => DayOfWeek::Wednesday,
            4 => DayOfWeek::Thursday,
            5 => DayOfWeek::Friday,
            6 => DayOfWeek::Saturday,
            _ => DayOfWeek::Sunday,
        }
    }

    /// The day of the week `days` later, wrapping around the week.
    pub fn plus(self, days: i64) -> Self {
        Self::from_value_wrapping(i64::from(self.value()) + days)
    }
}

/// A date without a time or zone, such as 2008-06-30, in the proleptic
/// Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate {
    year: i32,
    month: u8,
    day: u8,
}

impl LocalDate {
    /// The smallest supported date, −999999999-01-01.
    pub const MIN: LocalDate = LocalDate {
        year: MIN_YEAR,
        month: 1,
        day: 1,
    };
    /// The largest supported date, +999999999-12-31.
    pub const MAX: LocalDate = LocalDate {
        year: MAX_YEAR,
        month: 12,
        day: 31,
    };

    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// A date from a year, month (1–12), and day-of-month, fully validated.
    pub fn of(year: i32, month: u8, day: u8) -> CivilResult<Self> {
        ValueRange::of(i64::from(MIN_YEAR), i64::from(MAX_YEAR))
            .check(i64::from(year), TemporalField::Year)?;
        TemporalField::MonthOfYear
            .base_range()
            .check(i64::from(month), TemporalField::MonthOfYear)?;
        TemporalField::DayOfMonth
            .base_range()
            .check(i64::from(day), TemporalField::DayOfMonth)?;
        if day > utils::days_in_month(month, utils::is_leap_year(year)) {
            return Err(CivilError::DateNotValid { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// A date from a year and a 1-based day-of-year.
    pub fn of_year_day(year: i32, day_of_year: u16) -> CivilResult<Self> {
        ValueRange::of(i64::from(MIN_YEAR), i64::from(MAX_YEAR))
            .check(i64::from(year), TemporalField::Year)?;
        let leap = utils::is_leap_year(year);
        ValueRange::of(1, i64::from(utils::days_in_year(year)))
            .check(i64::from(day_of_year), TemporalField::DayOfYear)?;
        let mut month = 1u8;
        let mut remaining = day_of_year;
        loop {
            let len = u16::from(utils::days_in_month(month, leap));
            if remaining <= len {
                return Ok(Self::new_unchecked(year, month, remaining as u8));
            }
            remaining -= len;
            month += 1;
        }
    }

    /// A date from a count of days since 1970-01-01.
    pub fn from_epoch_day(epoch_day: i64) -> CivilResult<Self> {
        TemporalField::EpochDay
            .base_range()
            .check(epoch_day, TemporalField::EpochDay)?;
        // Shift to a cycle starting 0000-03-01 so leap days fall at the end.
        let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
        let mut adjust = 0i64;
        if zero_day < 0 {
            let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
            adjust = adjust_cycles * 400;
            zero_day += -adjust_cycles * DAYS_PER_CYCLE;
        }
        let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
        let mut doy_est = zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
        if doy_est < 0 {
            year_est -= 1;
            doy_est = zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
        }
        year_est += adjust;
        let march_doy0 = doy_est;
        let march_month0 = (march_doy0 * 5 + 2) / 153;
        let month = ((march_month0 + 2) % 12) + 1;
        let dom = march_doy0 - (march_month0 * 306 + 5) / 10 + 1;
        year_est += march_month0 / 10;
        Ok(Self::new_unchecked(year_est as i32, month as u8, dom as u8))
    }

    /// The count of days since 1970-01-01; negative for earlier dates.
    pub fn to_epoch_day(self) -> i64 {
        let y = i64::from(self.year);
        let m = i64::from(self.month);
        let mut total = 365 * y;
        if y >= 0 {
            total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
        } else {
            total -= y / -4 - y / -100 + y / -400;
        }
        total += (367 * m - 362) / 12;
        total += i64::from(self.day) - 1;
        if m > 2 {
            total -= 1;
            if !self.is_leap_year() {
                total -= 1;
            }
        }
        total - DAYS_0000_TO_1970
    }

    /// The proleptic year.
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month of the year, 1 to 12.
    pub const fn month(self) -> u8 {
        self.month
    }

    /// The day of the month, 1 to 31.
    pub const fn day(self) -> u8 {
        self.day
    }

    /// The day of the week.
    pub fn day_of_week(self) -> DayOfWeek {
        DayOfWeek::from_value_wrapping(utils::floor_mod(self.to_epoch_day() + 3, 7) + 1)
    }

    /// The 1-based day of the year, 1 to 365/366.
    pub fn day_of_year(self) -> u16 {
        utils::day_of_year_until_start_of_month(self.month, self.is_leap_year())
            + u16::from(self.day)
    }

    /// Returns `true` if this date's year is a leap year.
    pub const fn is_leap_year(self) -> bool {
        utils::is_leap_year(self.year)
    }

    /// The length of this date's month in days.
    pub const fn length_of_month(self) -> u8 {
        utils::days_in_month(self.month, self.is_leap_year())
    }

    /// The length of this date's year in days.
    pub const fn length_of_year(self) -> u16 {
        utils::days_in_year(self.year)
    }

    pub(crate) const fn epoch_month(self) -> i64 {
        (self.year as i64 - 1970) * 12 + (self.month as i64 - 1)
    }

    /// Returns the date with the year altered; the day is resolved to the
    /// last valid day of the month when necessary (Feb 29 → Feb 28).
    pub fn with_year(self, year: i32) -> CivilResult<Self> {
        if year == self.year {
            return Ok(self);
        }
        ValueRange::of(i64::from(MIN_YEAR), i64::from(MAX_YEAR))
            .check(i64::from(year), TemporalField::Year)?;
        Ok(Self::resolve_previous_valid(year, self.month, self.day))
    }

    /// Returns the date with the month altered; the day is resolved to the
    /// last valid day of the month when necessary.
    pub fn with_month(self, month: u8) -> CivilResult<Self> {
        if month == self.month {
            return Ok(self);
        }
        TemporalField::MonthOfYear
            .base_range()
            .check(i64::from(month), TemporalField::MonthOfYear)?;
        Ok(Self::resolve_previous_valid(self.year, month, self.day))
    }

    /// Returns the date with the day-of-month altered, strictly validated.
    pub fn with_day_of_month(self, day: u8) -> CivilResult<Self> {
        if day == self.day {
            return Ok(self);
        }
        Self::of(self.year, self.month, day)
    }

    /// Returns the date with the day-of-year altered, strictly validated.
    pub fn with_day_of_year(self, day_of_year: u16) -> CivilResult<Self> {
        if day_of_year == self.day_of_year() {
            return Ok(self);
        }
        Self::of_year_day(self.year, day_of_year)
    }

    fn resolve_previous_valid(year: i32, month: u8, day: u8) -> Self {
        let max = utils::days_in_month(month, utils::is_leap_year(year));
        Self::new_unchecked(year, month, day.min(max))
    }

    /// Adds a number of years; the day is clamped to the last valid day of
    /// the resulting month.
    pub fn plus_years(self, years: i64) -> CivilResult<Self> {
        if years == 0 {
            return Ok(self);
        }
        let new_year = utils::checked_add(i64::from(self.year), years)?;
        let new_year = ValueRange::of(i64::from(MIN_YEAR), i64::from(MAX_YEAR))
            .check(new_year, TemporalField::Year)? as i32;
        Ok(Self::resolve_previous_valid(new_year, self.month, self.day))
    }

    /// Adds a number of months; the day is clamped to the last valid day of
    /// the resulting month.
    pub fn plus_months(self, months: i64) -> CivilResult<Self> {
        if months == 0 {
            return Ok(self);
        }
        let month_count = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let calc_months = utils::checked_add(month_count, months)?;
        let new_year = utils::floor_div(calc_months, 12);
        let new_year = ValueRange::of(i64::from(MIN_YEAR), i64::from(MAX_YEAR))
            .check(new_year, TemporalField::Year)? as i32;
        let new_month = utils::floor_mod(calc_months, 12) as u8 + 1;
        Ok(Self::resolve_previous_valid(new_year, new_month, self.day))
    }

    /// Adds a number of weeks.
    pub fn plus_weeks(self, weeks: i64) -> CivilResult<Self> {
        self.plus_days(utils::checked_mul(weeks, 7)?)
    }

    /// Adds a number of days.
    pub fn plus_days(self, days: i64) -> CivilResult<Self> {
        if days == 0 {
            return Ok(self);
        }
        Self::from_epoch_day(utils::checked_add(self.to_epoch_day(), days)?)
    }

    pub fn minus_years(self, years: i64) -> CivilResult<Self> {
        self.plus_years(utils::checked_sub(0, years)?)
    }

    pub fn minus_months(self, months: i64) -> CivilResult<Self> {
        self.plus_months(utils::checked_sub(0, months)?)
    }

    pub fn minus_weeks(self, weeks: i64) -> CivilResult<Self> {
        self.plus_weeks(utils::checked_sub(0, weeks)?)
    }

    pub fn minus_days(self, days: i64) -> CivilResult<Self> {
        self.plus_days(utils::checked_sub(0, days)?)
    }

    /// Complete days from this date until `other`; negative when `other` is
    /// earlier.
    pub fn days_until(self, other: LocalDate) -> i64 {
        other.to_epoch_day() - self.to_epoch_day()
    }

    /// Complete months from this date until `other`, excluding the final
    /// partial month.
    pub fn months_until(self, other: LocalDate) -> i64 {
        let packed1 = self.epoch_month() * 32 + i64::from(self.day);
        let packed2 = other.epoch_month() * 32 + i64::from(other.day);
        (packed2 - packed1) / 32
    }

    /// Combines this date with a time.
    pub const fn at_time(self, time: LocalTime) -> LocalDateTime {
        LocalDateTime::new_unchecked(self, time)
    }

    /// This date at 00:00.
    pub const fn at_start_of_day(self) -> LocalDateTime {
        LocalDateTime::new_unchecked(self, LocalTime::MIDNIGHT)
    }

    /// The ISO week date of this date: week-based year, week number, and
    /// day of week.
    ///
    /// The week-based year of a date is the year of the Thursday of its
    /// week; week 1 is the week containing January 4th.
    pub fn iso_week_date(self) -> CivilResult<(i32, u8, DayOfWeek)> {
        let dow = self.day_of_week();
        let thursday = self.plus_days(4 - i64::from(dow.value()))?;
        let week = (thursday.day_of_year() - 1) / 7 + 1;
        Ok((thursday.year(), week as u8, dow))
    }

    /// A date from an ISO week date.
    pub fn of_week_date(week_based_year: i32, week: u8, day_of_week: DayOfWeek) -> CivilResult<Self> {
        let weeks_in_year = Self::weeks_in_week_based_year(week_based_year)?;
        if week < 1 || week > weeks_in_year {
            return Err(CivilError::WeekNotValid {
                week_based_year,
                week,
            });
        }
        let jan4 = Self::of(week_based_year, 1, 4)?;
        let week1_monday = jan4.minus_days(i64::from(jan4.day_of_week().value()) - 1)?;
        week1_monday.plus_days(
            i64::from(week - 1) * 7 + i64::from(day_of_week.value()) - 1,
        )
    }

    fn weeks_in_week_based_year(week_based_year: i32) -> CivilResult<u8> {
        let jan1 = Self::of(week_based_year, 1, 1)?;
        let dow = jan1.day_of_week();
        let long = dow == DayOfWeek::Thursday
            || (jan1.is_leap_year() && dow == DayOfWeek::Wednesday);
        Ok(if long { 53 } else { 52 })
    }
}

impl Temporal for LocalDate {
    fn is_supported(&self, field: TemporalField) -> bool {
        field.is_date_based()
    }

    fn range(&self, field: TemporalField) -> CivilResult<ValueRange> {
        match field {
            TemporalField::DayOfMonth => {
                Ok(ValueRange::of(1, i64::from(self.length_of_month())))
            }
            TemporalField::DayOfYear => {
                Ok(ValueRange::of(1, i64::from(self.length_of_year())))
            }
            TemporalField::YearOfEra => Ok(if self.year <= 0 {
                ValueRange::of(1, i64::from(MAX_YEAR) + 1)
            } else {
                ValueRange::of(1, i64::from(MAX_YEAR))
            }),
            _ if field.is_date_based() => Ok(field.base_range()),
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn get(&self, field: TemporalField) -> CivilResult<i64> {
        match field {
            TemporalField::DayOfWeek => Ok(i64::from(self.day_of_week().value())),
            TemporalField::DayOfMonth => Ok(i64::from(self.day)),
            TemporalField::DayOfYear => Ok(i64::from(self.day_of_year())),
            TemporalField::EpochDay => Ok(self.to_epoch_day()),
            TemporalField::MonthOfYear => Ok(i64::from(self.month)),
            TemporalField::EpochMonth => Ok(self.epoch_month()),
            TemporalField::YearOfEra => {
                Ok(i64::from(IsoChronology.year_of_era(self.year).1))
            }
            TemporalField::Year => Ok(i64::from(self.year)),
            TemporalField::Era => Ok(i64::from(IsoChronology.year_of_era(self.year).0)),
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self> {
        let value = self.range(field)?.check(value, field)?;
        match field {
            TemporalField::DayOfWeek => {
                self.plus_days(value - i64::from(self.day_of_week().value()))
            }
            TemporalField::DayOfMonth => self.with_day_of_month(value as u8),
            TemporalField::DayOfYear => self.with_day_of_year(value as u16),
            TemporalField::EpochDay => Self::from_epoch_day(value),
            TemporalField::MonthOfYear => self.with_month(value as u8),
            TemporalField::EpochMonth => self.plus_months(value - self.epoch_month()),
            TemporalField::YearOfEra => {
                let era = IsoChronology.year_of_era(self.year).0;
                self.with_year(IsoChronology.proleptic_year(era, value as i32))
            }
            TemporalField::Year => self.with_year(value as i32),
            TemporalField::Era => {
                let (era, year_of_era) = IsoChronology.year_of_era(self.year);
                if value == i64::from(era) {
                    Ok(*self)
                } else {
                    self.with_year(IsoChronology.proleptic_year(value as u8, year_of_era))
                }
            }
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        match unit {
            TemporalUnit::Days => self.plus_days(amount),
            TemporalUnit::Weeks => self.plus_weeks(amount),
            TemporalUnit::Months => self.plus_months(amount),
            TemporalUnit::Years => self.plus_years(amount),
            TemporalUnit::Decades => self.plus_years(utils::checked_mul(amount, 10)?),
            TemporalUnit::Centuries => self.plus_years(utils::checked_mul(amount, 100)?),
            TemporalUnit::Millennia => self.plus_years(utils::checked_mul(amount, 1000)?),
            TemporalUnit::Eras => {
                let era = self.get(TemporalField::Era)?;
                self.with(TemporalField::Era, utils::checked_add(era, amount)?)
            }
            _ => Err(CivilError::UnsupportedUnit { unit }),
        }
    }

    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        match unit {
            TemporalUnit::Days => Ok(self.days_until(*end)),
            TemporalUnit::Weeks => Ok(self.days_until(*end) / 7),
            TemporalUnit::Months => Ok(self.months_until(*end)),
            TemporalUnit::Years => Ok(self.months_until(*end) / 12),
            TemporalUnit::Decades => Ok(self.months_until(*end) / 120),
            TemporalUnit::Centuries => Ok(self.months_until(*end) / 1200),
            TemporalUnit::Millennia => Ok(self.months_until(*end) / 12000),
            TemporalUnit::Eras => {
                Ok(end.get(TemporalField::Era)? - self.get(TemporalField::Era)?)
            }
            _ => Err(CivilError::UnsupportedUnit { unit }),
        }
    }
}

impl fmt::Display for LocalDate {
    /// The ISO-8601 form, such as `2008-06-30` or `+999999999-08-06`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::text::format::write_date(f, *self)
    }
}

impl FromStr for LocalDate {
    type Err = CivilError;

    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_local_date(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_round_trip() {
        let samples = [
            (1970, 1, 1, 0i64),
            (1970, 1, 2, 1),
            (1969, 12, 31, -1),
            (2000, 3, 1, 11017),
            (1600, 3, 1, -135080),
        ];
        for (year, month, day, epoch_day) in samples {
            let date = LocalDate::of(year, month, day).unwrap();
            assert_eq!(date.to_epoch_day(), epoch_day, "{date}");
            assert_eq!(LocalDate::from_epoch_day(epoch_day).unwrap(), date);
        }
        // Round-trip across a spread of the supported range.
        let mut epoch_day = -365_000_000i64;
        while epoch_day <= 365_000_000 {
            let date = LocalDate::from_epoch_day(epoch_day).unwrap();
            assert_eq!(date.to_epoch_day(), epoch_day);
            epoch_day += 97_003;
        }
    }

    #[test]
    fn extreme_epoch_days() {
        assert_eq!(LocalDate::MIN.to_epoch_day(), -365_243_219_162);
        assert_eq!(LocalDate::MAX.to_epoch_day(), 365_241_780_471);
        assert_eq!(
            LocalDate::from_epoch_day(-365_243_219_162).unwrap(),
            LocalDate::MIN
        );
        assert_eq!(
            LocalDate::from_epoch_day(365_241_780_471).unwrap(),
            LocalDate::MAX
        );
        assert!(LocalDate::from_epoch_day(365_241_780_472).is_err());
    }

    #[test]
    fn invalid_dates_rejected() {
        assert_eq!(
            LocalDate::of(2007, 2, 29),
            Err(CivilError::DateNotValid {
                year: 2007,
                month: 2,
                day: 29
            })
        );
        assert!(LocalDate::of(2008, 2, 29).is_ok());
        assert!(matches!(
            LocalDate::of(2008, 13, 1),
            Err(CivilError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            LocalDate::of(1_000_000_000, 1, 1),
            Err(CivilError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn day_of_week_and_year() {
        let date = LocalDate::of(2008, 6, 3).unwrap();
        assert_eq!(date.day_of_week(), DayOfWeek::Tuesday);
        assert_eq!(date.day_of_year(), 155);
        assert_eq!(LocalDate::of(1970, 1, 1).unwrap().day_of_week(), DayOfWeek::Thursday);
        assert_eq!(LocalDate::of_year_day(2008, 155).unwrap(), date);
    }

    #[test]
    fn plus_months_clamps_to_last_valid_day() {
        let jan31 = LocalDate::of(2008, 1, 31).unwrap();
        assert_eq!(jan31.plus_months(1).unwrap(), LocalDate::of(2008, 2, 29).unwrap());
        assert_eq!(
            LocalDate::of(2007, 1, 31).unwrap().plus_months(1).unwrap(),
            LocalDate::of(2007, 2, 28).unwrap()
        );
        assert_eq!(jan31.plus_months(-2).unwrap(), LocalDate::of(2007, 11, 30).unwrap());
        assert_eq!(
            LocalDate::of(2008, 2, 29).unwrap().plus_years(1).unwrap(),
            LocalDate::of(2009, 2, 28).unwrap()
        );
    }

    #[test]
    fn plus_minus_round_trip() {
        let date = LocalDate::of(2008, 6, 30).unwrap();
        for unit in [
            TemporalUnit::Days,
            TemporalUnit::Weeks,
            TemporalUnit::Months,
            TemporalUnit::Years,
        ] {
            let moved = date.plus(17, unit).unwrap();
            assert_eq!(moved.minus(17, unit).unwrap(), date, "{unit}");
        }
    }

    #[test]
    fn until_in_units() {
        let start = LocalDate::of(2008, 1, 31).unwrap();
        let end = LocalDate::of(2008, 3, 30).unwrap();
        assert_eq!(start.until(&end, TemporalUnit::Days).unwrap(), 59);
        assert_eq!(start.until(&end, TemporalUnit::Months).unwrap(), 1);
        assert_eq!(end.until(&start, TemporalUnit::Months).unwrap(), -1);
        assert_eq!(
            start.until(&LocalDate::of(2010, 1, 31).unwrap(), TemporalUnit::Years).unwrap(),
            2
        );
    }

    #[test]
    fn field_protocol() {
        let date = LocalDate::of(2008, 6, 30).unwrap();
        assert_eq!(date.get(TemporalField::MonthOfYear).unwrap(), 6);
        assert_eq!(date.get(TemporalField::Era).unwrap(), 1);
        assert_eq!(date.get(TemporalField::EpochMonth).unwrap(), (2008 - 1970) * 12 + 5);
        assert_eq!(
            date.get(TemporalField::HourOfDay),
            Err(CivilError::UnsupportedField {
                field: TemporalField::HourOfDay
            })
        );
        assert_eq!(
            date.with(TemporalField::DayOfWeek, 7).unwrap(),
            LocalDate::of(2008, 7, 6).unwrap()
        );
        assert_eq!(
            date.with(TemporalField::Year, 2012).unwrap(),
            LocalDate::of(2012, 6, 30).unwrap()
        );
        // The per-value range for June caps day-of-month at 30.
        assert_eq!(
            date.with(TemporalField::DayOfMonth, 31),
            Err(CivilError::ValueOutOfRange {
                field: TemporalField::DayOfMonth,
                value: 31,
                min: 1,
                max: 30,
            })
        );
        // Era flip: 2008 CE -> −2007 (year-of-era preserved).
        assert_eq!(
            date.with(TemporalField::Era, 0).unwrap().year(),
            -2007
        );
    }

    #[test]
    fn with_day_of_year_range_depends_on_leap() {
        let date = LocalDate::of(2008, 1, 1).unwrap();
        assert_eq!(date.range(TemporalField::DayOfYear).unwrap().max(), 366);
        assert_eq!(
            LocalDate::of(2007, 1, 1).unwrap().range(TemporalField::DayOfYear).unwrap().max(),
            365
        );
    }

    #[test]
    fn week_date() {
        let date = LocalDate::of(2004, 1, 27).unwrap();
        let (wby, week, dow) = date.iso_week_date().unwrap();
        assert_eq!((wby, week, dow), (2004, 5, DayOfWeek::Tuesday));
        assert_eq!(LocalDate::of_week_date(2004, 5, DayOfWeek::Tuesday).unwrap(), date);

        // 2008-12-29 is a Monday of week 1 of 2009.
        let date = LocalDate::of(2008, 12, 29).unwrap();
        let (wby, week, _) = date.iso_week_date().unwrap();
        assert_eq!((wby, week), (2009, 1));

        // 2004 has 53 weeks (leap year starting on Thursday).
        assert!(LocalDate::of_week_date(2004, 53, DayOfWeek::Monday).is_ok());
        assert!(LocalDate::of_week_date(2005, 53, DayOfWeek::Monday).is_err());
    }
}
