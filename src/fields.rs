//! The field and unit taxonomy and the polymorphic access protocol.
//!
//! Every temporal value in the crate answers the same small contract:
//! [`Temporal::get`] reads a field, [`Temporal::with`] returns an altered
//! copy, [`Temporal::plus`] applies an amount of a unit, and
//! [`Temporal::range`] reports the valid bounds of a field for that value.
//! Fields and units are closed enumerations; each value type carries the
//! authoritative match over the fields it supports.

use core::fmt;

use crate::components::Duration;
use crate::{CivilError, CivilResult};

/// Smallest epoch day reachable by a `LocalDate` (year −999,999,999).
pub(crate) const MIN_EPOCH_DAY: i64 = -365_243_219_162;
/// Largest epoch day reachable by a `LocalDate` (year +999,999,999).
pub(crate) const MAX_EPOCH_DAY: i64 = 365_241_780_471;

pub(crate) const MIN_EPOCH_MONTH: i64 = (MIN_YEAR as i64 - 1970) * 12;
pub(crate) const MAX_EPOCH_MONTH: i64 = (MAX_YEAR as i64 - 1970) * 12 + 11;

/// Smallest supported proleptic year.
pub(crate) const MIN_YEAR: i32 = -999_999_999;
/// Largest supported proleptic year.
pub(crate) const MAX_YEAR: i32 = 999_999_999;

// ==== Fields ====

/// An enumerated field of a date, time, or offset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemporalField {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmpm,
    ClockHourOfAmpm,
    HourOfDay,
    ClockHourOfDay,
    AmpmOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    MonthOfYear,
    EpochMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
}

impl TemporalField {
    /// The range of the field independent of any particular value.
    ///
    /// Fields with value-dependent bounds (day-of-month, day-of-year,
    /// year-of-era) report the outer envelope here; [`Temporal::range`]
    /// refines them for a concrete value.
    pub fn base_range(self) -> ValueRange {
        use TemporalField::*;
        match self {
            NanoOfSecond => ValueRange::of(0, 999_999_999),
            NanoOfDay => ValueRange::of(0, 86_400_000_000_000 - 1),
            MicroOfSecond => ValueRange::of(0, 999_999),
            MicroOfDay => ValueRange::of(0, 86_400_000_000 - 1),
            MilliOfSecond => ValueRange::of(0, 999),
            MilliOfDay => ValueRange::of(0, 86_400_000 - 1),
            SecondOfMinute => ValueRange::of(0, 59),
            SecondOfDay => ValueRange::of(0, 86_399),
            MinuteOfHour => ValueRange::of(0, 59),
            MinuteOfDay => ValueRange::of(0, 1439),
            HourOfAmpm => ValueRange::of(0, 11),
            ClockHourOfAmpm => ValueRange::of(1, 12),
            HourOfDay => ValueRange::of(0, 23),
            ClockHourOfDay => ValueRange::of(1, 24),
            AmpmOfDay => ValueRange::of(0, 1),
            DayOfWeek => ValueRange::of(1, 7),
            DayOfMonth => ValueRange::of_variable_max(1, 28, 31),
            DayOfYear => ValueRange::of_variable_max(1, 365, 366),
            EpochDay => ValueRange::of(MIN_EPOCH_DAY, MAX_EPOCH_DAY),
            MonthOfYear => ValueRange::of(1, 12),
            EpochMonth => ValueRange::of(MIN_EPOCH_MONTH, MAX_EPOCH_MONTH),
            YearOfEra => ValueRange::of_variable_max(1, MAX_YEAR as i64, MAX_YEAR as i64 + 1),
            Year => ValueRange::of(MIN_YEAR as i64, MAX_YEAR as i64),
            Era => ValueRange::of(0, 1),
            InstantSeconds => ValueRange::of(i64::MIN, i64::MAX),
            OffsetSeconds => ValueRange::of(-64_800, 64_800),
        }
    }

    /// Returns `true` for the fields derived purely from the time of day.
    pub fn is_time_based(self) -> bool {
        (self as u8) <= (TemporalField::AmpmOfDay as u8)
    }

    /// Returns `true` for the fields derived purely from the date.
    pub fn is_date_based(self) -> bool {
        let v = self as u8;
        v >= TemporalField::DayOfWeek as u8 && v <= TemporalField::Era as u8
    }

    pub(crate) fn name(self) -> &'static str {
        use TemporalField::*;
        match self {
            NanoOfSecond => "NanoOfSecond",
            NanoOfDay => "NanoOfDay",
            MicroOfSecond => "MicroOfSecond",
            MicroOfDay => "MicroOfDay",
            MilliOfSecond => "MilliOfSecond",
            MilliOfDay => "MilliOfDay",
            SecondOfMinute => "SecondOfMinute",
            SecondOfDay => "SecondOfDay",
            MinuteOfHour => "MinuteOfHour",
            MinuteOfDay => "MinuteOfDay",
            HourOfAmpm => "HourOfAmpm",
            ClockHourOfAmpm => "ClockHourOfAmpm",
            HourOfDay => "HourOfDay",
            ClockHourOfDay => "ClockHourOfDay",
            AmpmOfDay => "AmpmOfDay",
            DayOfWeek => "DayOfWeek",
            DayOfMonth => "DayOfMonth",
            DayOfYear => "DayOfYear",
            EpochDay => "EpochDay",
            MonthOfYear => "MonthOfYear",
            EpochMonth => "EpochMonth",
            YearOfEra => "YearOfEra",
            Year => "Year",
            Era => "Era",
            InstantSeconds => "InstantSeconds",
            OffsetSeconds => "OffsetSeconds",
        }
    }
}

impl fmt::Display for TemporalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ==== Units ====

/// An enumerated unit of temporal amount.
///
/// Units up to [`TemporalUnit::HalfDays`] are time-based with exact
/// durations; [`TemporalUnit::Days`] and above are date-based and apply
/// calendar arithmetic, carrying only an estimated duration for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemporalUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
    Forever,
}

impl TemporalUnit {
    /// Returns `true` for calendar units, `Days` and coarser.
    pub fn is_date_based(self) -> bool {
        self >= TemporalUnit::Days && self <= TemporalUnit::Eras
    }

    /// Returns `true` for the exact sub-day units.
    pub fn is_time_based(self) -> bool {
        self <= TemporalUnit::HalfDays
    }

    /// The nominal duration of the unit.
    ///
    /// Exact for time-based units; an estimate (365.2425-day years) for the
    /// calendar units.
    pub fn estimated_duration(self) -> Duration {
        use TemporalUnit::*;
        match self {
            Nanos => Duration::of_seconds_and_nanos_unchecked(0, 1),
            Micros => Duration::of_seconds_and_nanos_unchecked(0, 1_000),
            Millis => Duration::of_seconds_and_nanos_unchecked(0, 1_000_000),
            Seconds => Duration::of_seconds_and_nanos_unchecked(1, 0),
            Minutes => Duration::of_seconds_and_nanos_unchecked(60, 0),
            Hours => Duration::of_seconds_and_nanos_unchecked(3_600, 0),
            HalfDays => Duration::of_seconds_and_nanos_unchecked(43_200, 0),
            Days => Duration::of_seconds_and_nanos_unchecked(86_400, 0),
            Weeks => Duration::of_seconds_and_nanos_unchecked(7 * 86_400, 0),
            Months => Duration::of_seconds_and_nanos_unchecked(31_556_952 / 12, 0),
            Years => Duration::of_seconds_and_nanos_unchecked(31_556_952, 0),
            Decades => Duration::of_seconds_and_nanos_unchecked(315_569_520, 0),
            Centuries => Duration::of_seconds_and_nanos_unchecked(3_155_695_200, 0),
            Millennia => Duration::of_seconds_and_nanos_unchecked(31_556_952_000, 0),
            Eras => Duration::of_seconds_and_nanos_unchecked(31_556_952_000_000_000, 0),
            Forever => Duration::of_seconds_and_nanos_unchecked(i64::MAX, 999_999_999),
        }
    }

    pub(crate) fn name(self) -> &'static str {
        use TemporalUnit::*;
        match self {
            Nanos => "Nanos",
            Micros => "Micros",
            Millis => "Millis",
            Seconds => "Seconds",
            Minutes => "Minutes",
            Hours => "Hours",
            HalfDays => "HalfDays",
            Days => "Days",
            Weeks => "Weeks",
            Months => "Months",
            Years => "Years",
            Decades => "Decades",
            Centuries => "Centuries",
            Millennia => "Millennia",
            Eras => "Eras",
            Forever => "Forever",
        }
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ==== ValueRange ====

/// The range of valid values for a field.
///
/// Bounds may themselves vary by context (day-of-month has a minimum of 1
/// always, but a maximum of 28 to 31), so the range carries the smallest and
/// largest value of each bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// A fixed range.
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// A range with a fixed minimum and a variable maximum.
    pub const fn of_variable_max(min: i64, max_smallest: i64, max_largest: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    /// The smallest permitted minimum.
    pub const fn min(&self) -> i64 {
        self.min_smallest
    }

    /// The largest permitted minimum.
    pub const fn largest_min(&self) -> i64 {
        self.min_largest
    }

    /// The smallest permitted maximum.
    pub const fn smallest_max(&self) -> i64 {
        self.max_smallest
    }

    /// The largest permitted maximum.
    pub const fn max(&self) -> i64 {
        self.max_largest
    }

    /// Returns `true` when the bounds do not vary.
    pub const fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest && self.max_smallest == self.max_largest
    }

    /// Returns `true` when the value lies within the outer envelope.
    pub const fn contains(&self, value: i64) -> bool {
        self.min_smallest <= value && value <= self.max_largest
    }

    /// Validates a value against this range for the named field.
    pub fn check(&self, value: i64, field: TemporalField) -> CivilResult<i64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(CivilError::ValueOutOfRange {
                field,
                value,
                min: self.min_smallest,
                max: self.max_largest,
            })
        }
    }
}

// ==== The access protocol ====

/// The polymorphic field and unit access contract.
///
/// Implemented by every temporal value type. A value answers only the fields
/// it supports; queries for anything else fail with
/// [`CivilError::UnsupportedField`] or [`CivilError::UnsupportedUnit`].
pub trait Temporal: Sized {
    /// Returns `true` if the field can be read from and written to this
    /// value.
    fn is_supported(&self, field: TemporalField) -> bool;

    /// The valid range of the field for this specific value.
    fn range(&self, field: TemporalField) -> CivilResult<ValueRange> {
        if self.is_supported(field) {
            Ok(field.base_range())
        } else {
            Err(CivilError::UnsupportedField { field })
        }
    }

    /// Reads the value of a field.
    fn get(&self, field: TemporalField) -> CivilResult<i64>;

    /// Returns a copy of this value with the field set.
    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self>;

    /// Returns a copy of this value with an amount of a unit added.
    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self>;

    /// Returns a copy of this value with an amount of a unit subtracted.
    fn minus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        if amount == i64::MIN {
            self.plus(i64::MAX, unit)?.plus(1, unit)
        } else {
            self.plus(-amount, unit)
        }
    }

    /// The number of complete units between this value and `end`.
    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64>;
}
