//! A fixed offset from UTC in whole seconds.

use core::fmt;
use core::str::FromStr;

use crate::fields::{Temporal, TemporalField, TemporalUnit, ValueRange};
use crate::{CivilError, CivilResult};

/// The bound of the valid offset range: ±18:00 in seconds.
pub(crate) const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A fixed displacement from UTC, in whole seconds, bounded by ±18 hours.
///
/// Equal offsets compare equal by their total seconds; the canonical
/// identifier is `Z` for zero, else `±HH:MM[:SS]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneOffset {
    total_seconds: i32,
}

impl ZoneOffset {
    /// The zero offset.
    pub const UTC: ZoneOffset = ZoneOffset { total_seconds: 0 };

    pub(crate) const fn new_unchecked(total_seconds: i32) -> Self {
        Self { total_seconds }
    }

    /// An offset of a total number of seconds, validated against ±18:00.
    pub fn of_total_seconds(total_seconds: i32) -> CivilResult<Self> {
        Self::from_total(i64::from(total_seconds))
    }

    /// An offset of whole hours.
    pub fn of_hours(hours: i32) -> CivilResult<Self> {
        Self::from_total(i64::from(hours) * 3600)
    }

    /// An offset of hours and minutes, summed algebraically.
    pub fn of_hours_minutes(hours: i32, minutes: i32) -> CivilResult<Self> {
        Self::from_total(i64::from(hours) * 3600 + i64::from(minutes) * 60)
    }

    /// An offset of hours, minutes, and seconds, summed algebraically.
    pub fn of_hours_minutes_seconds(hours: i32, minutes: i32, seconds: i32) -> CivilResult<Self> {
        Self::from_total(
            i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds),
        )
    }

    fn from_total(total_seconds: i64) -> CivilResult<Self> {
        if !(i64::from(-MAX_OFFSET_SECONDS)..=i64::from(MAX_OFFSET_SECONDS))
            .contains(&total_seconds)
        {
            return Err(CivilError::ValueOutOfRange {
                field: TemporalField::OffsetSeconds,
                value: total_seconds,
                min: i64::from(-MAX_OFFSET_SECONDS),
                max: i64::from(MAX_OFFSET_SECONDS),
            });
        }
        Ok(Self {
            total_seconds: total_seconds as i32,
        })
    }

    /// The total offset in seconds.
    pub const fn total_seconds(self) -> i32 {
        self.total_seconds
    }

    /// The canonical identifier: `Z`, or `±HH:MM[:SS]`.
    pub fn id(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_seconds == 0 {
            return f.write_str("Z");
        }
        let abs = self.total_seconds.unsigned_abs();
        let sign = if self.total_seconds < 0 { '-' } else { '+' };
        let (hours, minutes, seconds) = (abs / 3600, (abs / 60) % 60, abs % 60);
        write!(f, "{sign}{hours:02}:{minutes:02}")?;
        if seconds != 0 {
            write!(f, ":{seconds:02}")?;
        }
        Ok(())
    }
}

impl FromStr for ZoneOffset {
    type Err = CivilError;

    /// Parses `Z` (case-insensitively) or `±HH[:MM[:SS]]`.
    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_offset(s)
    }
}

impl Temporal for ZoneOffset {
    fn is_supported(&self, field: TemporalField) -> bool {
        field == TemporalField::OffsetSeconds
    }

    fn get(&self, field: TemporalField) -> CivilResult<i64> {
        if field == TemporalField::OffsetSeconds {
            Ok(i64::from(self.total_seconds))
        } else {
            Err(CivilError::UnsupportedField { field })
        }
    }

    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self> {
        if field != TemporalField::OffsetSeconds {
            return Err(CivilError::UnsupportedField { field });
        }
        let value = ValueRange::of(
            i64::from(-MAX_OFFSET_SECONDS),
            i64::from(MAX_OFFSET_SECONDS),
        )
        .check(value, field)?;
        Ok(Self::new_unchecked(value as i32))
    }

    fn plus(&self, _amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        Err(CivilError::UnsupportedUnit { unit })
    }

    fn until(&self, _end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        Err(CivilError::UnsupportedUnit { unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert!(ZoneOffset::of_hours(18).is_ok());
        assert!(ZoneOffset::of_hours(-18).is_ok());
        assert!(ZoneOffset::of_hours(19).is_err());
        assert!(ZoneOffset::of_total_seconds(64_801).is_err());
    }

    #[test]
    fn canonical_ids() {
        assert_eq!(ZoneOffset::UTC.id(), "Z");
        assert_eq!(ZoneOffset::of_hours(1).unwrap().id(), "+01:00");
        assert_eq!(ZoneOffset::of_hours(-5).unwrap().id(), "-05:00");
        assert_eq!(
            ZoneOffset::of_hours_minutes(5, 30).unwrap().id(),
            "+05:30"
        );
        assert_eq!(
            ZoneOffset::of_hours_minutes_seconds(-8, -30, -30).unwrap().id(),
            "-08:30:30"
        );
    }

    #[test]
    fn equality_is_by_total_seconds() {
        assert_eq!(
            ZoneOffset::of_hours_minutes(2, 0).unwrap(),
            ZoneOffset::of_total_seconds(7200).unwrap()
        );
        assert!(ZoneOffset::of_hours(-5).unwrap() < ZoneOffset::UTC);
    }

    #[test]
    fn field_access() {
        let offset = ZoneOffset::of_hours(2).unwrap();
        assert_eq!(offset.get(TemporalField::OffsetSeconds).unwrap(), 7200);
        assert_eq!(
            offset.get(TemporalField::HourOfDay),
            Err(CivilError::UnsupportedField {
                field: TemporalField::HourOfDay
            })
        );
        let moved = offset.with(TemporalField::OffsetSeconds, -18000).unwrap();
        assert_eq!(moved.total_seconds(), -18000);
    }
}
