//! A point on the UTC time-line.

use core::fmt;
use core::str::FromStr;

use crate::components::{Duration, OffsetDateTime, ZoneOffset};
use crate::fields::{Temporal, TemporalField, TemporalUnit};
use crate::utils;
use crate::{CivilError, CivilResult, NANOS_PER_SECOND};

/// An instantaneous point on the UTC time-line, measured in seconds and
/// nanoseconds from 1970-01-01T00:00:00Z with a fixed 86,400 s/day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    epoch_second: i64,
    nano: u32,
}

impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const EPOCH: Instant = Instant {
        epoch_second: 0,
        nano: 0,
    };

    pub(crate) const fn new_unchecked(epoch_second: i64, nano: u32) -> Self {
        Self { epoch_second, nano }
    }

    /// An instant at a whole second offset from the epoch.
    pub const fn of_epoch_second(epoch_second: i64) -> Self {
        Self {
            epoch_second,
            nano: 0,
        }
    }

    /// An instant at a second offset with a nanosecond adjustment,
    /// normalized so `nano` lands in `0..1_000_000_000`.
    pub fn of_epoch_second_adjusted(
        epoch_second: i64,
        nano_adjustment: i64,
    ) -> CivilResult<Self> {
        let seconds = utils::checked_add(
            epoch_second,
            utils::floor_div(nano_adjustment, NANOS_PER_SECOND as i64),
        )?;
        Ok(Self {
            epoch_second: seconds,
            nano: utils::floor_mod(nano_adjustment, NANOS_PER_SECOND as i64) as u32,
        })
    }

    /// An instant at a millisecond offset from the epoch.
    pub const fn of_epoch_milli(epoch_milli: i64) -> Self {
        Self {
            epoch_second: epoch_milli.div_euclid(1000),
            nano: epoch_milli.rem_euclid(1000) as u32 * 1_000_000,
        }
    }

    /// Seconds from the epoch; may be negative.
    pub const fn epoch_second(self) -> i64 {
        self.epoch_second
    }

    /// Nanosecond-of-second, always in `0..1_000_000_000`.
    pub const fn nano(self) -> u32 {
        self.nano
    }

    /// The instant as milliseconds from the epoch, checked.
    pub fn to_epoch_milli(self) -> CivilResult<i64> {
        let millis = utils::checked_mul(self.epoch_second, 1000)?;
        utils::checked_add(millis, i64::from(self.nano / 1_000_000))
    }

    /// Adds a duration, checked.
    pub fn plus(self, duration: Duration) -> CivilResult<Self> {
        let seconds = utils::checked_add(self.epoch_second, duration.seconds())?;
        Self::of_epoch_second_adjusted(
            seconds,
            i64::from(self.nano) + i64::from(duration.nanos()),
        )
    }

    /// Subtracts a duration, checked.
    pub fn minus(self, duration: Duration) -> CivilResult<Self> {
        let seconds = utils::checked_sub(self.epoch_second, duration.seconds())?;
        Self::of_epoch_second_adjusted(
            seconds,
            i64::from(self.nano) - i64::from(duration.nanos()),
        )
    }

    pub fn plus_seconds(self, seconds: i64) -> CivilResult<Self> {
        self.plus(Duration::of_seconds(seconds))
    }

    pub fn plus_millis(self, millis: i64) -> CivilResult<Self> {
        self.plus(Duration::of_millis(millis))
    }

    pub fn plus_nanos(self, nanos: i64) -> CivilResult<Self> {
        self.plus(Duration::of_nanos(nanos))
    }

    pub fn minus_seconds(self, seconds: i64) -> CivilResult<Self> {
        self.minus(Duration::of_seconds(seconds))
    }

    pub fn minus_nanos(self, nanos: i64) -> CivilResult<Self> {
        self.minus(Duration::of_nanos(nanos))
    }

    /// The local view of this instant at a fixed offset.
    ///
    /// Fails with [`CivilError::ArithmeticOverflow`] when the instant lies
    /// beyond the materializable year range.
    pub fn at_offset(self, offset: ZoneOffset) -> CivilResult<OffsetDateTime> {
        OffsetDateTime::of_instant(self, offset)
    }
}

impl Temporal for Instant {
    fn is_supported(&self, field: TemporalField) -> bool {
        matches!(
            field,
            TemporalField::InstantSeconds
                | TemporalField::NanoOfSecond
                | TemporalField::MicroOfSecond
                | TemporalField::MilliOfSecond
        )
    }

    fn get(&self, field: TemporalField) -> CivilResult<i64> {
        match field {
            TemporalField::InstantSeconds => Ok(self.epoch_second),
            TemporalField::NanoOfSecond => Ok(i64::from(self.nano)),
            TemporalField::MicroOfSecond => Ok(i64::from(self.nano / 1_000)),
            TemporalField::MilliOfSecond => Ok(i64::from(self.nano / 1_000_000)),
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self> {
        let value = self.range(field)?.check(value, field)?;
        match field {
            TemporalField::InstantSeconds => Ok(Self {
                epoch_second: value,
                nano: self.nano,
            }),
            TemporalField::NanoOfSecond => Ok(Self {
                epoch_second: self.epoch_second,
                nano: value as u32,
            }),
            TemporalField::MicroOfSecond => Ok(Self {
                epoch_second: self.epoch_second,
                nano: value as u32 * 1_000,
            }),
            TemporalField::MilliOfSecond => Ok(Self {
                epoch_second: self.epoch_second,
                nano: value as u32 * 1_000_000,
            }),
            _ => Err(CivilError::UnsupportedField { field }),
        }
    }

    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        match unit {
            TemporalUnit::Nanos => self.plus_nanos(amount),
            TemporalUnit::Micros => Instant::plus(*self, Duration::of_seconds_adjusted(
                amount.div_euclid(1_000_000),
                amount.rem_euclid(1_000_000) * 1_000,
            )?),
            TemporalUnit::Millis => self.plus_millis(amount),
            TemporalUnit::Seconds => self.plus_seconds(amount),
            TemporalUnit::Minutes => self.plus_seconds(utils::checked_mul(amount, 60)?),
            TemporalUnit::Hours => self.plus_seconds(utils::checked_mul(amount, 3600)?),
            TemporalUnit::HalfDays => self.plus_seconds(utils::checked_mul(amount, 43_200)?),
            TemporalUnit::Days => self.plus_seconds(utils::checked_mul(amount, 86_400)?),
            _ => Err(CivilError::UnsupportedUnit { unit }),
        }
    }

    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        let nanos = (i128::from(end.epoch_second) - i128::from(self.epoch_second))
            * i128::from(NANOS_PER_SECOND)
            + (i128::from(end.nano) - i128::from(self.nano));
        let per_unit: i128 = match unit {
            TemporalUnit::Nanos => 1,
            TemporalUnit::Micros => 1_000,
            TemporalUnit::Millis => 1_000_000,
            TemporalUnit::Seconds => 1_000_000_000,
            TemporalUnit::Minutes => 60_000_000_000,
            TemporalUnit::Hours => 3_600_000_000_000,
            TemporalUnit::HalfDays => 43_200_000_000_000,
            TemporalUnit::Days => 86_400_000_000_000,
            _ => return Err(CivilError::UnsupportedUnit { unit }),
        };
        i64::try_from(nanos / per_unit).map_err(|_| CivilError::ArithmeticOverflow)
    }
}

impl fmt::Display for Instant {
    /// The ISO-8601 view of the instant at UTC, such as
    /// `2008-06-30T11:05:30Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.at_offset(ZoneOffset::UTC) {
            Ok(odt) => write!(f, "{odt}"),
            Err(_) => write!(f, "Instant[{}s, {}ns]", self.epoch_second, self.nano),
        }
    }
}

impl FromStr for Instant {
    type Err = CivilError;

    /// Parses an ISO-8601 offset date-time and resolves it to the UTC
    /// time-line, accepting any offset.
    fn from_str(s: &str) -> CivilResult<Self> {
        let odt: OffsetDateTime = s.parse()?;
        Ok(odt.to_instant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_milli_round_trip() {
        let i = Instant::of_epoch_milli(-1);
        assert_eq!(i.epoch_second(), -1);
        assert_eq!(i.nano(), 999_000_000);
        assert_eq!(i.to_epoch_milli().unwrap(), -1);

        let i = Instant::of_epoch_milli(1_215_662_400_123);
        assert_eq!(i.to_epoch_milli().unwrap(), 1_215_662_400_123);
    }

    #[test]
    fn plus_duration_normalizes() {
        let i = Instant::of_epoch_second(10)
            .plus(Duration::of_nanos(-1))
            .unwrap();
        assert_eq!(i.epoch_second(), 9);
        assert_eq!(i.nano(), 999_999_999);
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            Instant::of_epoch_second(i64::MAX).plus_seconds(1),
            Err(CivilError::ArithmeticOverflow)
        );
    }

    #[test]
    fn field_protocol() {
        let instant = Instant::of_epoch_second_adjusted(120, 123_456_789).unwrap();
        assert_eq!(instant.get(TemporalField::InstantSeconds).unwrap(), 120);
        assert_eq!(instant.get(TemporalField::MilliOfSecond).unwrap(), 123);
        assert_eq!(
            instant.get(TemporalField::DayOfMonth),
            Err(CivilError::UnsupportedField {
                field: TemporalField::DayOfMonth
            })
        );
        assert_eq!(
            instant.with(TemporalField::NanoOfSecond, 0).unwrap(),
            Instant::of_epoch_second(120)
        );
        let later = Temporal::plus(&instant, 90, TemporalUnit::Minutes).unwrap();
        assert_eq!(later.epoch_second(), 120 + 5400);
        assert_eq!(instant.until(&later, TemporalUnit::Hours).unwrap(), 1);
        assert_eq!(
            Temporal::plus(&instant, 1, TemporalUnit::Months),
            Err(CivilError::UnsupportedUnit {
                unit: TemporalUnit::Months
            })
        );
    }

    #[test]
    fn ordering() {
        let a = Instant::of_epoch_second(-1);
        let b = Instant::of_epoch_second_adjusted(-1, 1).unwrap();
        let c = Instant::EPOCH;
        assert!(a < b && b < c);
    }
}
