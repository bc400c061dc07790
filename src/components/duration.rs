//! A signed elapsed amount of time in seconds and nanoseconds.

use core::fmt;
use core::str::FromStr;

use crate::components::Instant;
use crate::utils;
use crate::{CivilError, CivilResult, NANOS_PER_SECOND, SECONDS_PER_DAY};

const NANOS_PER_SECOND_I64: i64 = NANOS_PER_SECOND as i64;
const NANOS_PER_SECOND_I128: i128 = NANOS_PER_SECOND as i128;

/// A signed span of elapsed time, measured in seconds and nanoseconds.
///
/// The value is always stored normalized: `nanos` is in `0..1_000_000_000`
/// and the sign is carried entirely by `seconds`, so
/// `Duration { seconds: -1, nanos: 500_000_000 }` represents −0.5 s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: i64,
    nanos: u32,
}

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Duration = Duration {
        seconds: 0,
        nanos: 0,
    };

    pub(crate) const fn of_seconds_and_nanos_unchecked(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// A duration of whole seconds.
    pub const fn of_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// A duration of seconds with a nanosecond adjustment, normalized so the
    /// sign is carried by the seconds.
    pub fn of_seconds_adjusted(seconds: i64, nano_adjustment: i64) -> CivilResult<Self> {
        let seconds = utils::checked_add(
            seconds,
            utils::floor_div(nano_adjustment, NANOS_PER_SECOND_I64),
        )?;
        let nanos = utils::floor_mod(nano_adjustment, NANOS_PER_SECOND_I64) as u32;
        Ok(Self { seconds, nanos })
    }

    /// A duration of standard 24-hour days.
    pub fn of_days(days: i64) -> CivilResult<Self> {
        Ok(Self::of_seconds(utils::checked_mul(
            days,
            SECONDS_PER_DAY as i64,
        )?))
    }

    /// A duration of whole hours.
    pub fn of_hours(hours: i64) -> CivilResult<Self> {
        Ok(Self::of_seconds(utils::checked_mul(hours, 3600)?))
    }

    /// A duration of whole minutes.
    pub fn of_minutes(minutes: i64) -> CivilResult<Self> {
        Ok(Self::of_seconds(utils::checked_mul(minutes, 60)?))
    }

    /// A duration of milliseconds.
    pub const fn of_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1000),
            nanos: millis.rem_euclid(1000) as u32 * 1_000_000,
        }
    }

    /// A duration of nanoseconds.
    pub const fn of_nanos(nanos: i64) -> Self {
        Self {
            seconds: nanos.div_euclid(NANOS_PER_SECOND_I64),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND_I64) as u32,
        }
    }

    /// The elapsed duration from `start` to `end` on the UTC time-line.
    pub fn between(start: Instant, end: Instant) -> CivilResult<Self> {
        let seconds = utils::checked_sub(end.epoch_second(), start.epoch_second())?;
        Self::of_seconds_adjusted(
            seconds,
            i64::from(end.nano()) - i64::from(start.nano()),
        )
    }

    pub(crate) fn from_total_nanos(total: i128) -> CivilResult<Self> {
        let seconds = total.div_euclid(NANOS_PER_SECOND_I128);
        let seconds = i64::try_from(seconds).map_err(|_| CivilError::ArithmeticOverflow)?;
        Ok(Self {
            seconds,
            nanos: total.rem_euclid(NANOS_PER_SECOND_I128) as u32,
        })
    }

    pub(crate) fn total_nanos(self) -> i128 {
        i128::from(self.seconds) * NANOS_PER_SECOND_I128 + i128::from(self.nanos)
    }

    /// The whole-seconds part of the duration; carries the sign.
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// The nanosecond adjustment, always in `0..1_000_000_000`.
    pub const fn nanos(self) -> u32 {
        self.nanos
    }

    /// Returns `true` for the zero-length duration.
    pub const fn is_zero(self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    /// Returns `true` when the duration is strictly negative.
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Adds another duration, checked.
    pub fn plus(self, other: Duration) -> CivilResult<Self> {
        let seconds = utils::checked_add(self.seconds, other.seconds)?;
        Self::of_seconds_adjusted(seconds, i64::from(self.nanos) + i64::from(other.nanos))
    }

    /// Subtracts another duration, checked.
    pub fn minus(self, other: Duration) -> CivilResult<Self> {
        let seconds = utils::checked_sub(self.seconds, other.seconds)?;
        Self::of_seconds_adjusted(seconds, i64::from(self.nanos) - i64::from(other.nanos))
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

    /// Multiplies the duration by a scalar, checked.
    pub fn multiplied_by(self, scalar: i64) -> CivilResult<Self> {
        let total = self
            .total_nanos()
            .checked_mul(i128::from(scalar))
            .ok_or(CivilError::ArithmeticOverflow)?;
        Self::from_total_nanos(total)
    }

    /// Divides the duration by a scalar, truncating toward zero.
    pub fn divided_by(self, divisor: i64) -> CivilResult<Self> {
        if divisor == 0 {
            return Err(CivilError::ArithmeticOverflow);
        }
        Self::from_total_nanos(self.total_nanos() / i128::from(divisor))
    }

    /// The negated duration, checked.
    pub fn negated(self) -> CivilResult<Self> {
        self.multiplied_by(-1)
    }

    /// The absolute length of the duration.
    pub fn abs(self) -> CivilResult<Self> {
        if self.is_negative() {
            self.negated()
        } else {
            Ok(self)
        }
    }

    /// The total length in milliseconds, checked.
    pub fn to_millis(self) -> CivilResult<i64> {
        let millis = utils::checked_mul(self.seconds, 1000)?;
        utils::checked_add(millis, i64::from(self.nanos / 1_000_000))
    }

    /// The total length in nanoseconds, checked.
    pub fn to_nanos(self) -> CivilResult<i64> {
        let nanos = utils::checked_mul(self.seconds, NANOS_PER_SECOND_I64)?;
        utils::checked_add(nanos, i64::from(self.nanos))
    }
}

impl fmt::Display for Duration {
    /// ISO-8601 seconds-based representation, such as `PT2H30M` or
    /// `PT-0.5S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let secs = self.seconds % 60;
        let mut buf = String::with_capacity(24);
        buf.push_str("PT");
        if hours != 0 {
            buf.push_str(&hours.to_string());
            buf.push('H');
        }
        if minutes != 0 {
            buf.push_str(&minutes.to_string());
            buf.push('M');
        }
        if secs == 0 && self.nanos == 0 && buf.len() > 2 {
            return f.write_str(&buf);
        }
        if secs < 0 && self.nanos > 0 {
            if secs == -1 {
                buf.push_str("-0");
            } else {
                buf.push_str(&(secs + 1).to_string());
            }
        } else {
            buf.push_str(&secs.to_string());
        }
        if self.nanos > 0 {
            let pos = buf.len();
            if secs < 0 {
                buf.push_str(&(2 * NANOS_PER_SECOND - self.nanos).to_string());
            } else {
                buf.push_str(&(self.nanos + NANOS_PER_SECOND).to_string());
            }
            while buf.ends_with('0') {
                buf.pop();
            }
            // The leading digit of the appended block marks the decimal point.
            buf.replace_range(pos..=pos, ".");
        }
        buf.push('S');
        f.write_str(&buf)
    }
}

impl FromStr for Duration {
    type Err = CivilError;

    /// Strict ISO-8601 parse of the seconds-based representation: an
    /// optional sign, `P`, an optional days component, and an optional `T`
    /// section with hours, minutes, and fractional seconds. Calendar units
    /// (weeks, months, years) are rejected.
    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_duration(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_carries_sign_on_seconds() {
        let d = Duration::of_seconds_adjusted(0, -500_000_000).unwrap();
        assert_eq!(d.seconds(), -1);
        assert_eq!(d.nanos(), 500_000_000);
        assert!(d.is_negative());

        let d = Duration::of_nanos(-1);
        assert_eq!(d.seconds(), -1);
        assert_eq!(d.nanos(), 999_999_999);
    }

    #[test]
    fn of_millis_negative() {
        let d = Duration::of_millis(-1500);
        assert_eq!(d.seconds(), -2);
        assert_eq!(d.nanos(), 500_000_000);
        assert_eq!(d.to_millis().unwrap(), -1500);
    }

    #[test]
    fn arithmetic() {
        let d = Duration::of_seconds(10).plus(Duration::of_nanos(500)).unwrap();
        assert_eq!(d.seconds(), 10);
        assert_eq!(d.nanos(), 500);
        let e = d.minus(Duration::of_seconds(11)).unwrap();
        assert_eq!(e.seconds(), -1);
        assert_eq!(e.nanos(), 500);

        let tripled = Duration::of_seconds_adjusted(1, 500_000_000)
            .unwrap()
            .multiplied_by(3)
            .unwrap();
        assert_eq!(tripled, Duration::of_seconds_adjusted(4, 500_000_000).unwrap());

        let halved = Duration::of_seconds(3).divided_by(2).unwrap();
        assert_eq!(halved, Duration::of_millis(1500));
    }

    #[test]
    fn arithmetic_overflow() {
        assert_eq!(
            Duration::of_seconds(i64::MAX).plus_seconds(1),
            Err(CivilError::ArithmeticOverflow)
        );
        assert_eq!(Duration::of_days(i64::MAX), Err(CivilError::ArithmeticOverflow));
        assert_eq!(
            Duration::of_seconds(1).divided_by(0),
            Err(CivilError::ArithmeticOverflow)
        );
        assert_eq!(
            Duration::of_seconds(i64::MIN).negated(),
            Err(CivilError::ArithmeticOverflow)
        );
    }

    #[test]
    fn between_instants() {
        let start = Instant::of_epoch_second(10);
        let end = Instant::of_epoch_second_adjusted(12, 500_000_000).unwrap();
        assert_eq!(
            Duration::between(start, end).unwrap(),
            Duration::of_millis(2500)
        );
        assert_eq!(
            Duration::between(end, start).unwrap(),
            Duration::of_millis(-2500)
        );
    }

    #[test]
    fn display_iso_forms() {
        assert_eq!(Duration::ZERO.to_string(), "PT0S");
        assert_eq!(Duration::of_seconds(9000).to_string(), "PT2H30M");
        assert_eq!(Duration::of_seconds(61).to_string(), "PT1M1S");
        assert_eq!(Duration::of_millis(1500).to_string(), "PT1.5S");
        assert_eq!(
            Duration::of_seconds_adjusted(-1, 500_000_000)
                .unwrap()
                .to_string(),
            "PT-0.5S"
        );
        assert_eq!(Duration::of_seconds(-61).to_string(), "PT-1M-1S");
        assert_eq!(Duration::of_nanos(1).to_string(), "PT0.000000001S");
    }

    #[test]
    fn ordering_is_timeline_order() {
        let a = Duration::of_millis(-500);
        let b = Duration::ZERO;
        let c = Duration::of_nanos(1);
        assert!(a < b && b < c);
    }
}
