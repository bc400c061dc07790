//! A date-time paired with a fixed offset from UTC.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::components::{Instant, LocalDate, LocalDateTime, LocalTime, ZoneOffset};
use crate::fields::{Temporal, TemporalField, TemporalUnit, ValueRange};
use crate::{CivilError, CivilResult};

/// A date-time with a fixed offset, such as 2008-06-30T11:05:30+02:00.
///
/// The pair is authoritative: no normalization is applied, and two values
/// with the same instant but different offsets are structurally unequal.
/// Use [`OffsetDateTime::cmp_instant`] for time-line comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    local: LocalDateTime,
    offset: ZoneOffset,
}

impl OffsetDateTime {
    pub(crate) const fn new_unchecked(local: LocalDateTime, offset: ZoneOffset) -> Self {
        Self { local, offset }
    }

    /// Pairs a local date-time with an offset.
    pub const fn of(local: LocalDateTime, offset: ZoneOffset) -> Self {
        Self { local, offset }
    }

    /// The local view of an instant at the given offset.
    pub fn of_instant(instant: Instant, offset: ZoneOffset) -> CivilResult<Self> {
        let local =
            LocalDateTime::from_epoch_second(instant.epoch_second(), instant.nano(), offset)?;
        Ok(Self { local, offset })
    }

    /// The local date-time part.
    pub const fn date_time(self) -> LocalDateTime {
        self.local
    }

    /// The offset from UTC.
    pub const fn offset(self) -> ZoneOffset {
        self.offset
    }

    /// The date part.
    pub const fn date(self) -> LocalDate {
        self.local.date()
    }

    /// The time part.
    pub const fn time(self) -> LocalTime {
        self.local.time()
    }

    /// The instant this value represents on the UTC time-line.
    pub fn to_instant(self) -> Instant {
        Instant::new_unchecked(self.to_epoch_second(), self.local.nano())
    }

    /// Seconds from the epoch of the represented instant.
    pub fn to_epoch_second(self) -> i64 {
        self.local.to_epoch_second(self.offset)
    }

    /// Replaces the offset, keeping the local date-time (and therefore
    /// changing the instant).
    pub const fn with_offset_same_local(self, offset: ZoneOffset) -> Self {
        Self {
            local: self.local,
            offset,
        }
    }

    /// Replaces the offset, adjusting the local date-time to preserve the
    /// instant.
    pub fn with_offset_same_instant(self, offset: ZoneOffset) -> CivilResult<Self> {
        if offset == self.offset {
            return Ok(self);
        }
        let difference =
            i64::from(offset.total_seconds()) - i64::from(self.offset.total_seconds());
        Ok(Self {
            local: self.local.plus_seconds(difference)?,
            offset,
        })
    }

    /// Replaces the local date-time, keeping the offset.
    pub const fn with_date_time(self, local: LocalDateTime) -> Self {
        Self {
            local,
            offset: self.offset,
        }
    }

    /// Time-line order: by instant, then by local time for equal instants.
    pub fn cmp_instant(self, other: Self) -> Ordering {
        self.to_epoch_second()
            .cmp(&other.to_epoch_second())
            .then_with(|| self.local.nano().cmp(&other.local.nano()))
            .then_with(|| self.local.cmp(&other.local))
    }

    pub fn plus_days(self, days: i64) -> CivilResult<Self> {
        Ok(self.with_date_time(self.local.plus_days(days)?))
    }

    pub fn plus_hours(self, hours: i64) -> CivilResult<Self> {
        Ok(self.with_date_time(self.local.plus_hours(hours)?))
    }

    pub fn plus_seconds(self, seconds: i64) -> CivilResult<Self> {
        Ok(self.with_date_time(self.local.plus_seconds(seconds)?))
    }
}

impl Temporal for OffsetDateTime {
    fn is_supported(&self, field: TemporalField) -> bool {
        self.local.is_supported(field)
            || matches!(
                field,
                TemporalField::InstantSeconds | TemporalField::OffsetSeconds
            )
    }

    fn range(&self, field: TemporalField) -> CivilResult<ValueRange> {
        match field {
            TemporalField::InstantSeconds | TemporalField::OffsetSeconds => {
                Ok(field.base_range())
            }
            _ => self.local.range(field),
        }
    }

    fn get(&self, field: TemporalField) -> CivilResult<i64> {
        match field {
            TemporalField::InstantSeconds => Ok(self.to_epoch_second()),
            TemporalField::OffsetSeconds => Ok(i64::from(self.offset.total_seconds())),
            _ => self.local.get(field),
        }
    }

    fn with(&self, field: TemporalField, value: i64) -> CivilResult<Self> {
        match field {
            TemporalField::InstantSeconds => {
                let instant =
                    Instant::of_epoch_second_adjusted(value, i64::from(self.local.nano()))?;
                Self::of_instant(instant, self.offset)
            }
            TemporalField::OffsetSeconds => {
                Ok(self.with_offset_same_local(self.offset.with(field, value)?))
            }
            _ => Ok(self.with_date_time(self.local.with(field, value)?)),
        }
    }

    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        Ok(self.with_date_time(self.local.plus(amount, unit)?))
    }

    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        let end = end.with_offset_same_instant(self.offset)?;
        self.local.until(&end.local, unit)
    }
}

impl fmt::Display for OffsetDateTime {
    /// The ISO-8601 form, such as `2008-06-30T11:05:30+02:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.local, self.offset)
    }
}

impl FromStr for OffsetDateTime {
    type Err = CivilError;

    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_offset_date_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Temporal;

    fn odt(hour: u8, offset_hours: i32) -> OffsetDateTime {
        OffsetDateTime::of(
            LocalDateTime::of(
                LocalDate::of(2008, 6, 30).unwrap(),
                LocalTime::of(hour, 5, 30, 0).unwrap(),
            ),
            ZoneOffset::of_hours(offset_hours).unwrap(),
        )
    }

    #[test]
    fn instant_round_trip() {
        let value = odt(11, 2);
        let rebuilt = OffsetDateTime::of_instant(value.to_instant(), value.offset()).unwrap();
        assert_eq!(rebuilt, value);
    }

    #[test]
    fn same_instant_different_offsets_are_unequal() {
        let paris = odt(13, 2);
        let utc = odt(11, 0);
        assert_ne!(paris, utc);
        assert_eq!(paris.to_instant(), utc.to_instant());
        // Equal instants fall back to local order.
        assert_eq!(paris.cmp_instant(utc), Ordering::Greater);
        assert_eq!(
            paris.with_offset_same_instant(ZoneOffset::UTC).unwrap(),
            utc
        );
        assert_eq!(
            utc.with_offset_same_local(paris.offset()),
            odt(11, 2)
        );
    }

    #[test]
    fn instant_fields() {
        let value = odt(11, 2);
        assert_eq!(
            value.get(TemporalField::InstantSeconds).unwrap(),
            value.to_epoch_second()
        );
        assert_eq!(value.get(TemporalField::OffsetSeconds).unwrap(), 7200);
        let shifted = value
            .with(TemporalField::InstantSeconds, value.to_epoch_second() + 3600)
            .unwrap();
        assert_eq!(shifted.time().hour(), 12);
        let moved = value.with(TemporalField::OffsetSeconds, 0).unwrap();
        assert_eq!(moved.date_time(), value.date_time());
        assert_eq!(moved.offset(), ZoneOffset::UTC);
    }

    #[test]
    fn until_crosses_offsets() {
        let start = odt(11, 0);
        let end = odt(14, 2); // instant is 12:05:30Z
        assert_eq!(start.until(&end, TemporalUnit::Hours).unwrap(), 1);
    }
}
