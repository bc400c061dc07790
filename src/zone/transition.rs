//! A single discontinuity of the local time-line.

use core::cmp::Ordering;
use core::fmt;

use crate::components::{Duration, Instant, LocalDateTime, ZoneOffset};
use crate::{CivilError, CivilResult};

/// A transition between two offset regimes of a zone: either a gap (clocks
/// jump forward, some wall times never exist) or an overlap (clocks fall
/// back, some wall times exist twice).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneOffsetTransition {
    local_before: LocalDateTime,
    local_after: LocalDateTime,
    offset_before: ZoneOffset,
    offset_after: ZoneOffset,
    epoch_second: i64,
}

impl ZoneOffsetTransition {
    /// A transition at the given wall-clock moment, expressed at
    /// `offset_before`.
    ///
    /// The local date-time must have no sub-second component and the offsets
    /// must differ.
    pub fn new(
        transition_local: LocalDateTime,
        offset_before: ZoneOffset,
        offset_after: ZoneOffset,
    ) -> CivilResult<Self> {
        if offset_before == offset_after {
            return Err(CivilError::zone_data(
                "transition offsets must differ",
            ));
        }
        if transition_local.nano() != 0 {
            return Err(CivilError::zone_data(
                "transition local date-time must not carry nanoseconds",
            ));
        }
        let duration_seconds = i64::from(offset_after.total_seconds())
            - i64::from(offset_before.total_seconds());
        let local_after = transition_local.plus_seconds(duration_seconds)?;
        Ok(Self {
            local_before: transition_local,
            local_after,
            offset_before,
            offset_after,
            epoch_second: transition_local.to_epoch_second(offset_before),
        })
    }

    /// A transition at a UTC epoch second.
    pub fn of_epoch_second(
        epoch_second: i64,
        offset_before: ZoneOffset,
        offset_after: ZoneOffset,
    ) -> CivilResult<Self> {
        let local = LocalDateTime::from_epoch_second(epoch_second, 0, offset_before)?;
        Self::new(local, offset_before, offset_after)
    }

    /// The UTC instant of the transition.
    pub fn instant(&self) -> Instant {
        Instant::of_epoch_second(self.epoch_second)
    }

    /// The epoch second of the transition.
    pub const fn epoch_second(&self) -> i64 {
        self.epoch_second
    }

    /// The local date-time at the boundary, expressed at the offset before
    /// the transition; for a gap this is the first wall time that does not
    /// exist.
    pub const fn date_time_before(&self) -> LocalDateTime {
        self.local_before
    }

    /// The local date-time at the boundary, expressed at the offset after
    /// the transition.
    pub const fn date_time_after(&self) -> LocalDateTime {
        self.local_after
    }

    /// The offset in force before the transition.
    pub const fn offset_before(&self) -> ZoneOffset {
        self.offset_before
    }

    /// The offset in force at and after the transition.
    pub const fn offset_after(&self) -> ZoneOffset {
        self.offset_after
    }

    /// The size of the discontinuity: positive for a gap, negative for an
    /// overlap.
    pub fn duration(&self) -> Duration {
        Duration::of_seconds(
            i64::from(self.offset_after.total_seconds())
                - i64::from(self.offset_before.total_seconds()),
        )
    }

    /// Returns `true` when the clocks jumped forward.
    pub fn is_gap(&self) -> bool {
        self.offset_after.total_seconds() > self.offset_before.total_seconds()
    }

    /// Returns `true` when the clocks fell back.
    pub fn is_overlap(&self) -> bool {
        self.offset_after.total_seconds() < self.offset_before.total_seconds()
    }

    /// The offsets valid during this transition: empty for a gap, both
    /// offsets (earlier instant first) for an overlap.
    pub fn valid_offsets(&self) -> Vec<ZoneOffset> {
        if self.is_gap() {
            Vec::new()
        } else {
            vec![self.offset_before, self.offset_after]
        }
    }

    /// Returns `true` when the offset is one of [`Self::valid_offsets`].
    pub fn is_valid_offset(&self, offset: ZoneOffset) -> bool {
        !self.is_gap() && (offset == self.offset_before || offset == self.offset_after)
    }
}

impl PartialOrd for ZoneOffsetTransition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneOffsetTransition {
    /// Time-line order: transitions compare by their instant alone, so two
    /// transitions at the same instant compare equal even when their offsets
    /// differ.
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_second.cmp(&other.epoch_second)
    }
}

impl fmt::Display for ZoneOffsetTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transition[{} at {} {} to {}]",
            if self.is_gap() { "gap" } else { "overlap" },
            self.local_before,
            self.offset_before,
            self.offset_after
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LocalDate, LocalTime};

    fn local(year: i32, month: u8, day: u8, hour: u8) -> LocalDateTime {
        LocalDateTime::of(
            LocalDate::of(year, month, day).unwrap(),
            LocalTime::of(hour, 0, 0, 0).unwrap(),
        )
    }

    fn offset(hours: i32) -> ZoneOffset {
        ZoneOffset::of_hours(hours).unwrap()
    }

    #[test]
    fn gap_characteristics() {
        let t = ZoneOffsetTransition::new(local(2008, 3, 30, 1), offset(0), offset(1)).unwrap();
        assert!(t.is_gap());
        assert!(!t.is_overlap());
        assert_eq!(t.duration(), Duration::of_hours(1).unwrap());
        assert_eq!(t.date_time_before(), local(2008, 3, 30, 1));
        assert_eq!(t.date_time_after(), local(2008, 3, 30, 2));
        assert_eq!(t.instant().epoch_second(), local(2008, 3, 30, 1).to_epoch_second(offset(0)));
        assert!(t.valid_offsets().is_empty());
        assert!(!t.is_valid_offset(offset(0)));
    }

    #[test]
    fn overlap_characteristics() {
        let t = ZoneOffsetTransition::new(local(2008, 10, 26, 2), offset(1), offset(0)).unwrap();
        assert!(t.is_overlap());
        assert_eq!(t.duration(), Duration::of_hours(-1).unwrap());
        assert_eq!(t.date_time_after(), local(2008, 10, 26, 1));
        assert_eq!(t.valid_offsets(), vec![offset(1), offset(0)]);
        assert!(t.is_valid_offset(offset(0)));
        assert!(!t.is_valid_offset(offset(2)));
    }

    #[test]
    fn construction_invariants() {
        assert!(ZoneOffsetTransition::new(local(2008, 3, 30, 1), offset(1), offset(1)).is_err());
        let with_nanos = LocalDateTime::of(
            LocalDate::of(2008, 3, 30).unwrap(),
            LocalTime::of(1, 0, 0, 5).unwrap(),
        );
        assert!(ZoneOffsetTransition::new(with_nanos, offset(0), offset(1)).is_err());
    }

    #[test]
    fn ordering_is_by_instant() {
        let base = local(2008, 3, 30, 1);
        let earlier =
            ZoneOffsetTransition::new(base.minus_seconds(1).unwrap(), offset(0), offset(1))
                .unwrap();
        let mid = ZoneOffsetTransition::new(base, offset(0), offset(1)).unwrap();
        let later =
            ZoneOffsetTransition::new(base.plus_seconds(1).unwrap(), offset(0), offset(1)).unwrap();
        let mut sorted = vec![later.clone(), earlier.clone(), mid.clone()];
        sorted.sort();
        assert_eq!(sorted, vec![earlier, mid.clone(), later]);

        // Same instant, different offsets: equal under the canonical order.
        let same_instant =
            ZoneOffsetTransition::new(base.plus_hours(1).unwrap(), offset(1), offset(2)).unwrap();
        assert_eq!(mid.cmp(&same_instant), Ordering::Equal);
    }
}
