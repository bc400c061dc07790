//! A date-time with a zone, honouring the zone's offset rules.

use core::fmt;
use core::str::FromStr;

use crate::components::{
    Duration, Instant, LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZoneOffset,
};
use crate::fields::{Temporal, TemporalField, TemporalUnit, ValueRange};
use crate::zone::resolver::{Resolver, RetainOffset};
use crate::zone::rules::LocalOffsetInfo;
use crate::zone::ZoneId;
use crate::{CivilError, CivilResult};

/// A date-time in a time zone, such as
/// `2008-06-30T11:05:30+02:00[Europe/Paris]`.
///
/// The triple of local date-time, offset, and zone always satisfies the
/// invariant that the offset is one of the zone's valid offsets for the
/// local date-time. Construction from a bare local date-time therefore goes
/// through a [`Resolver`] that decides gap and overlap cases.
///
/// Arithmetic is split by intent: field- and unit-based operations are
/// wall-clock (applied to the local date-time, then re-resolved against the
/// rules), while [`ZonedDateTime::plus_duration`] is absolute (applied to
/// the instant). Across a daylight-saving cutover the two disagree, by
/// design.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    local: LocalDateTime,
    offset: ZoneOffset,
    zone: ZoneId,
}

impl ZonedDateTime {
    /// Resolves a wall-clock local date-time in a zone.
    ///
    /// When the local date-time is unambiguous the single valid offset is
    /// used and the resolver is not consulted.
    pub fn of(
        local: LocalDateTime,
        zone: ZoneId,
        resolver: &dyn Resolver,
    ) -> CivilResult<Self> {
        let rules = zone.rules()?;
        match rules.offset_info(local) {
            LocalOffsetInfo::Unambiguous(offset) => Ok(Self {
                local,
                offset,
                zone,
            }),
            LocalOffsetInfo::InTransition(transition) => {
                let resolved = resolver.resolve(local, &zone, &transition, &rules)?;
                if !rules.is_valid_offset(resolved.date_time(), resolved.offset()) {
                    return Err(CivilError::ResolverBroken);
                }
                Ok(Self {
                    local: resolved.date_time(),
                    offset: resolved.offset(),
                    zone,
                })
            }
        }
    }

    /// The zoned view of an instant; every instant maps to exactly one
    /// offset, so no resolver is involved.
    pub fn of_instant(instant: Instant, zone: ZoneId) -> CivilResult<Self> {
        let rules = zone.rules()?;
        let offset = rules.offset_at_instant(instant);
        let local =
            LocalDateTime::from_epoch_second(instant.epoch_second(), instant.nano(), offset)?;
        Ok(Self {
            local,
            offset,
            zone,
        })
    }

    /// Accepts an offset date-time whose offset is valid for the zone.
    ///
    /// Fails with [`CivilError::DateTimeNonexistent`] when the local
    /// date-time falls in a gap, and [`CivilError::OffsetInvalidForZone`]
    /// when the offset is not one of the zone's valid offsets.
    pub fn of_offset_date_time(value: OffsetDateTime, zone: ZoneId) -> CivilResult<Self> {
        let rules = zone.rules()?;
        let local = value.date_time();
        match rules.offset_info(local) {
            LocalOffsetInfo::Unambiguous(offset) if offset == value.offset() => Ok(Self {
                local,
                offset,
                zone,
            }),
            LocalOffsetInfo::InTransition(transition)
                if transition.is_valid_offset(value.offset()) =>
            {
                Ok(Self {
                    local,
                    offset: value.offset(),
                    zone,
                })
            }
            LocalOffsetInfo::InTransition(transition) if transition.is_gap() => {
                Err(CivilError::DateTimeNonexistent {
                    local,
                    zone,
                })
            }
            _ => Err(CivilError::OffsetInvalidForZone {
                offset: value.offset(),
                local,
                zone,
            }),
        }
    }

    /// Assembles the triple directly, skipping rules validation. Reserved
    /// for the parser's unknown-region path.
    pub(crate) fn of_parts_unchecked(
        local: LocalDateTime,
        offset: ZoneOffset,
        zone: ZoneId,
    ) -> Self {
        Self {
            local,
            offset,
            zone,
        }
    }

    /// The local date-time part.
    pub const fn date_time(&self) -> LocalDateTime {
        self.local
    }

    /// The offset in force.
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    /// The zone identifier.
    pub const fn zone(&self) -> &ZoneId {
        &self.zone
    }

    pub const fn date(&self) -> LocalDate {
        self.local.date()
    }

    pub const fn time(&self) -> LocalTime {
        self.local.time()
    }

    /// The same moment as an offset date-time, dropping the zone.
    pub const fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::new_unchecked(self.local, self.offset)
    }

    /// The instant this value represents.
    pub fn to_instant(&self) -> Instant {
        self.to_offset_date_time().to_instant()
    }

    pub fn to_epoch_second(&self) -> i64 {
        self.local.to_epoch_second(self.offset)
    }

    /// Changes the zone keeping the local date-time, resolving with
    /// [`RetainOffset`] so a still-valid offset survives an overlap.
    pub fn with_zone_same_local(&self, zone: ZoneId) -> CivilResult<Self> {
        Self::of(self.local, zone, &RetainOffset(self.offset))
    }

    /// Changes the zone keeping the instant.
    pub fn with_zone_same_instant(&self, zone: ZoneId) -> CivilResult<Self> {
        Self::of_instant(self.to_instant(), zone)
    }

    /// Switches to the earlier of the two offsets when the local date-time
    /// is in an overlap; otherwise returns the value unchanged.
    pub fn with_earlier_offset_at_overlap(&self) -> CivilResult<Self> {
        self.with_overlap_offset(true)
    }

    /// Switches to the later of the two offsets when the local date-time is
    /// in an overlap; otherwise returns the value unchanged.
    pub fn with_later_offset_at_overlap(&self) -> CivilResult<Self> {
        self.with_overlap_offset(false)
    }

    fn with_overlap_offset(&self, earlier: bool) -> CivilResult<Self> {
        let rules = self.zone.rules()?;
        match rules.transition(self.local) {
            Some(transition) if transition.is_overlap() => {
                let offset = if earlier {
                    transition.offset_before()
                } else {
                    transition.offset_after()
                };
                Ok(Self {
                    local: self.local,
                    offset,
                    zone: self.zone.clone(),
                })
            }
            _ => Ok(self.clone()),
        }
    }

    fn resolved_retaining(&self, local: LocalDateTime) -> CivilResult<Self> {
        Self::of(local, self.zone.clone(), &RetainOffset(self.offset))
    }

    pub fn plus_years(&self, years: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_years(years)?)
    }

    pub fn plus_months(&self, months: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_months(months)?)
    }

    pub fn plus_weeks(&self, weeks: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_weeks(weeks)?)
    }

    pub fn plus_days(&self, days: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_days(days)?)
    }

    /// Wall-clock hours: applied to the local date-time, then re-resolved.
    pub fn plus_hours(&self, hours: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_hours(hours)?)
    }

    pub fn plus_minutes(&self, minutes: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_minutes(minutes)?)
    }

    pub fn plus_seconds(&self, seconds: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_seconds(seconds)?)
    }

    pub fn plus_nanos(&self, nanos: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus_nanos(nanos)?)
    }

    pub fn minus_days(&self, days: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.minus_days(days)?)
    }

    pub fn minus_hours(&self, hours: i64) -> CivilResult<Self> {
        self.resolved_retaining(self.local.minus_hours(hours)?)
    }

    /// Absolute arithmetic: adds to the instant and re-derives the local
    /// view; never consults a resolver.
    pub fn plus_duration(&self, duration: Duration) -> CivilResult<Self> {
        Self::of_instant(self.to_instant().plus(duration)?, self.zone.clone())
    }

    /// Absolute arithmetic on the instant, subtracting.
    pub fn minus_duration(&self, duration: Duration) -> CivilResult<Self> {
        Self::of_instant(self.to_instant().minus(duration)?, self.zone.clone())
    }
}

impl Temporal for ZonedDateTime {
    fn is_supported(&self, field: TemporalField) -> bool {
        field.is_date_based()
            || field.is_time_based()
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
                Self::of_instant(instant, self.zone.clone())
            }
            TemporalField::OffsetSeconds => {
                let offset = self.offset.with(field, value)?;
                Self::of_offset_date_time(
                    OffsetDateTime::of(self.local, offset),
                    self.zone.clone(),
                )
            }
            _ => self.resolved_retaining(self.local.with(field, value)?),
        }
    }

    fn plus(&self, amount: i64, unit: TemporalUnit) -> CivilResult<Self> {
        self.resolved_retaining(self.local.plus(amount, unit)?)
    }

    fn until(&self, end: &Self, unit: TemporalUnit) -> CivilResult<i64> {
        if unit.is_time_based() {
            self.to_offset_date_time()
                .until(&end.to_offset_date_time(), unit)
        } else {
            let end = end.with_zone_same_instant(self.zone.clone())?;
            self.local.until(&end.local, unit)
        }
    }
}

impl fmt::Display for ZonedDateTime {
    /// The ISO-8601 form with the zone identifier suffixed in brackets,
    /// such as `2008-06-30T11:05:30+02:00[Europe/Paris]`; the suffix is
    /// omitted when the zone is the offset itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_offset_date_time())?;
        if self.zone.as_offset() != Some(self.offset) {
            write!(f, "[{}]", self.zone)?;
        }
        Ok(())
    }
}

impl FromStr for ZonedDateTime {
    type Err = CivilError;

    fn from_str(s: &str) -> CivilResult<Self> {
        crate::text::parse::parse_zoned_date_time(s)
    }
}
