//! The ambient time source, injected wherever "now" is needed.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::components::{
    Duration, Instant, LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZonedDateTime,
};
use crate::zone::ZoneId;
use crate::{CivilResult, ZoneOffset};

/// A source of the current instant paired with a zone.
///
/// The system clock reads the OS wall clock; fixed and offset clocks exist
/// for testing and for deliberately skewed views of time. Values never read
/// the ambient clock implicitly; callers pass one in.
#[derive(Debug, Clone)]
pub struct Clock(Inner);

#[derive(Debug, Clone)]
enum Inner {
    System { zone: ZoneId },
    Fixed { instant: Instant, zone: ZoneId },
    Offset { base: Box<Clock>, offset: Duration },
}

impl Clock {
    /// The system clock in the given zone.
    pub fn system(zone: ZoneId) -> Self {
        Self(Inner::System { zone })
    }

    /// The system clock at UTC.
    pub fn system_utc() -> Self {
        Self::system(ZoneId::from_offset(ZoneOffset::UTC))
    }

    /// The system clock in the zone reported by the operating system.
    ///
    /// Fails with [`crate::CivilError::UnknownZone`] when the reported
    /// identifier is not present in the registry.
    pub fn system_default_zone() -> CivilResult<Self> {
        let id = iana_time_zone::get_timezone().map_err(|_| {
            crate::CivilError::UnknownZone {
                id: "<system>".into(),
            }
        })?;
        Ok(Self::system(ZoneId::of(&id)?))
    }

    /// A clock frozen at an instant.
    pub fn fixed(instant: Instant, zone: ZoneId) -> Self {
        Self(Inner::Fixed { instant, zone })
    }

    /// A clock offset from another by a fixed duration.
    pub fn offset(base: Clock, offset: Duration) -> Self {
        Self(Inner::Offset {
            base: Box::new(base),
            offset,
        })
    }

    /// The current instant of this clock.
    pub fn instant(&self) -> CivilResult<Instant> {
        match &self.0 {
            Inner::System { .. } => Ok(system_instant()),
            Inner::Fixed { instant, .. } => Ok(*instant),
            Inner::Offset { base, offset } => base.instant()?.plus(*offset),
        }
    }

    /// The zone of this clock.
    pub fn zone(&self) -> &ZoneId {
        match &self.0 {
            Inner::System { zone } | Inner::Fixed { zone, .. } => zone,
            Inner::Offset { base, .. } => base.zone(),
        }
    }
}

fn system_instant() -> Instant {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => Instant::of_epoch_second_adjusted(
            elapsed.as_secs() as i64,
            i64::from(elapsed.subsec_nanos()),
        )
        .unwrap_or(Instant::EPOCH),
        Err(err) => {
            let before = err.duration();
            Instant::of_epoch_second_adjusted(
                -(before.as_secs() as i64),
                -i64::from(before.subsec_nanos()),
            )
            .unwrap_or(Instant::EPOCH)
        }
    }
}

impl Instant {
    /// The current instant of a clock.
    pub fn now(clock: &Clock) -> CivilResult<Instant> {
        clock.instant()
    }
}

impl ZonedDateTime {
    /// The current moment of a clock in the clock's zone.
    pub fn now(clock: &Clock) -> CivilResult<ZonedDateTime> {
        ZonedDateTime::of_instant(clock.instant()?, clock.zone().clone())
    }
}

impl OffsetDateTime {
    /// The current moment of a clock at the offset its zone has now.
    pub fn now(clock: &Clock) -> CivilResult<OffsetDateTime> {
        Ok(ZonedDateTime::now(clock)?.to_offset_date_time())
    }
}

impl LocalDateTime {
    /// The current wall-clock date-time of a clock.
    pub fn now(clock: &Clock) -> CivilResult<LocalDateTime> {
        Ok(ZonedDateTime::now(clock)?.date_time())
    }
}

impl LocalDate {
    /// The current date of a clock.
    pub fn now(clock: &Clock) -> CivilResult<LocalDate> {
        Ok(ZonedDateTime::now(clock)?.date())
    }
}

impl LocalTime {
    /// The current time of day of a clock.
    pub fn now(clock: &Clock) -> CivilResult<LocalTime> {
        Ok(ZonedDateTime::now(clock)?.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        // 2008-06-30T11:05:30Z.
        let instant = Instant::of_epoch_second(1_214_823_930);
        let clock = Clock::fixed(instant, ZoneId::of("Europe/Paris").unwrap());
        assert_eq!(Instant::now(&clock).unwrap(), instant);
        let date = LocalDate::now(&clock).unwrap();
        assert_eq!(date, LocalDate::of(2008, 6, 30).unwrap());
        let time = LocalTime::now(&clock).unwrap();
        assert_eq!(time, LocalTime::of(13, 5, 30, 0).unwrap());
        let zoned = ZonedDateTime::now(&clock).unwrap();
        assert_eq!(zoned.offset(), crate::ZoneOffset::of_hours(2).unwrap());
    }

    #[test]
    fn offset_clock_shifts_the_base() {
        let base = Clock::fixed(Instant::EPOCH, ZoneId::of("UTC").unwrap());
        let shifted = Clock::offset(base, Duration::of_hours(6).unwrap());
        assert_eq!(
            Instant::now(&shifted).unwrap(),
            Instant::of_epoch_second(6 * 3600)
        );
        assert_eq!(shifted.zone().id(), "UTC");
    }

    #[test]
    fn system_clock_ticks() {
        let clock = Clock::system_utc();
        let now = Instant::now(&clock).unwrap();
        // Later than 2020-01-01T00:00:00Z on any sane host.
        assert!(now.epoch_second() > 1_577_836_800);
    }
}
