//! A recurring yearly transition template.

use crate::components::adjust;
use crate::components::{DayOfWeek, LocalDate, LocalDateTime, LocalTime, ZoneOffset};
use crate::fields::TemporalField;
use crate::utils;
use crate::zone::transition::ZoneOffsetTransition;
use crate::{CivilError, CivilResult};

/// How the local time of a transition rule is to be interpreted: as UTC, as
/// the wall time in force just before the transition, or as standard time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeDefinition {
    Utc,
    Wall,
    Standard,
}

impl TimeDefinition {
    /// Expresses a rule timestamp of this definition as the wall-clock local
    /// date-time in force just before the transition.
    pub(crate) fn to_wall(
        self,
        local: LocalDateTime,
        standard_offset: ZoneOffset,
        wall_before: ZoneOffset,
    ) -> CivilResult<LocalDateTime> {
        match self {
            TimeDefinition::Utc => {
                local.plus_seconds(i64::from(wall_before.total_seconds()))
            }
            TimeDefinition::Wall => Ok(local),
            TimeDefinition::Standard => local.plus_seconds(
                i64::from(wall_before.total_seconds())
                    - i64::from(standard_offset.total_seconds()),
            ),
        }
    }
}

/// A template producing one [`ZoneOffsetTransition`] per year, used for the
/// open-ended future tail of a zone's rules.
///
/// The day of the transition is selected by `day_of_month_indicator`: a
/// positive value names that day of the month; a negative value counts back
/// from the month end (−1 is the last day). When `day_of_week` is present
/// the date is then adjusted to that weekday, forward for a non-negative
/// indicator and backward for a negative one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneOffsetTransitionRule {
    month: u8,
    day_of_month_indicator: i8,
    day_of_week: Option<DayOfWeek>,
    local_time: LocalTime,
    time_definition: TimeDefinition,
    standard_offset: ZoneOffset,
    offset_before: ZoneOffset,
    offset_after: ZoneOffset,
}

impl ZoneOffsetTransitionRule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        month: u8,
        day_of_month_indicator: i8,
        day_of_week: Option<DayOfWeek>,
        local_time: LocalTime,
        time_definition: TimeDefinition,
        standard_offset: ZoneOffset,
        offset_before: ZoneOffset,
        offset_after: ZoneOffset,
    ) -> CivilResult<Self> {
        TemporalField::MonthOfYear
            .base_range()
            .check(i64::from(month), TemporalField::MonthOfYear)?;
        if day_of_month_indicator == 0 || !(-28..=31).contains(&day_of_month_indicator) {
            return Err(CivilError::zone_data(
                "day-of-month indicator must be non-zero and in -28..=31",
            ));
        }
        if local_time.nano() != 0 {
            return Err(CivilError::zone_data(
                "rule local time must not carry nanoseconds",
            ));
        }
        if offset_before == offset_after {
            return Err(CivilError::zone_data("rule offsets must differ"));
        }
        Ok(Self {
            month,
            day_of_month_indicator,
            day_of_week,
            local_time,
            time_definition,
            standard_offset,
            offset_before,
            offset_after,
        })
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day_of_month_indicator(&self) -> i8 {
        self.day_of_month_indicator
    }

    pub const fn day_of_week(&self) -> Option<DayOfWeek> {
        self.day_of_week
    }

    pub const fn local_time(&self) -> LocalTime {
        self.local_time
    }

    pub const fn time_definition(&self) -> TimeDefinition {
        self.time_definition
    }

    pub const fn standard_offset(&self) -> ZoneOffset {
        self.standard_offset
    }

    pub const fn offset_before(&self) -> ZoneOffset {
        self.offset_before
    }

    pub const fn offset_after(&self) -> ZoneOffset {
        self.offset_after
    }

    /// Materializes the transition this rule produces in the given year.
    pub fn create_transition(&self, year: i32) -> CivilResult<ZoneOffsetTransition> {
        let date = if self.day_of_month_indicator < 0 {
            let month_length =
                utils::days_in_month(self.month, utils::is_leap_year(year));
            let day = i16::from(month_length) + 1 + i16::from(self.day_of_month_indicator);
            let date = LocalDate::of(year, self.month, day as u8)?;
            match self.day_of_week {
                Some(dow) => adjust::previous_or_same(date, dow)?,
                None => date,
            }
        } else {
            let date = LocalDate::of(year, self.month, self.day_of_month_indicator as u8)?;
            match self.day_of_week {
                Some(dow) => adjust::next_or_same(date, dow)?,
                None => date,
            }
        };
        let local = date.at_time(self.local_time);
        let wall =
            self.time_definition
                .to_wall(local, self.standard_offset, self.offset_before)?;
        ZoneOffsetTransition::new(wall, self.offset_before, self.offset_after)
    }
}
