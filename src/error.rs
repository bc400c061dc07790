//! The error type for all fallible operations in the crate.

use core::fmt;

use crate::components::{LocalDateTime, ZoneOffset};
use crate::fields::{TemporalField, TemporalUnit};
use crate::zone::ZoneId;

/// The error produced by `civil_rs` operations.
///
/// Every fallible operation in the crate reports one of these kinds; there
/// are no default values on failure and no panicking fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CivilError {
    /// A scalar was outside the valid range of a field.
    ValueOutOfRange {
        field: TemporalField,
        value: i64,
        min: i64,
        max: i64,
    },
    /// The day does not exist in the given month.
    DateNotValid { year: i32, month: u8, day: u8 },
    /// The week does not exist in the given week-based year.
    WeekNotValid { week_based_year: i32, week: u8 },
    /// The value cannot answer a query for this field.
    UnsupportedField { field: TemporalField },
    /// The value cannot apply an amount of this unit.
    UnsupportedUnit { unit: TemporalUnit },
    /// A strict resolver met a local date-time inside a gap.
    DateTimeNonexistent { local: LocalDateTime, zone: ZoneId },
    /// A strict resolver met a local date-time inside an overlap.
    DateTimeAmbiguous { local: LocalDateTime, zone: ZoneId },
    /// The offset is not valid for the local date-time under the zone rules.
    OffsetInvalidForZone {
        offset: ZoneOffset,
        local: LocalDateTime,
        zone: ZoneId,
    },
    /// Checked 64-bit arithmetic overflowed.
    ArithmeticOverflow,
    /// Text could not be parsed.
    Parse {
        input: Box<str>,
        error_index: usize,
        message: &'static str,
    },
    /// The zone identifier is not present in the registry.
    UnknownZone { id: Box<str> },
    /// A resolver returned an offset that is invalid for the local date-time.
    ResolverBroken,
    /// A zone-rules data source was malformed or of an unsupported version.
    InvalidZoneData { message: Box<str> },
}

impl CivilError {
    pub(crate) fn parse(input: &str, error_index: usize, message: &'static str) -> Self {
        CivilError::Parse {
            input: input.into(),
            error_index,
            message,
        }
    }

    pub(crate) fn zone_data(message: impl Into<Box<str>>) -> Self {
        CivilError::InvalidZoneData {
            message: message.into(),
        }
    }
}

impl fmt::Display for CivilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CivilError::ValueOutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "value {value} for {field} is outside the valid range {min}..={max}"
            ),
            CivilError::DateNotValid { year, month, day } => {
                write!(f, "day {day} does not exist in {year:04}-{month:02}")
            }
            CivilError::WeekNotValid {
                week_based_year,
                week,
            } => {
                write!(f, "week {week} does not exist in week-based year {week_based_year}")
            }
            CivilError::UnsupportedField { field } => write!(f, "unsupported field {field}"),
            CivilError::UnsupportedUnit { unit } => write!(f, "unsupported unit {unit}"),
            CivilError::DateTimeNonexistent { local, zone } => {
                write!(f, "local date-time {local} does not exist in zone {zone}")
            }
            CivilError::DateTimeAmbiguous { local, zone } => {
                write!(f, "local date-time {local} is ambiguous in zone {zone}")
            }
            CivilError::OffsetInvalidForZone {
                offset,
                local,
                zone,
            } => write!(
                f,
                "offset {offset} is not valid for {local} in zone {zone}"
            ),
            CivilError::ArithmeticOverflow => write!(f, "arithmetic overflowed 64 bits"),
            CivilError::Parse {
                input,
                error_index,
                message,
            } => write!(f, "could not parse {input:?} at index {error_index}: {message}"),
            CivilError::UnknownZone { id } => write!(f, "unknown zone identifier {id:?}"),
            CivilError::ResolverBroken => {
                write!(f, "resolver produced an offset that is invalid for the zone")
            }
            CivilError::InvalidZoneData { message } => {
                write!(f, "invalid zone-rules data: {message}")
            }
        }
    }
}

impl std::error::Error for CivilError {}
