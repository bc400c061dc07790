//! `civil_rs` is a library for civil dates, times, and time zones.
//!
//! The crate provides the immutable value types of the civil time-line —
//! [`LocalDate`], [`LocalTime`], [`LocalDateTime`], [`Instant`],
//! [`Duration`], [`ZoneOffset`], [`OffsetDateTime`], and [`ZonedDateTime`] —
//! together with calendar arithmetic over the proleptic Gregorian calendar,
//! a polymorphic field/unit access protocol, ISO-8601 text input/output,
//! and a historical time-zone rules engine.
//!
//! The rules engine is the heart of the crate: it models the discontinuities
//! of the local time-line (gaps and overlaps at daylight-saving cutovers),
//! answers offset queries for any instant by transition lookup or by
//! extrapolating recurring yearly rules, and exposes a [`Resolver`] protocol
//! so callers choose a policy when a wall-clock moment is ambiguous or never
//! existed.
//!
//! [`Resolver`]: crate::zone::resolver::Resolver
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::too_many_lines
)]

pub mod chronology;
pub mod clock;
pub mod error;
pub mod fields;
pub mod text;
pub mod zone;

pub(crate) mod components;
pub(crate) mod utils;

#[doc(inline)]
pub use error::CivilError;

/// The `civil_rs` result type.
pub type CivilResult<T> = Result<T, CivilError>;

#[doc(inline)]
pub use crate::components::adjust;

pub use crate::clock::Clock;
pub use crate::components::{
    DayOfWeek, Duration, Instant, LocalDate, LocalDateTime, LocalTime, OffsetDateTime,
    ZoneOffset, ZonedDateTime,
};
pub use crate::fields::{Temporal, TemporalField, TemporalUnit, ValueRange};
pub use crate::zone::ZoneId;

/// Nanoseconds per second constant: 10^9.
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;
/// Seconds per day constant: 86,400.
pub const SECONDS_PER_DAY: i32 = 24 * 60 * 60;
/// Nanoseconds per day constant: 8.64e+13.
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY as i64 * NANOS_PER_SECOND as i64;
