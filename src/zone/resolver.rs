//! Policies for resolving a local date-time that falls in a gap or overlap.

use crate::components::{LocalDateTime, OffsetDateTime, ZoneOffset};
use crate::zone::rules::ZoneRules;
use crate::zone::transition::ZoneOffsetTransition;
use crate::zone::ZoneId;
use crate::{CivilError, CivilResult};

/// A policy deciding the outcome when a wall-clock local date-time has zero
/// valid offsets (a gap) or two (an overlap).
///
/// Resolvers are chosen per operation, never stored in a value. The returned
/// pair must satisfy `rules.valid_offsets(local).contains(offset)`;
/// construction surfaces [`CivilError::ResolverBroken`] otherwise.
pub trait Resolver {
    /// Resolves a local date-time that falls inside `transition`.
    fn resolve(
        &self,
        local: LocalDateTime,
        zone: &ZoneId,
        transition: &ZoneOffsetTransition,
        rules: &ZoneRules,
    ) -> CivilResult<OffsetDateTime>;
}

/// Fails on both gaps and overlaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

/// Gap: the last instant before the gap, at the offset before. Overlap: the
/// later regime, at the offset after.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreGapPostOverlap;

/// Gap: the local shifted forward by the gap length, at the offset after.
/// Overlap: the earlier regime, at the offset before.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostGapPreOverlap;

/// Gap: the local shifted forward by the gap length, at the offset after.
/// Overlap: the offset before.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushForward;

/// Keeps a previously valid offset through an overlap where possible,
/// otherwise behaves as [`PostGapPreOverlap`]. Used when adjusting an
/// existing zoned value.
#[derive(Debug, Clone, Copy)]
pub struct RetainOffset(pub ZoneOffset);

fn shift_past_gap(
    local: LocalDateTime,
    transition: &ZoneOffsetTransition,
) -> CivilResult<OffsetDateTime> {
    let shifted = local.plus_seconds(transition.duration().seconds())?;
    Ok(shifted.at_offset(transition.offset_after()))
}

impl Resolver for Strict {
    fn resolve(
        &self,
        local: LocalDateTime,
        zone: &ZoneId,
        transition: &ZoneOffsetTransition,
        _rules: &ZoneRules,
    ) -> CivilResult<OffsetDateTime> {
        if transition.is_gap() {
            Err(CivilError::DateTimeNonexistent {
                local,
                zone: zone.clone(),
            })
        } else {
            Err(CivilError::DateTimeAmbiguous {
                local,
                zone: zone.clone(),
            })
        }
    }
}

impl Resolver for PreGapPostOverlap {
    fn resolve(
        &self,
        local: LocalDateTime,
        _zone: &ZoneId,
        transition: &ZoneOffsetTransition,
        _rules: &ZoneRules,
    ) -> CivilResult<OffsetDateTime> {
        if transition.is_gap() {
            let before = transition.date_time_before().minus_nanos(1)?;
            Ok(before.at_offset(transition.offset_before()))
        } else {
            Ok(local.at_offset(transition.offset_after()))
        }
    }
}

impl Resolver for PostGapPreOverlap {
    fn resolve(
        &self,
        local: LocalDateTime,
        _zone: &ZoneId,
        transition: &ZoneOffsetTransition,
        _rules: &ZoneRules,
    ) -> CivilResult<OffsetDateTime> {
        if transition.is_gap() {
            shift_past_gap(local, transition)
        } else {
            Ok(local.at_offset(transition.offset_before()))
        }
    }
}

impl Resolver for PushForward {
    fn resolve(
        &self,
        local: LocalDateTime,
        _zone: &ZoneId,
        transition: &ZoneOffsetTransition,
        _rules: &ZoneRules,
    ) -> CivilResult<OffsetDateTime> {
        if transition.is_gap() {
            shift_past_gap(local, transition)
        } else {
            Ok(local.at_offset(transition.offset_before()))
        }
    }
}

impl Resolver for RetainOffset {
    fn resolve(
        &self,
        local: LocalDateTime,
        zone: &ZoneId,
        transition: &ZoneOffsetTransition,
        rules: &ZoneRules,
    ) -> CivilResult<OffsetDateTime> {
        if transition.is_valid_offset(self.0) {
            Ok(local.at_offset(self.0))
        } else {
            PostGapPreOverlap.resolve(local, zone, transition, rules)
        }
    }
}
