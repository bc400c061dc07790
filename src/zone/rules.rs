//! The rules mapping instants and local date-times to offsets for a zone.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::components::{Duration, Instant, LocalDate, LocalDateTime, ZoneOffset};
use crate::fields::{MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR};
use crate::utils;
use crate::zone::rule::ZoneOffsetTransitionRule;
use crate::zone::transition::ZoneOffsetTransition;
use crate::{CivilError, CivilResult, SECONDS_PER_DAY};

/// Materialized tail years kept before the cache is reset.
const YEAR_CACHE_CAPACITY: usize = 128;

/// The answer to an offset query for a local date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOffsetInfo {
    /// Exactly one offset is valid.
    Unambiguous(ZoneOffset),
    /// The local date-time falls inside a gap or an overlap.
    InTransition(ZoneOffsetTransition),
}

/// The complete offset history of a zone: explicit transitions over a finite
/// historical window, plus recurring rules projecting the open-ended tail.
///
/// A fixed zone is represented by an empty history whose single wall offset
/// answers every query. Instances are immutable and shared; the only interior
/// state is a memoised materialisation of the tail rules.
#[derive(Debug)]
pub struct ZoneRules {
    standard_instants: Box<[i64]>,
    standard_offsets: Box<[ZoneOffset]>,
    savings_instants: Box<[i64]>,
    wall_offsets: Box<[ZoneOffset]>,
    /// Local boundaries of each wall transition, flattened to (smaller,
    /// larger) pairs so the whole vector is sorted.
    savings_local_transitions: Box<[LocalDateTime]>,
    transitions: Box<[ZoneOffsetTransition]>,
    last_rules: Box<[ZoneOffsetTransitionRule]>,
    year_cache: Mutex<FxHashMap<i32, Arc<[ZoneOffsetTransition]>>>,
}

impl ZoneRules {
    /// Rules for a fixed-offset zone.
    pub fn of_fixed(offset: ZoneOffset) -> Self {
        Self {
            standard_instants: Box::default(),
            standard_offsets: Box::from([offset]),
            savings_instants: Box::default(),
            wall_offsets: Box::from([offset]),
            savings_local_transitions: Box::default(),
            transitions: Box::default(),
            last_rules: Box::default(),
            year_cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Rules from an explicit history.
    ///
    /// `standard_transitions` are the standard-offset changes and
    /// `wall_transitions` every wall-offset change, both ordered with
    /// strictly increasing instants and chained offsets;
    /// `last_rules` is the recurring tail (an even count, typically two)
    /// effective beyond the final wall transition.
    pub fn new(
        base_standard_offset: ZoneOffset,
        base_wall_offset: ZoneOffset,
        standard_transitions: Vec<ZoneOffsetTransition>,
        wall_transitions: Vec<ZoneOffsetTransition>,
        last_rules: Vec<ZoneOffsetTransitionRule>,
    ) -> CivilResult<Self> {
        let mut standard_instants = Vec::with_capacity(standard_transitions.len());
        let mut standard_offsets = vec![base_standard_offset];
        for transition in &standard_transitions {
            if transition.offset_before() != *standard_offsets.last().unwrap_or(&base_standard_offset) {
                return Err(CivilError::zone_data(
                    "standard transitions must chain their offsets",
                ));
            }
            if standard_instants
                .last()
                .is_some_and(|last| *last >= transition.epoch_second())
            {
                return Err(CivilError::zone_data(
                    "standard transition instants must be strictly increasing",
                ));
            }
            standard_instants.push(transition.epoch_second());
            standard_offsets.push(transition.offset_after());
        }

        let mut savings_instants = Vec::with_capacity(wall_transitions.len());
        let mut wall_offsets = vec![base_wall_offset];
        let mut savings_local_transitions = Vec::with_capacity(wall_transitions.len() * 2);
        for transition in &wall_transitions {
            if transition.offset_before() != *wall_offsets.last().unwrap_or(&base_wall_offset) {
                return Err(CivilError::zone_data(
                    "wall transitions must chain their offsets",
                ));
            }
            if savings_instants
                .last()
                .is_some_and(|last| *last >= transition.epoch_second())
            {
                return Err(CivilError::zone_data(
                    "wall transition instants must be strictly increasing",
                ));
            }
            savings_instants.push(transition.epoch_second());
            wall_offsets.push(transition.offset_after());
            if transition.is_gap() {
                savings_local_transitions.push(transition.date_time_before());
                savings_local_transitions.push(transition.date_time_after());
            } else {
                savings_local_transitions.push(transition.date_time_after());
                savings_local_transitions.push(transition.date_time_before());
            }
        }

        if !last_rules.is_empty() {
            if last_rules.len() % 2 != 0 {
                return Err(CivilError::zone_data(
                    "recurring rules must come in pairs",
                ));
            }
            if wall_transitions.is_empty() {
                return Err(CivilError::zone_data(
                    "recurring rules require at least one explicit transition",
                ));
            }
        }

        Ok(Self {
            standard_instants: standard_instants.into_boxed_slice(),
            standard_offsets: standard_offsets.into_boxed_slice(),
            savings_instants: savings_instants.into_boxed_slice(),
            wall_offsets: wall_offsets.into_boxed_slice(),
            savings_local_transitions: savings_local_transitions.into_boxed_slice(),
            transitions: wall_transitions.into_boxed_slice(),
            last_rules: last_rules.into_boxed_slice(),
            year_cache: Mutex::new(FxHashMap::default()),
        })
    }

    /// Returns `true` when this zone has a single offset for all time.
    pub fn is_fixed(&self) -> bool {
        self.savings_instants.is_empty() && self.last_rules.is_empty()
    }

    /// The explicit wall-offset transitions, in time-line order.
    pub fn transitions(&self) -> &[ZoneOffsetTransition] {
        &self.transitions
    }

    /// The recurring rules governing the open-ended tail.
    pub fn transition_rules(&self) -> &[ZoneOffsetTransitionRule] {
        &self.last_rules
    }

    pub(crate) fn standard_instants(&self) -> &[i64] {
        &self.standard_instants
    }

    pub(crate) fn standard_offsets(&self) -> &[ZoneOffset] {
        &self.standard_offsets
    }

    pub(crate) fn wall_offsets(&self) -> &[ZoneOffset] {
        &self.wall_offsets
    }

    fn last_wall_offset(&self) -> ZoneOffset {
        self.wall_offsets[self.wall_offsets.len() - 1]
    }

    // ==== Lookup by instant ====

    /// The offset in force at an instant.
    pub fn offset_at_instant(&self, instant: Instant) -> ZoneOffset {
        let epoch_second = instant.epoch_second();
        if !self.last_rules.is_empty()
            && self
                .savings_instants
                .last()
                .is_some_and(|last| epoch_second > *last)
        {
            let year = find_year(epoch_second, self.last_wall_offset());
            let transitions = self.transitions_for_year(year);
            for transition in transitions.iter() {
                if epoch_second < transition.epoch_second() {
                    return transition.offset_before();
                }
            }
            return transitions
                .last()
                .map_or(self.last_wall_offset(), ZoneOffsetTransition::offset_after);
        }
        match self.savings_instants.binary_search(&epoch_second) {
            Ok(index) => self.wall_offsets[index + 1],
            Err(insertion) => self.wall_offsets[insertion],
        }
    }

    /// The standard offset at an instant, ignoring daylight savings.
    pub fn standard_offset(&self, instant: Instant) -> ZoneOffset {
        match self.standard_instants.binary_search(&instant.epoch_second()) {
            Ok(index) => self.standard_offsets[index + 1],
            Err(insertion) => self.standard_offsets[insertion],
        }
    }

    /// The daylight savings in force at an instant: the wall offset minus
    /// the standard offset.
    pub fn daylight_savings(&self, instant: Instant) -> Duration {
        Duration::of_seconds(
            i64::from(self.offset_at_instant(instant).total_seconds())
                - i64::from(self.standard_offset(instant).total_seconds()),
        )
    }

    /// Returns `true` when daylight savings is in force at the instant.
    pub fn is_daylight_savings(&self, instant: Instant) -> bool {
        !self.daylight_savings(instant).is_zero()
    }

    // ==== Lookup by local date-time ====

    /// Classifies a local date-time: unambiguous, or inside a transition.
    pub fn offset_info(&self, local: LocalDateTime) -> LocalOffsetInfo {
        if !self.last_rules.is_empty()
            && self
                .savings_local_transitions
                .last()
                .is_some_and(|last| local > *last)
        {
            let transitions = self.transitions_for_year(local.year());
            let mut info = LocalOffsetInfo::Unambiguous(self.last_wall_offset());
            for transition in transitions.iter() {
                info = find_offset_info(local, transition);
                let settled = match &info {
                    LocalOffsetInfo::InTransition(_) => true,
                    LocalOffsetInfo::Unambiguous(offset) => {
                        *offset == transition.offset_before()
                    }
                };
                if settled {
                    return info;
                }
            }
            return info;
        }

        let locals = &self.savings_local_transitions;
        if locals.is_empty() {
            return LocalOffsetInfo::Unambiguous(self.wall_offsets[0]);
        }
        let index = match locals.binary_search(&local) {
            Ok(mut index) => {
                if index < locals.len() - 1 && locals[index] == locals[index + 1] {
                    index += 1;
                }
                index
            }
            Err(0) => return LocalOffsetInfo::Unambiguous(self.wall_offsets[0]),
            Err(insertion) => insertion - 1,
        };
        if index % 2 == 0 {
            // Inside the discontinuity of transition index/2.
            LocalOffsetInfo::InTransition(self.transitions[index / 2].clone())
        } else {
            LocalOffsetInfo::Unambiguous(self.wall_offsets[index / 2 + 1])
        }
    }

    /// The offsets valid for a local date-time: one when unambiguous, none
    /// inside a gap, and both (earlier instant first) inside an overlap.
    pub fn valid_offsets(&self, local: LocalDateTime) -> Vec<ZoneOffset> {
        match self.offset_info(local) {
            LocalOffsetInfo::Unambiguous(offset) => vec![offset],
            LocalOffsetInfo::InTransition(transition) => transition.valid_offsets(),
        }
    }

    /// The transition whose gap or overlap contains the local date-time,
    /// if any.
    pub fn transition(&self, local: LocalDateTime) -> Option<ZoneOffsetTransition> {
        match self.offset_info(local) {
            LocalOffsetInfo::Unambiguous(_) => None,
            LocalOffsetInfo::InTransition(transition) => Some(transition),
        }
    }

    /// Returns `true` when the offset is valid for the local date-time.
    pub fn is_valid_offset(&self, local: LocalDateTime, offset: ZoneOffset) -> bool {
        self.valid_offsets(local).contains(&offset)
    }

    // ==== Transition navigation ====

    /// The first transition strictly after the instant, if any.
    pub fn next_transition(&self, instant: Instant) -> Option<ZoneOffsetTransition> {
        if self.is_fixed() {
            return None;
        }
        let epoch_second = instant.epoch_second();
        let last_historic = *self.savings_instants.last()?;
        if epoch_second >= last_historic {
            if self.last_rules.is_empty() {
                return None;
            }
            let year = find_year(epoch_second, self.last_wall_offset());
            for candidate_year in year..=year.saturating_add(1).min(MAX_YEAR - 1) {
                for transition in self.transitions_for_year(candidate_year).iter() {
                    if epoch_second < transition.epoch_second() {
                        return Some(transition.clone());
                    }
                }
            }
            return None;
        }
        let index = match self.savings_instants.binary_search(&epoch_second) {
            Ok(index) => index + 1,
            Err(insertion) => insertion,
        };
        self.transitions.get(index).cloned()
    }

    /// The latest transition strictly before the instant, if any.
    pub fn previous_transition(&self, instant: Instant) -> Option<ZoneOffsetTransition> {
        if self.is_fixed() {
            return None;
        }
        let mut epoch_second = instant.epoch_second();
        if instant.nano() > 0 && epoch_second < i64::MAX {
            // A transition exactly at the whole second is still earlier than
            // the sub-second instant.
            epoch_second += 1;
        }
        let last_historic = *self.savings_instants.last()?;
        if !self.last_rules.is_empty() && epoch_second > last_historic {
            let last_historic_offset = self.last_wall_offset();
            let mut year = find_year(epoch_second, last_historic_offset);
            loop {
                let transitions = self.transitions_for_year(year);
                for transition in transitions.iter().rev() {
                    if epoch_second > transition.epoch_second() {
                        return Some(transition.clone());
                    }
                }
                year -= 1;
                if year <= find_year(last_historic, last_historic_offset) {
                    break;
                }
            }
        }
        let index = match self.savings_instants.binary_search(&epoch_second) {
            Ok(index) => index,
            Err(insertion) => insertion,
        };
        if index == 0 {
            None
        } else {
            self.transitions.get(index - 1).cloned()
        }
    }

    // ==== Tail-rule materialisation ====

    fn transitions_for_year(&self, year: i32) -> Arc<[ZoneOffsetTransition]> {
        let year = year.clamp(MIN_YEAR + 1, MAX_YEAR - 1);
        let mut cache = match self.year_cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(cached) = cache.get(&year) {
            return Arc::clone(cached);
        }
        let mut materialized: Vec<ZoneOffsetTransition> = self
            .last_rules
            .iter()
            .filter_map(|rule| rule.create_transition(year).ok())
            .collect();
        materialized.sort();
        let materialized: Arc<[ZoneOffsetTransition]> = materialized.into();
        if cache.len() >= YEAR_CACHE_CAPACITY {
            cache.clear();
        }
        cache.insert(year, Arc::clone(&materialized));
        materialized
    }
}

impl PartialEq for ZoneRules {
    fn eq(&self, other: &Self) -> bool {
        self.standard_instants == other.standard_instants
            && self.standard_offsets == other.standard_offsets
            && self.savings_instants == other.savings_instants
            && self.wall_offsets == other.wall_offsets
            && self.transitions == other.transitions
            && self.last_rules == other.last_rules
    }
}

impl Eq for ZoneRules {}

/// Classifies `local` against a single transition.
fn find_offset_info(local: LocalDateTime, transition: &ZoneOffsetTransition) -> LocalOffsetInfo {
    let before = transition.date_time_before();
    let after = transition.date_time_after();
    if transition.is_gap() {
        if local < before {
            LocalOffsetInfo::Unambiguous(transition.offset_before())
        } else if local < after {
            LocalOffsetInfo::InTransition(transition.clone())
        } else {
            LocalOffsetInfo::Unambiguous(transition.offset_after())
        }
    } else if local < after {
        LocalOffsetInfo::Unambiguous(transition.offset_before())
    } else if local < before {
        LocalOffsetInfo::InTransition(transition.clone())
    } else {
        LocalOffsetInfo::Unambiguous(transition.offset_after())
    }
}

/// The calendar year containing an epoch second viewed at an offset,
/// clamped to the supported range.
fn find_year(epoch_second: i64, offset: ZoneOffset) -> i32 {
    let local_second = epoch_second.saturating_add(i64::from(offset.total_seconds()));
    let epoch_day = utils::floor_div(local_second, i64::from(SECONDS_PER_DAY))
        .clamp(MIN_EPOCH_DAY, MAX_EPOCH_DAY);
    LocalDate::from_epoch_day(epoch_day).map_or(0, |date| date.year())
}
