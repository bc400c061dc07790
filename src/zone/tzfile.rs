//! The compact binary zone-rules file format.
//!
//! The file is the interchange surface between the offline rules compiler
//! and the registry: a versioned header, one record per zone (offset table,
//! standard and wall transitions as epoch seconds with offset indices, and
//! the recurring tail rules), then the alias table. All integers are
//! little-endian.

use log::{debug, warn};

use crate::components::{DayOfWeek, LocalTime, ZoneOffset};
use crate::zone::registry::{AliasTable, ZoneRegistry};
use crate::zone::rule::{TimeDefinition, ZoneOffsetTransitionRule};
use crate::zone::rules::ZoneRules;
use crate::zone::transition::ZoneOffsetTransition;
use crate::{CivilError, CivilResult};

const MAGIC: &[u8; 4] = b"CZRF";
const MAJOR_VERSION: u16 = 1;
const MINOR_VERSION: u16 = 0;

// ==== Writing ====

/// Serializes a registry, zones sorted by identifier for a deterministic
/// byte stream.
pub fn write_registry(registry: &ZoneRegistry) -> CivilResult<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    push_u16(&mut out, MAJOR_VERSION);
    push_u16(&mut out, MINOR_VERSION);

    let ids = registry.zone_ids();
    push_u32(&mut out, count_u32(ids.len())?);
    for id in ids {
        let rules = registry.rules_for(id)?;
        write_zone(&mut out, id, &rules)?;
    }

    let mut aliases: Vec<(&str, &str)> = registry.aliases().entries().collect();
    aliases.sort_unstable();
    push_u32(&mut out, count_u32(aliases.len())?);
    for (alias, target) in aliases {
        push_str(&mut out, alias)?;
        push_str(&mut out, target)?;
    }
    Ok(out)
}

fn write_zone(out: &mut Vec<u8>, id: &str, rules: &ZoneRules) -> CivilResult<()> {
    push_str(out, id)?;

    // Distinct offsets in order of first use.
    let mut offsets: Vec<ZoneOffset> = Vec::new();
    let mut index_of = |offsets: &mut Vec<ZoneOffset>, offset: ZoneOffset| -> CivilResult<u8> {
        if let Some(position) = offsets.iter().position(|o| *o == offset) {
            return Ok(position as u8);
        }
        if offsets.len() >= usize::from(u8::MAX) {
            return Err(CivilError::zone_data(format!(
                "zone {id} uses more than 255 distinct offsets"
            )));
        }
        offsets.push(offset);
        Ok((offsets.len() - 1) as u8)
    };

    for offset in rules.standard_offsets() {
        index_of(&mut offsets, *offset)?;
    }
    for offset in rules.wall_offsets() {
        index_of(&mut offsets, *offset)?;
    }
    for rule in rules.transition_rules() {
        index_of(&mut offsets, rule.standard_offset())?;
        index_of(&mut offsets, rule.offset_before())?;
        index_of(&mut offsets, rule.offset_after())?;
    }

    out.push(offsets.len() as u8);
    for offset in &offsets {
        push_i32(out, offset.total_seconds());
    }
    // Base offsets in force before any transition.
    out.push(index_of(&mut offsets, rules.standard_offsets()[0])?);
    out.push(index_of(&mut offsets, rules.wall_offsets()[0])?);

    let standard = rules.standard_instants();
    push_u16(
        out,
        u16::try_from(standard.len())
            .map_err(|_| CivilError::zone_data("too many standard transitions"))?,
    );
    for (position, epoch_second) in standard.iter().enumerate() {
        push_i64(out, *epoch_second);
        out.push(index_of(&mut offsets, rules.standard_offsets()[position])?);
        out.push(index_of(&mut offsets, rules.standard_offsets()[position + 1])?);
    }

    let transitions = rules.transitions();
    push_u32(out, count_u32(transitions.len())?);
    for transition in transitions {
        push_i64(out, transition.epoch_second());
        out.push(index_of(&mut offsets, transition.offset_before())?);
        out.push(index_of(&mut offsets, transition.offset_after())?);
    }

    let tail = rules.transition_rules();
    out.push(tail.len() as u8);
    for rule in tail {
        out.push(rule.month());
        out.push(rule.day_of_month_indicator() as u8);
        out.push(rule.day_of_week().map_or(0, DayOfWeek::value));
        push_u32(out, rule.local_time().second_of_day());
        out.push(match rule.time_definition() {
            TimeDefinition::Utc => 0,
            TimeDefinition::Wall => 1,
            TimeDefinition::Standard => 2,
        });
        out.push(index_of(&mut offsets, rule.standard_offset())?);
        out.push(index_of(&mut offsets, rule.offset_before())?);
        out.push(index_of(&mut offsets, rule.offset_after())?);
    }
    Ok(())
}

fn count_u32(len: usize) -> CivilResult<u32> {
    u32::try_from(len).map_err(|_| CivilError::zone_data("count exceeds u32"))
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_str(out: &mut Vec<u8>, value: &str) -> CivilResult<()> {
    let len = u16::try_from(value.len())
        .map_err(|_| CivilError::zone_data("identifier longer than 65535 bytes"))?;
    push_u16(out, len);
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

// ==== Reading ====

/// Deserializes a registry written by [`write_registry`] or the offline
/// compiler.
///
/// A different major version is rejected; a newer minor version is accepted
/// with any appended trailing data ignored.
pub fn read_registry(bytes: &[u8]) -> CivilResult<ZoneRegistry> {
    let mut cursor = Cursor { bytes, pos: 0 };
    if cursor.take(4)? != MAGIC {
        return Err(CivilError::zone_data("bad magic; not a zone-rules file"));
    }
    let major = cursor.u16()?;
    if major != MAJOR_VERSION {
        return Err(CivilError::zone_data(format!(
            "unsupported zone-rules major version {major} (reader supports {MAJOR_VERSION})"
        )));
    }
    let minor = cursor.u16()?;
    if minor > MINOR_VERSION {
        warn!("zone-rules file has newer minor version {major}.{minor}; appended fields ignored");
    }

    let zone_count = cursor.u32()?;
    let mut zones = Vec::with_capacity(zone_count as usize);
    for _ in 0..zone_count {
        zones.push(read_zone(&mut cursor)?);
    }

    let alias_count = cursor.u32()?;
    let mut aliases = AliasTable::empty();
    for _ in 0..alias_count {
        let alias = cursor.str()?;
        let target = cursor.str()?;
        aliases.insert(&alias, &target);
    }

    let mut registry = ZoneRegistry::new(aliases);
    for (id, rules) in zones {
        registry.insert(&id, rules);
    }
    debug!(
        "populated zone registry: {} zones, {} aliases (zone-rules file, version {major}.{minor})",
        registry.len(),
        registry.aliases().len()
    );
    Ok(registry)
}

fn read_zone(cursor: &mut Cursor<'_>) -> CivilResult<(String, ZoneRules)> {
    let id = cursor.str()?;

    let offset_count = cursor.u8()?;
    let mut offsets = Vec::with_capacity(usize::from(offset_count));
    for _ in 0..offset_count {
        offsets.push(ZoneOffset::of_total_seconds(cursor.i32()?)?);
    }
    let offset_at = |index: u8| -> CivilResult<ZoneOffset> {
        offsets
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| CivilError::zone_data(format!("offset index {index} out of range")))
    };
    let base_standard = offset_at(cursor.u8()?)?;
    let base_wall = offset_at(cursor.u8()?)?;

    let standard_count = cursor.u16()?;
    let mut standard = Vec::with_capacity(usize::from(standard_count));
    for _ in 0..standard_count {
        let epoch_second = cursor.i64()?;
        let before = offset_at(cursor.u8()?)?;
        let after = offset_at(cursor.u8()?)?;
        standard.push(ZoneOffsetTransition::of_epoch_second(
            epoch_second,
            before,
            after,
        )?);
    }

    let wall_count = cursor.u32()?;
    let mut wall = Vec::with_capacity(wall_count as usize);
    for _ in 0..wall_count {
        let epoch_second = cursor.i64()?;
        let before = offset_at(cursor.u8()?)?;
        let after = offset_at(cursor.u8()?)?;
        wall.push(ZoneOffsetTransition::of_epoch_second(
            epoch_second,
            before,
            after,
        )?);
    }

    let rule_count = cursor.u8()?;
    let mut rules = Vec::with_capacity(usize::from(rule_count));
    for _ in 0..rule_count {
        let month = cursor.u8()?;
        let day_of_month_indicator = cursor.u8()? as i8;
        let day_of_week = match cursor.u8()? {
            0 => None,
            value => Some(DayOfWeek::of(value)?),
        };
        let second_of_day = cursor.u32()?;
        let local_time = LocalTime::of_second_of_day(second_of_day).map_err(|_| {
            CivilError::zone_data(format!("rule time {second_of_day} out of range"))
        })?;
        let time_definition = match cursor.u8()? {
            0 => TimeDefinition::Utc,
            1 => TimeDefinition::Wall,
            2 => TimeDefinition::Standard,
            other => {
                return Err(CivilError::zone_data(format!(
                    "unknown time definition {other}"
                )))
            }
        };
        let standard_offset = offset_at(cursor.u8()?)?;
        let offset_before = offset_at(cursor.u8()?)?;
        let offset_after = offset_at(cursor.u8()?)?;
        rules.push(ZoneOffsetTransitionRule::new(
            month,
            day_of_month_indicator,
            day_of_week,
            local_time,
            time_definition,
            standard_offset,
            offset_before,
            offset_after,
        )?);
    }

    let rules = ZoneRules::new(base_standard, base_wall, standard, wall, rules)?;
    Ok((id, rules))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> CivilResult<&'a [u8]> {
        let end = self.pos.checked_add(len).filter(|end| *end <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(CivilError::zone_data(format!(
                "unexpected end of zone-rules data at byte {}",
                self.pos
            ))),
        }
    }

    fn u8(&mut self) -> CivilResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> CivilResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> CivilResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn i32(&mut self) -> CivilResult<i32> {
        Ok(self.u32()? as i32)
    }

    fn i64(&mut self) -> CivilResult<i64> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(buf))
    }

    fn str(&mut self) -> CivilResult<String> {
        let len = usize::from(self.u16()?);
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| CivilError::zone_data("identifier is not valid UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_every_zone() {
        let registry = ZoneRegistry::builtin();
        let bytes = write_registry(&registry).unwrap();
        let rebuilt = read_registry(&bytes).unwrap();
        assert_eq!(rebuilt.len(), registry.len());
        assert_eq!(rebuilt.zone_ids(), registry.zone_ids());
        for id in registry.zone_ids() {
            assert_eq!(
                *rebuilt.rules_for(id).unwrap(),
                *registry.rules_for(id).unwrap(),
                "{id}"
            );
        }
        assert_eq!(rebuilt.aliases(), registry.aliases());
        // Deterministic output.
        assert_eq!(write_registry(&rebuilt).unwrap(), bytes);
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(matches!(
            read_registry(b"NOPE"),
            Err(CivilError::InvalidZoneData { .. })
        ));
    }

    #[test]
    fn rejects_unknown_major_version() {
        let registry = ZoneRegistry::builtin();
        let mut bytes = write_registry(&registry).unwrap();
        bytes[4] = 2; // bump the major version
        let err = read_registry(&bytes).unwrap_err();
        assert!(matches!(err, CivilError::InvalidZoneData { .. }));
    }

    #[test]
    fn accepts_newer_minor_version() {
        let registry = ZoneRegistry::builtin();
        let mut bytes = write_registry(&registry).unwrap();
        bytes[6] = 7; // bump the minor version
        bytes.extend_from_slice(b"future fields");
        assert!(read_registry(&bytes).is_ok());
    }

    #[test]
    fn rejects_truncated_data() {
        let registry = ZoneRegistry::builtin();
        let bytes = write_registry(&registry).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            read_registry(truncated),
            Err(CivilError::InvalidZoneData { .. })
        ));
    }
}
