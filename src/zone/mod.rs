//! Time-zone identifiers, rules, and the zone registry.

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use crate::components::ZoneOffset;
use crate::{CivilError, CivilResult};

pub mod registry;
pub mod resolver;
pub mod rule;
pub mod rules;
pub mod transition;
pub mod tzfile;

pub(crate) mod tzdb;

pub use registry::{AliasTable, ZoneRegistry};
pub use rule::{TimeDefinition, ZoneOffsetTransitionRule};
pub use rules::{LocalOffsetInfo, ZoneRules};
pub use transition::ZoneOffsetTransition;

/// The identifier naming a time zone: either a fixed offset, or a textual
/// region identifier such as `Europe/Paris` resolved through the registry.
///
/// Two region identifiers with different text compare unequal even when they
/// alias the same underlying rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneId(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Offset(ZoneOffset),
    Region(Box<str>),
}

impl ZoneId {
    /// Parses and validates a zone identifier.
    ///
    /// `Z` and `±HH:MM[:SS]` produce fixed-offset identifiers; any other
    /// identifier is validated eagerly against the process registry and
    /// fails with [`CivilError::UnknownZone`] when absent.
    pub fn of(id: &str) -> CivilResult<Self> {
        let zone = Self::unchecked(id)?;
        if let Repr::Region(region) = &zone.0 {
            if !registry::global().contains(region) {
                return Err(CivilError::UnknownZone { id: id.into() });
            }
        }
        Ok(zone)
    }

    /// Parses a zone identifier without consulting the registry.
    ///
    /// Intended for round-trip parsing; an unknown region identifier
    /// surfaces [`CivilError::UnknownZone`] at the first rules access
    /// instead of here.
    pub fn unchecked(id: &str) -> CivilResult<Self> {
        if id == "Z" || id == "z" || id.starts_with('+') || id.starts_with('-') {
            return Ok(Self(Repr::Offset(id.parse()?)));
        }
        check_region_id(id)?;
        Ok(Self(Repr::Region(id.into())))
    }

    /// An identifier for a fixed offset.
    pub const fn from_offset(offset: ZoneOffset) -> Self {
        Self(Repr::Offset(offset))
    }

    /// The textual identifier.
    pub fn id(&self) -> String {
        match &self.0 {
            Repr::Offset(offset) => offset.id(),
            Repr::Region(region) => region.to_string(),
        }
    }

    /// The fixed offset, when this identifier is offset-based.
    pub const fn as_offset(&self) -> Option<ZoneOffset> {
        match &self.0 {
            Repr::Offset(offset) => Some(*offset),
            Repr::Region(_) => None,
        }
    }

    /// The rules for this zone.
    ///
    /// Fixed-offset identifiers bypass the registry entirely.
    pub fn rules(&self) -> CivilResult<Arc<ZoneRules>> {
        match &self.0 {
            Repr::Offset(offset) => Ok(Arc::new(ZoneRules::of_fixed(*offset))),
            Repr::Region(region) => registry::global().rules_for(region),
        }
    }
}

impl From<ZoneOffset> for ZoneId {
    fn from(offset: ZoneOffset) -> Self {
        Self::from_offset(offset)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Offset(offset) => write!(f, "{offset}"),
            Repr::Region(region) => f.write_str(region),
        }
    }
}

impl FromStr for ZoneId {
    type Err = CivilError;

    fn from_str(s: &str) -> CivilResult<Self> {
        Self::of(s)
    }
}

/// Validates the syntax of a region identifier: segments of letters, digits,
/// `~`, `.`, `_`, `+`, and `-`, each starting with a letter, separated by
/// `/`.
fn check_region_id(id: &str) -> CivilResult<()> {
    if id.is_empty() {
        return Err(CivilError::parse(id, 0, "zone identifier is empty"));
    }
    let mut segment_start = true;
    for (index, byte) in id.bytes().enumerate() {
        let valid = if segment_start {
            byte.is_ascii_alphabetic()
        } else {
            byte.is_ascii_alphanumeric() || matches!(byte, b'~' | b'.' | b'_' | b'+' | b'-')
        };
        if byte == b'/' {
            if segment_start {
                return Err(CivilError::parse(id, index, "empty zone identifier segment"));
            }
            segment_start = true;
            continue;
        }
        if !valid {
            return Err(CivilError::parse(
                id,
                index,
                "invalid character in zone identifier",
            ));
        }
        segment_start = false;
    }
    if segment_start {
        return Err(CivilError::parse(
            id,
            id.len(),
            "zone identifier ends with a separator",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_ids_bypass_the_registry() {
        let zone = ZoneId::of("+02:00").unwrap();
        assert_eq!(zone.as_offset(), Some(ZoneOffset::of_hours(2).unwrap()));
        assert_eq!(zone.id(), "+02:00");
        assert!(zone.rules().unwrap().is_fixed());
        assert_eq!(ZoneId::of("Z").unwrap().as_offset(), Some(ZoneOffset::UTC));
    }

    #[test]
    fn region_ids_validate_eagerly() {
        let zone = ZoneId::of("Europe/Paris").unwrap();
        assert_eq!(zone.id(), "Europe/Paris");
        assert_eq!(zone.as_offset(), None);
        assert!(matches!(
            ZoneId::of("Nowhere/Special"),
            Err(CivilError::UnknownZone { .. })
        ));
    }

    #[test]
    fn unchecked_defers_validation() {
        let zone = ZoneId::unchecked("Nowhere/Special").unwrap();
        assert_eq!(zone.id(), "Nowhere/Special");
        assert!(matches!(
            zone.rules(),
            Err(CivilError::UnknownZone { .. })
        ));
    }

    #[test]
    fn malformed_region_ids_rejected() {
        assert!(ZoneId::unchecked("").is_err());
        assert!(ZoneId::unchecked("Europe//Paris").is_err());
        assert!(ZoneId::unchecked("Europe/").is_err());
        assert!(ZoneId::unchecked("1Europe").is_err());
        assert!(ZoneId::unchecked("Euro pe").is_err());
    }

    #[test]
    fn aliasing_ids_compare_unequal() {
        let canonical = ZoneId::of("UTC").unwrap();
        let alias = ZoneId::of("GMT").unwrap();
        assert_ne!(canonical, alias);
        assert_eq!(
            *canonical.rules().unwrap(),
            *alias.rules().unwrap()
        );
    }
}
