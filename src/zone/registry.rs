//! The process-wide registry mapping zone identifiers to their rules.

use std::sync::{Arc, OnceLock, RwLock};

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::ZoneOffset;
use crate::zone::rules::ZoneRules;
use crate::zone::tzdb;
use crate::{CivilError, CivilResult};

/// A map of legacy zone identifiers to their replacements.
///
/// Targets are either region identifiers or offset identifiers such as
/// `-05:00`. Which mapping the three contested abbreviations (`EST`, `MST`,
/// `HST`) receive is configurable: the pre-2005 table points them at
/// regions, the post-2005 table at fixed offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    map: FxHashMap<Box<str>, Box<str>>,
}

/// Short identifiers shared by both historical alias tables.
const COMMON_ALIASES: &[(&str, &str)] = &[
    ("ACT", "Australia/Darwin"),
    ("AET", "Australia/Sydney"),
    ("AGT", "America/Argentina/Buenos_Aires"),
    ("ART", "Africa/Cairo"),
    ("AST", "America/Anchorage"),
    ("BET", "America/Sao_Paulo"),
    ("BST", "Asia/Dhaka"),
    ("CAT", "Africa/Harare"),
    ("CNT", "America/St_Johns"),
    ("CST", "America/Chicago"),
    ("CTT", "Asia/Shanghai"),
    ("EAT", "Africa/Addis_Ababa"),
    ("ECT", "Europe/Paris"),
    ("IET", "America/Indiana/Indianapolis"),
    ("IST", "Asia/Kolkata"),
    ("JST", "Asia/Tokyo"),
    ("MIT", "Pacific/Apia"),
    ("NET", "Asia/Yerevan"),
    ("NST", "Pacific/Auckland"),
    ("PLT", "Asia/Karachi"),
    ("PNT", "America/Phoenix"),
    ("PRT", "America/Puerto_Rico"),
    ("PST", "America/Los_Angeles"),
    ("SST", "Pacific/Guadalcanal"),
    ("VST", "Asia/Ho_Chi_Minh"),
    ("GMT", "UTC"),
    ("UT", "UTC"),
];

impl AliasTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The historical mapping in use before 2005: `EST`, `MST`, and `HST`
    /// point at regions.
    pub fn pre_2005() -> Self {
        let mut table = Self::with_common();
        table.insert("EST", "America/Indianapolis");
        table.insert("MST", "America/Phoenix");
        table.insert("HST", "Pacific/Honolulu");
        table
    }

    /// The mapping in use from 2005 on: `EST`, `MST`, and `HST` are fixed
    /// offsets.
    pub fn post_2005() -> Self {
        let mut table = Self::with_common();
        table.insert("EST", "-05:00");
        table.insert("MST", "-07:00");
        table.insert("HST", "-10:00");
        table
    }

    fn with_common() -> Self {
        let mut table = Self::default();
        for (alias, target) in COMMON_ALIASES {
            table.insert(alias, target);
        }
        table
    }

    /// Adds or replaces a mapping.
    pub fn insert(&mut self, alias: &str, target: &str) {
        self.map.insert(alias.into(), target.into());
    }

    /// The target for an alias, if mapped.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.map.get(alias).map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All mappings, unordered.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }
}

/// An identifier-to-rules map with an alias table in front of it.
///
/// The registry is populated once and thereafter read-only; the process-wide
/// instance is swapped wholesale by [`install`], never mutated in place.
#[derive(Debug)]
pub struct ZoneRegistry {
    zones: FxHashMap<Box<str>, Arc<ZoneRules>>,
    aliases: AliasTable,
}

impl ZoneRegistry {
    /// An empty registry with the given alias table.
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            zones: FxHashMap::default(),
            aliases,
        }
    }

    /// The built-in dataset with the post-2005 aliases.
    pub fn builtin() -> Self {
        let mut registry = Self::new(AliasTable::post_2005());
        for (id, rules) in tzdb::builtin_zones() {
            registry.insert(id, rules);
        }
        debug!(
            "populated zone registry: {} zones, {} aliases (built-in dataset)",
            registry.zones.len(),
            registry.aliases.len()
        );
        registry
    }

    /// Adds a zone, replacing any previous rules under the identifier.
    pub fn insert(&mut self, id: &str, rules: ZoneRules) {
        if self.aliases.get(id).is_some() {
            warn!("zone {id:?} shadows an alias of the same name");
        }
        self.zones.insert(id.into(), Arc::new(rules));
    }

    /// Replaces the alias table.
    pub fn set_aliases(&mut self, aliases: AliasTable) {
        self.aliases = aliases;
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// The canonical identifiers present, sorted.
    pub fn zone_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.zones.keys().map(AsRef::as_ref).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Returns `true` when the identifier resolves, directly or through an
    /// alias.
    pub fn contains(&self, id: &str) -> bool {
        if self.zones.contains_key(id) {
            return true;
        }
        match self.aliases.get(id) {
            Some(target) => {
                self.zones.contains_key(target) || target.parse::<ZoneOffset>().is_ok()
            }
            None => false,
        }
    }

    /// Resolves an identifier to its rules, following one level of alias.
    pub fn rules_for(&self, id: &str) -> CivilResult<Arc<ZoneRules>> {
        if let Some(rules) = self.zones.get(id) {
            return Ok(Arc::clone(rules));
        }
        if let Some(target) = self.aliases.get(id) {
            if let Some(rules) = self.zones.get(target) {
                return Ok(Arc::clone(rules));
            }
            if let Ok(offset) = target.parse::<ZoneOffset>() {
                return Ok(Arc::new(ZoneRules::of_fixed(offset)));
            }
        }
        Err(CivilError::UnknownZone { id: id.into() })
    }
}

static GLOBAL: OnceLock<RwLock<Arc<ZoneRegistry>>> = OnceLock::new();

fn global_slot() -> &'static RwLock<Arc<ZoneRegistry>> {
    GLOBAL.get_or_init(|| RwLock::new(Arc::new(ZoneRegistry::builtin())))
}

/// The current process-wide registry.
///
/// Values holding rules from a previous registry remain valid after a swap;
/// rules are immutable and individually shared.
pub fn global() -> Arc<ZoneRegistry> {
    match global_slot().read() {
        Ok(guard) => Arc::clone(&guard),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Replaces the process-wide registry wholesale, returning the previous one.
///
/// Intended for loading a newer zone-rules file at runtime and for scoping a
/// test registry to a call site.
pub fn install(registry: ZoneRegistry) -> Arc<ZoneRegistry> {
    let next = Arc::new(registry);
    let mut guard = match global_slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    debug!(
        "swapping zone registry: {} zones -> {} zones",
        guard.len(),
        next.len()
    );
    std::mem::replace(&mut *guard, next)
}
