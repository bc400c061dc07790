//! The built-in zone dataset backing the default registry.
//!
//! Each region is built the way the offline compiler would emit it: the
//! recurring rules in force over a historical window are materialised into
//! explicit transitions, and the current rules carry the open-ended tail.

use log::error;

use crate::components::{DayOfWeek, LocalTime, ZoneOffset};
use crate::zone::rule::{TimeDefinition, ZoneOffsetTransitionRule};
use crate::zone::rules::ZoneRules;
use crate::CivilResult;

fn hours(value: i32) -> CivilResult<ZoneOffset> {
    ZoneOffset::of_hours(value)
}

fn wall_time(hour: u8) -> CivilResult<LocalTime> {
    LocalTime::of(hour, 0, 0, 0)
}

#[allow(clippy::too_many_arguments)]
fn rule(
    month: u8,
    day_of_month_indicator: i8,
    hour: u8,
    time_definition: TimeDefinition,
    standard: ZoneOffset,
    before: ZoneOffset,
    after: ZoneOffset,
) -> CivilResult<ZoneOffsetTransitionRule> {
    ZoneOffsetTransitionRule::new(
        month,
        day_of_month_indicator,
        Some(DayOfWeek::Sunday),
        wall_time(hour)?,
        time_definition,
        standard,
        before,
        after,
    )
}

/// Materialises `window_rules` over the year range and attaches
/// `tail_rules` as the recurring tail.
fn windowed(
    base_standard: ZoneOffset,
    base_wall: ZoneOffset,
    window_rules: &[ZoneOffsetTransitionRule],
    window: core::ops::RangeInclusive<i32>,
    tail_rules: Vec<ZoneOffsetTransitionRule>,
) -> CivilResult<ZoneRules> {
    let mut wall = Vec::new();
    for year in window {
        for window_rule in window_rules {
            wall.push(window_rule.create_transition(year)?);
        }
    }
    wall.sort();
    ZoneRules::new(base_standard, base_wall, Vec::new(), wall, tail_rules)
}

/// European Union rules since 1996: last Sunday of March and October at
/// 01:00 UTC.
fn eu_zone(standard_hours: i32) -> CivilResult<ZoneRules> {
    let standard = hours(standard_hours)?;
    let winter = standard;
    let summer = hours(standard_hours + 1)?;
    let rules = vec![
        rule(3, -1, 1, TimeDefinition::Utc, standard, winter, summer)?,
        rule(10, -1, 1, TimeDefinition::Utc, standard, summer, winter)?,
    ];
    windowed(standard, winter, &rules, 1997..=2006, rules.clone())
}

/// United States rules: the 1987–2006 window (first Sunday of April to last
/// Sunday of October) with the post-2007 pair (second Sunday of March to
/// first Sunday of November) as the tail, both at 02:00 wall time.
fn us_zone(standard_hours: i32) -> CivilResult<ZoneRules> {
    let standard = hours(standard_hours)?;
    let winter = standard;
    let summer = hours(standard_hours + 1)?;
    let window_rules = [
        rule(4, 1, 2, TimeDefinition::Wall, standard, winter, summer)?,
        rule(10, -1, 2, TimeDefinition::Wall, standard, summer, winter)?,
    ];
    let tail_rules = vec![
        rule(3, 8, 2, TimeDefinition::Wall, standard, winter, summer)?,
        rule(11, 1, 2, TimeDefinition::Wall, standard, summer, winter)?,
    ];
    windowed(standard, winter, &window_rules, 1987..=2006, tail_rules)
}

/// Australian south-eastern rules since 2008: first Sunday of October at
/// 02:00 to first Sunday of April at 03:00, wall time.
fn sydney() -> CivilResult<ZoneRules> {
    let standard = hours(10)?;
    let winter = standard;
    let summer = hours(11)?;
    let rules = vec![
        rule(4, 1, 3, TimeDefinition::Wall, standard, summer, winter)?,
        rule(10, 1, 2, TimeDefinition::Wall, standard, winter, summer)?,
    ];
    // The window opens inside daylight savings, so the base wall offset is
    // the summer offset.
    windowed(standard, summer, &rules, 2008..=2017, rules.clone())
}

fn fixed(offset: CivilResult<ZoneOffset>) -> CivilResult<ZoneRules> {
    Ok(ZoneRules::of_fixed(offset?))
}

/// The built-in zones. A zone whose construction fails is dropped with an
/// error log rather than poisoning registry start-up.
pub(crate) fn builtin_zones() -> Vec<(&'static str, ZoneRules)> {
    let zones: [(&'static str, CivilResult<ZoneRules>); 10] = [
        ("UTC", fixed(Ok(ZoneOffset::UTC))),
        ("Europe/London", eu_zone(0)),
        ("Europe/Paris", eu_zone(1)),
        ("Europe/Berlin", eu_zone(1)),
        ("America/New_York", us_zone(-5)),
        ("America/Chicago", us_zone(-6)),
        ("America/Los_Angeles", us_zone(-8)),
        ("Asia/Tokyo", fixed(hours(9))),
        ("Asia/Kolkata", fixed(ZoneOffset::of_hours_minutes(5, 30))),
        ("Australia/Sydney", sydney()),
    ];
    zones
        .into_iter()
        .filter_map(|(id, rules)| match rules {
            Ok(rules) => Some((id, rules)),
            Err(e) => {
                error!("dropping built-in zone {id}: {e}");
                None
            }
        })
        .collect()
}
