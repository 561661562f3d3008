// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use icsnorm_ical::keyword::{KW_VTIMEZONE, KW_X_WR_TIMEZONE};
use icsnorm_ical::{
    Component, Observance, RecurrenceFrequency, TimezoneComponent, ValueRecurrenceRule,
    ValueUtcOffset, WeekDay,
};
use jiff::tz::TimeZone;

/// Identifier of the neutral zone.
pub const NEUTRAL_ZONE_ID: &str = "UTC";

/// A zone identifier plus the rules to turn instants into civil time.
#[derive(Debug, Clone)]
pub struct ResolvedTimezone {
    /// Identifier as found in the document, or [`NEUTRAL_ZONE_ID`]
    pub id: String,
    /// Conversion rules
    pub tz: TimeZone,
}

impl ResolvedTimezone {
    /// The neutral zone, equivalent to UTC.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            id: NEUTRAL_ZONE_ID.to_string(),
            tz: TimeZone::UTC,
        }
    }

    /// Resolve a bare zone identifier against the IANA database.
    ///
    /// Unknown identifiers degrade to the neutral zone.
    #[must_use]
    pub fn from_identifier(id: &str) -> Self {
        match lookup_iana(id) {
            Some(tz) => Self {
                id: id.to_string(),
                tz,
            },
            None => {
                tracing::warn!(tzid = id, "unknown timezone, falling back to UTC");
                Self::neutral()
            }
        }
    }

    /// Build a zone from a VTIMEZONE definition.
    ///
    /// The IANA database is preferred when it knows the TZID, otherwise the rules are
    /// derived from the observances of the definition.
    #[must_use]
    pub fn from_definition(definition: TimezoneComponent<'_>) -> Self {
        let Some(id) = definition.tz_id() else {
            tracing::warn!("VTIMEZONE without TZID, falling back to UTC");
            return Self::neutral();
        };

        if let Some(tz) = lookup_iana(id) {
            return Self::new(id, tz);
        }

        if let Some(posix) = posix_rule(definition) {
            match TimeZone::posix(&posix) {
                Ok(tz) => {
                    tracing::debug!(tzid = id, %posix, "built timezone from observances");
                    return Self::new(id, tz);
                }
                Err(err) => tracing::debug!(tzid = id, %posix, %err, "invalid POSIX rule"),
            }
        }

        let offset = latest(definition.standard())
            .or_else(|| latest(definition.observances()))
            .and_then(|(_, offset)| offset.offset().ok());
        if let Some(offset) = offset {
            tracing::debug!(tzid = id, %offset, "built fixed offset timezone");
            return Self::new(id, TimeZone::fixed(offset));
        }

        tracing::warn!(tzid = id, "unusable VTIMEZONE, falling back to UTC");
        Self::neutral()
    }

    fn new(id: &str, tz: TimeZone) -> Self {
        Self {
            id: id.to_string(),
            tz,
        }
    }
}

/// Zones defined or referenced by one calendar.
#[derive(Debug, Clone)]
pub struct CalendarZones {
    /// Zone applied to floating times
    pub document: ResolvedTimezone,
    definitions: HashMap<String, ResolvedTimezone>,
}

impl CalendarZones {
    /// Resolve the document zone of a calendar, and every VTIMEZONE it defines.
    ///
    /// In order of priority, the document zone is:
    /// 1. the `X-WR-TIMEZONE` hint, through the matching definition if there is one;
    /// 2. the first definition of the calendar;
    /// 3. the `fallback` zone.
    #[must_use]
    pub fn resolve(calendar: &Component, fallback: ResolvedTimezone) -> Self {
        let definitions: Vec<_> = calendar
            .descendants_named(KW_VTIMEZONE)
            .into_iter()
            .filter_map(Component::as_timezone)
            .collect();

        let mut resolved: HashMap<String, ResolvedTimezone> = HashMap::new();
        let mut first = None;
        for definition in &definitions {
            let zone = ResolvedTimezone::from_definition(*definition);
            if first.is_none() {
                first = Some(zone.clone());
            }
            if let Some(id) = definition.tz_id() {
                resolved.entry(id.to_string()).or_insert(zone);
            }
        }

        let hint = calendar
            .property(KW_X_WR_TIMEZONE)
            .map(|p| p.value.trim())
            .filter(|v| !v.is_empty());

        let document = match (hint, first) {
            (Some(hint), _) => match resolved.get(hint) {
                Some(zone) => zone.clone(),
                None => ResolvedTimezone::from_identifier(hint),
            },
            (None, Some(first)) => first,
            (None, None) => fallback,
        };
        tracing::debug!(tzid = document.id.as_str(), "resolved document timezone");

        Self {
            document,
            definitions: resolved,
        }
    }

    /// Rules for a `TZID` parameter: the calendar's own definition, then the IANA
    /// database, then the document zone.
    #[must_use]
    pub fn lookup(&self, tz_id: &str) -> TimeZone {
        if let Some(zone) = self.definitions.get(tz_id) {
            return zone.tz.clone();
        }
        if let Some(tz) = lookup_iana(tz_id) {
            return tz;
        }
        tracing::warn!(
            tzid = tz_id,
            document = self.document.id.as_str(),
            "unknown TZID, using document timezone"
        );
        self.document.tz.clone()
    }
}

/// Strip vendor prefixes such as `/mozilla.org/20050126_1/` from a TZID.
#[must_use]
pub fn normalize_tzid(tz_id: &str) -> &str {
    let tz_id = tz_id.trim().trim_matches('"');
    let stripped = tz_id
        .strip_prefix("/mozilla.org/")
        .or_else(|| tz_id.strip_prefix("/softwarestudio.org/"));

    match stripped {
        Some(rest) => {
            // versioned prefixes carry a segment like `20050126_1/` or `Olson_20011030_5/`
            match rest.split_once('/') {
                Some((version, name)) if version.chars().any(|c| c.is_ascii_digit()) => name,
                _ => rest,
            }
        }
        None => tz_id.trim_start_matches('/'),
    }
}

fn lookup_iana(tz_id: &str) -> Option<TimeZone> {
    let name = normalize_tzid(tz_id);
    if name.is_empty() {
        return None;
    }
    TimeZone::get(name).ok()
}

/// The observance with the latest onset, with its offset.
fn latest(observances: Vec<Observance<'_>>) -> Option<(Observance<'_>, ValueUtcOffset)> {
    observances
        .into_iter()
        .filter_map(|o| {
            let offset = o.tz_offset_to()?.ok()?;
            let onset = o.dt_start().and_then(Result::ok);
            Some((onset, o, offset))
        })
        .max_by_key(|(onset, _, _)| *onset)
        .map(|(_, o, offset)| (o, offset))
}

/// Derive a POSIX TZ string, e.g. `<CET>-1<CEST>,M3.5.0/2:00:00,M10.5.0/3:00:00`.
///
/// Only the latest standard and daylight observances are used, and daylight rules
/// must be yearly and anchored on a weekday of one month.
fn posix_rule(definition: TimezoneComponent<'_>) -> Option<String> {
    let (standard, std_offset) = latest(definition.standard())?;

    let mut rule = String::new();
    write_posix_zone(&mut rule, standard.tz_name(), std_offset).ok()?;

    let Some((daylight, dst_offset)) = latest(definition.daylight()) else {
        return Some(rule);
    };
    let (Some(dst_start), Some(dst_end)) = (transition(daylight), transition(standard)) else {
        // the daylight observance no longer recurs, keep standard time only
        return Some(rule);
    };

    write_posix_zone(&mut rule, daylight.tz_name(), dst_offset).ok()?;
    write!(rule, ",{dst_start},{dst_end}").ok()?;
    Some(rule)
}

fn write_posix_zone(
    out: &mut String,
    name: Option<&str>,
    offset: ValueUtcOffset,
) -> fmt::Result {
    let name = name
        .filter(|n| {
            n.len() >= 3
                && n
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
        })
        .map_or_else(|| format_offset_name(offset), ToString::to_string);

    // POSIX offsets count westwards
    let sign = if offset.positive { '-' } else { '+' };
    write!(
        out,
        "<{name}>{sign}{}:{:02}:{:02}",
        offset.hour,
        offset.minute,
        offset.second.unwrap_or(0)
    )
}

fn format_offset_name(offset: ValueUtcOffset) -> String {
    let sign = if offset.positive { '+' } else { '-' };
    format!("{sign}{:02}{:02}", offset.hour, offset.minute)
}

/// `Mm.w.d/hh:mm:ss` of a yearly observance.
fn transition(observance: Observance<'_>) -> Option<String> {
    let rule: ValueRecurrenceRule = observance.rrule()?.ok()?;
    if rule.freq != RecurrenceFrequency::Yearly || rule.until.is_some() || rule.count.is_some() {
        return None;
    }

    let [month] = rule.by_month.as_slice() else {
        return None;
    };
    let [day] = rule.by_day.as_slice() else {
        return None;
    };
    let week = match day.occurrence? {
        n @ 1..=4 => n,
        5 | -1 => 5,
        _ => return None,
    };
    let weekday = match day.day {
        WeekDay::Sunday => 0,
        WeekDay::Monday => 1,
        WeekDay::Tuesday => 2,
        WeekDay::Wednesday => 3,
        WeekDay::Thursday => 4,
        WeekDay::Friday => 5,
        WeekDay::Saturday => 6,
    };

    let at = observance.dt_start().and_then(Result::ok)?.time;
    Some(format!(
        "M{month}.{week}.{weekday}/{}:{:02}:{:02}",
        at.hour,
        at.minute,
        at.second.min(59)
    ))
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use icsnorm_ical::parse;
    use jiff::civil::datetime;

    use super::*;

    fn calendar(body: &str) -> Component {
        let src = format!("BEGIN:VCALENDAR\r\n{body}END:VCALENDAR\r\n");
        parse(&src).unwrap().remove(0)
    }

    const CUSTOM_CET: &str = "\
BEGIN:VTIMEZONE\r
TZID:Custom Central European\r
BEGIN:STANDARD\r
DTSTART:19701025T030000\r
TZOFFSETFROM:+0200\r
TZOFFSETTO:+0100\r
TZNAME:CET\r
RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU\r
END:STANDARD\r
BEGIN:DAYLIGHT\r
DTSTART:19700329T020000\r
TZOFFSETFROM:+0100\r
TZOFFSETTO:+0200\r
TZNAME:CEST\r
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU\r
END:DAYLIGHT\r
END:VTIMEZONE\r
";

    fn offset_at(tz: &TimeZone, y: i16, m: i8, d: i8) -> i32 {
        datetime(y, m, d, 12, 0, 0, 0)
            .to_zoned(tz.clone())
            .unwrap()
            .offset()
            .seconds()
    }

    #[test]
    fn normalizes_vendor_prefixes() {
        assert_eq!(normalize_tzid("/mozilla.org/20050126_1/America/New_York"), "America/New_York");
        assert_eq!(normalize_tzid("/softwarestudio.org/Olson_20011030_5/Europe/Paris"), "Europe/Paris");
        assert_eq!(normalize_tzid("/Europe/Paris"), "Europe/Paris");
        assert_eq!(normalize_tzid("Asia/Tokyo"), "Asia/Tokyo");
    }

    #[test]
    fn resolves_known_identifier() {
        let zone = ResolvedTimezone::from_identifier("Asia/Tokyo");
        assert_eq!(zone.id, "Asia/Tokyo");
        assert_eq!(offset_at(&zone.tz, 2025, 1, 1), 9 * 3600);
    }

    #[test]
    fn unknown_identifier_degrades_to_neutral() {
        let zone = ResolvedTimezone::from_identifier("Mars/Olympus_Mons");
        assert_eq!(zone.id, NEUTRAL_ZONE_ID);
        assert_eq!(offset_at(&zone.tz, 2025, 1, 1), 0);
    }

    #[test]
    fn builds_zone_from_observances() {
        let cal = calendar(CUSTOM_CET);
        let definition = cal.children[0].as_timezone().unwrap();
        assert_eq!(
            posix_rule(definition).as_deref(),
            Some("<CET>-1:00:00<CEST>-2:00:00,M3.5.0/2:00:00,M10.5.0/3:00:00")
        );

        let zone = ResolvedTimezone::from_definition(definition);
        assert_eq!(zone.id, "Custom Central European");
        assert_eq!(offset_at(&zone.tz, 2025, 1, 15), 3600);
        assert_eq!(offset_at(&zone.tz, 2025, 7, 15), 7200);
    }

    #[test]
    fn writes_posix_zone_names_and_offsets() {
        let offset = |s: &str| s.parse::<ValueUtcOffset>().unwrap();

        let mut out = String::new();
        write_posix_zone(&mut out, Some("EST"), offset("-0500")).unwrap();
        assert_eq!(out, "<EST>+5:00:00");

        // names POSIX cannot carry fall back to the offset
        let mut out = String::new();
        write_posix_zone(&mut out, Some("X"), offset("+053015")).unwrap();
        assert_eq!(out, "<+0530>-5:30:15");
    }

    #[test]
    fn builds_fixed_zone_without_rules() {
        let cal = calendar(
            "BEGIN:VTIMEZONE\r\nTZID:Fixed\r\nBEGIN:STANDARD\r\nDTSTART:19700101T000000\r\nTZOFFSETFROM:+0530\r\nTZOFFSETTO:+0530\r\nEND:STANDARD\r\nEND:VTIMEZONE\r\n",
        );
        let zone = ResolvedTimezone::from_definition(cal.children[0].as_timezone().unwrap());
        assert_eq!(offset_at(&zone.tz, 2025, 6, 1), 5 * 3600 + 1800);
    }

    #[test]
    fn prefers_hint_with_matching_definition() {
        let cal = calendar(&format!("X-WR-TIMEZONE:Custom Central European\r\n{CUSTOM_CET}"));
        let zones = CalendarZones::resolve(&cal, ResolvedTimezone::neutral());
        assert_eq!(zones.document.id, "Custom Central European");
        assert_eq!(offset_at(&zones.document.tz, 2025, 7, 1), 7200);
    }

    #[test]
    fn uses_bare_hint_without_definition() {
        let cal = calendar(&format!("X-WR-TIMEZONE:America/New_York\r\n{CUSTOM_CET}"));
        let zones = CalendarZones::resolve(&cal, ResolvedTimezone::neutral());
        assert_eq!(zones.document.id, "America/New_York");
        assert_eq!(offset_at(&zones.document.tz, 2025, 1, 1), -5 * 3600);
    }

    #[test]
    fn uses_first_definition_then_fallback() {
        let cal = calendar(CUSTOM_CET);
        let zones = CalendarZones::resolve(&cal, ResolvedTimezone::neutral());
        assert_eq!(zones.document.id, "Custom Central European");

        let cal = calendar("VERSION:2.0\r\n");
        let fallback = ResolvedTimezone::from_identifier("Asia/Tokyo");
        let zones = CalendarZones::resolve(&cal, fallback);
        assert_eq!(zones.document.id, "Asia/Tokyo");
    }

    #[test]
    fn looks_up_tzid_parameters() {
        let cal = calendar(CUSTOM_CET);
        let zones = CalendarZones::resolve(&cal, ResolvedTimezone::neutral());
        assert_eq!(offset_at(&zones.lookup("Custom Central European"), 2025, 7, 1), 7200);
        assert_eq!(offset_at(&zones.lookup("Asia/Tokyo"), 2025, 7, 1), 9 * 3600);
        // unknown TZID falls back to the document zone
        assert_eq!(offset_at(&zones.lookup("Nowhere"), 2025, 7, 1), 7200);
    }
}
