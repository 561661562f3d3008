// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use icsnorm_ical::DateTimeValue;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::timezone::CalendarZones;

/// An absolute point in time taken from a date-bearing property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant {
    /// The point in time.
    pub at: Timestamp,

    /// The source value has no time of day.
    pub date_only: bool,
}

/// Convert a property value to an absolute instant.
///
/// Dates are taken at midnight UTC. Floating times use the document zone, and zoned
/// times use the zone named by their `TZID`.
///
/// ## Errors
/// If the value is not a valid civil date or time, or falls outside the supported range.
pub fn materialize(value: &DateTimeValue, zones: &CalendarZones) -> Result<Instant, jiff::Error> {
    let tz = zone_of(value, zones);
    let (at, date_only) = match value {
        DateTimeValue::Date(date) => (date.civil_date()?.to_zoned(tz)?.timestamp(), true),
        DateTimeValue::Utc(date_time)
        | DateTimeValue::Zoned { date_time, .. }
        | DateTimeValue::Floating(date_time) => {
            (date_time.civil_date_time()?.to_zoned(tz)?.timestamp(), false)
        }
    };
    Ok(Instant { at, date_only })
}

/// Zone in which the wall time of a value is read.
///
/// Dates and UTC times use UTC, zoned times the zone named by their `TZID` and floating
/// times the document zone.
#[must_use]
pub fn zone_of(value: &DateTimeValue, zones: &CalendarZones) -> TimeZone {
    match value {
        DateTimeValue::Date(_) | DateTimeValue::Utc(_) => TimeZone::UTC,
        DateTimeValue::Zoned { tz_id, .. } => zones.lookup(tz_id),
        DateTimeValue::Floating(_) => zones.document.tz.clone(),
    }
}

/// Calendar date of the instant in a zone, as `YYYY-MM-DD`.
#[must_use]
pub fn civil_date(instant: Instant, tz: &TimeZone) -> String {
    instant.at.to_zoned(tz.clone()).strftime("%Y-%m-%d").to_string()
}

/// Wall clock time of the instant in a zone, as `HH:MM`.
///
/// Date-only instants always read `00:00`.
#[must_use]
pub fn civil_time(instant: Instant, tz: &TimeZone) -> String {
    if instant.date_only {
        return "00:00".to_string();
    }
    instant.at.to_zoned(tz.clone()).strftime("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use icsnorm_ical::{ValueDate, ValueDateTime};

    use super::*;
    use crate::timezone::ResolvedTimezone;

    fn zones_in(id: &str) -> CalendarZones {
        let calendar = icsnorm_ical::parse(&format!(
            "BEGIN:VCALENDAR\r\nX-WR-TIMEZONE:{id}\r\nEND:VCALENDAR\r\n"
        ))
        .unwrap()
        .remove(0);
        CalendarZones::resolve(&calendar, ResolvedTimezone::neutral())
    }

    fn date_time(raw: &str) -> ValueDateTime {
        raw.parse().unwrap()
    }

    #[test]
    fn materializes_dates_at_utc_midnight() {
        let zones = zones_in("Asia/Tokyo");
        let date: ValueDate = "20250301".parse().unwrap();
        let instant = materialize(&DateTimeValue::Date(date), &zones).unwrap();
        assert!(instant.date_only);
        assert_eq!(instant.at.to_string(), "2025-03-01T00:00:00Z");
    }

    #[test]
    fn materializes_utc_and_floating_times() {
        let zones = zones_in("Asia/Tokyo");

        let utc = DateTimeValue::Utc(date_time("20250301T100000Z"));
        let instant = materialize(&utc, &zones).unwrap();
        assert_eq!(instant.at.to_string(), "2025-03-01T10:00:00Z");

        let floating = DateTimeValue::Floating(date_time("20250301T100000"));
        let instant = materialize(&floating, &zones).unwrap();
        assert!(!instant.date_only);
        assert_eq!(instant.at.to_string(), "2025-03-01T01:00:00Z");
    }

    #[test]
    fn materializes_zoned_times() {
        let zones = zones_in("Asia/Tokyo");
        let zoned = DateTimeValue::Zoned {
            tz_id: "America/New_York".to_string(),
            date_time: date_time("20250701T090000"),
        };
        let instant = materialize(&zoned, &zones).unwrap();
        assert_eq!(instant.at.to_string(), "2025-07-01T13:00:00Z");

        // unknown zone reads as document time
        let zoned = DateTimeValue::Zoned {
            tz_id: "Nowhere/Special".to_string(),
            date_time: date_time("20250701T090000"),
        };
        let instant = materialize(&zoned, &zones).unwrap();
        assert_eq!(instant.at.to_string(), "2025-07-01T00:00:00Z");
    }

    #[test]
    fn rejects_instants_out_of_range() {
        let zones = zones_in("UTC");
        let utc = DateTimeValue::Utc(date_time("99991231T235959Z"));
        assert!(materialize(&utc, &zones).is_err());
    }

    #[test]
    fn formats_civil_date_and_time() {
        let instant = Instant {
            at: "2025-03-01T23:30:45Z".parse().unwrap(),
            date_only: false,
        };
        assert_eq!(civil_date(instant, &TimeZone::UTC), "2025-03-01");
        assert_eq!(civil_time(instant, &TimeZone::UTC), "23:30");

        let tokyo = TimeZone::get("Asia/Tokyo").unwrap();
        assert_eq!(civil_date(instant, &tokyo), "2025-03-02");
        assert_eq!(civil_time(instant, &tokyo), "08:30");
    }

    #[test]
    fn date_only_time_is_midnight_everywhere() {
        let instant = Instant {
            at: "2025-03-01T00:00:00Z".parse().unwrap(),
            date_only: true,
        };
        let new_york = TimeZone::get("America/New_York").unwrap();
        assert_eq!(civil_time(instant, &new_york), "00:00");
        assert_eq!(civil_time(instant, &TimeZone::UTC), "00:00");
    }
}
