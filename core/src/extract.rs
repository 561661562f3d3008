// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use icsnorm_ical::Component;
use icsnorm_ical::keyword::KW_VEVENT;

use crate::classify::{ExtractedEvent, Extraction, classify_event};
use crate::timezone::CalendarZones;

/// Classify every VEVENT of a calendar, leaving out events with unusable time data.
pub fn extract_events(calendar: &Component, zones: &CalendarZones) -> Vec<ExtractedEvent> {
    calendar
        .children_named(KW_VEVENT)
        .filter_map(Component::as_event)
        .filter_map(|event| match classify_event(event, zones) {
            Extraction::Keep(extracted) => Some(extracted),
            Extraction::Drop(reason) => {
                tracing::warn!(
                    uid = event.uid().as_deref(),
                    %reason,
                    cause = reason.source().map(tracing::field::display),
                    "dropping event"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::ResolvedTimezone;

    #[test]
    fn filters_unusable_events() {
        let src = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
UID:good\r
DTSTART:20250101T090000Z\r
END:VEVENT\r
BEGIN:VTODO\r
UID:todo\r
DTSTART:20250101T090000Z\r
END:VTODO\r
BEGIN:VEVENT\r
UID:bad\r
DTSTART:yesterday\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:no-start\r
SUMMARY:Floating idea\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:also-good\r
DTSTART;VALUE=DATE:20250102\r
END:VEVENT\r
END:VCALENDAR\r
";
        let calendar = icsnorm_ical::parse(src).unwrap().remove(0);
        let zones = CalendarZones::resolve(&calendar, ResolvedTimezone::neutral());
        let uids: Vec<_> = extract_events(&calendar, &zones)
            .into_iter()
            .map(|e| e.uid)
            .collect();
        assert_eq!(uids, ["good", "also-good"]);
    }
}
