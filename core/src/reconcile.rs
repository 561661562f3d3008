// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use crate::classify::ExtractedEvent;
use crate::event::CalendarEventRecord;

/// Fold recurrence exceptions into their series.
///
/// The date of every exception is added to the skip dates of the series sharing its UID.
/// Exceptions are still emitted as their own records after all base records, in
/// extraction order.
pub fn reconcile(events: Vec<ExtractedEvent>) -> Vec<CalendarEventRecord> {
    let mut bases: Vec<CalendarEventRecord> = Vec::new();
    let mut by_uid: HashMap<String, usize> = HashMap::new();
    let mut exceptions: Vec<CalendarEventRecord> = Vec::new();
    let mut exception_uids: Vec<String> = Vec::new();

    for event in events {
        if event.is_exception {
            exception_uids.push(event.uid);
            exceptions.push(event.record);
            continue;
        }

        match by_uid.get(&event.uid).and_then(|&i| bases.get_mut(i)) {
            Some(slot) => {
                tracing::warn!(
                    uid = event.uid.as_str(),
                    replaced = slot.id(),
                    "duplicate base event, keeping the last one"
                );
                *slot = event.record;
            }
            None => {
                by_uid.insert(event.uid, bases.len());
                bases.push(event.record);
            }
        }
    }

    for (uid, exception) in exception_uids.iter().zip(&exceptions) {
        let Some(base) = by_uid.get(uid).and_then(|&i| bases.get_mut(i)) else {
            tracing::debug!(
                uid = uid.as_str(),
                id = exception.id(),
                "exception without base event"
            );
            continue;
        };

        match (base, exception) {
            (CalendarEventRecord::Recurring(series), CalendarEventRecord::Single(occurrence)) => {
                series.add_skip_date(occurrence.date.clone());
            }
            (base, exception) => {
                tracing::warn!(?base, ?exception, "cannot fold exception into its base event");
            }
        }
    }

    tracing::debug!(bases = bases.len(), exceptions = exceptions.len(), "reconciled events");
    bases.extend(exceptions);
    bases
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::event::{EventKind, RecurringEvent, SingleEvent, event_id};

    fn series(uid: &str, start_date: &str) -> ExtractedEvent {
        ExtractedEvent {
            uid: uid.to_string(),
            is_exception: false,
            record: CalendarEventRecord::Recurring(RecurringEvent {
                id: event_id(uid, start_date, EventKind::Recurring),
                title: format!("series {uid}"),
                all_day: true,
                start_date: start_date.to_string(),
                rrule: "FREQ=WEEKLY".to_string(),
                skip_dates: vec!["2025-01-27".to_string()],
                time: None,
            }),
        }
    }

    fn single(uid: &str, date: &str, is_exception: bool) -> ExtractedEvent {
        ExtractedEvent {
            uid: uid.to_string(),
            is_exception,
            record: CalendarEventRecord::Single(SingleEvent {
                id: event_id(uid, date, EventKind::Single),
                title: format!("single {uid}"),
                all_day: true,
                date: date.to_string(),
                end_date: None,
                time: None,
            }),
        }
    }

    fn skip_dates(record: &CalendarEventRecord) -> &[String] {
        match record {
            CalendarEventRecord::Recurring(series) => &series.skip_dates,
            CalendarEventRecord::Single(_) => panic!("expected recurring record"),
        }
    }

    #[test]
    fn folds_exceptions_into_series() {
        let records = reconcile(vec![
            single("x", "2025-01-13", true),
            series("x", "2025-01-06"),
            single("x", "2025-01-20", true),
            single("y", "2025-02-01", false),
        ]);
        let ids: Vec<_> = records.iter().map(CalendarEventRecord::id).collect();
        assert_eq!(
            ids,
            [
                "ics::x::2025-01-06::recurring",
                "ics::y::2025-02-01::single",
                "ics::x::2025-01-13::single",
                "ics::x::2025-01-20::single",
            ]
        );
        assert_eq!(
            skip_dates(&records[0]),
            ["2025-01-27", "2025-01-13", "2025-01-20"]
        );
    }

    #[test]
    fn keeps_orphans_as_single_records() {
        let records = reconcile(vec![series("x", "2025-01-06"), single("z", "2025-01-13", true)]);
        assert_eq!(records.len(), 2);
        assert_eq!(skip_dates(&records[0]), ["2025-01-27"]);
        assert_eq!(records[1].id(), "ics::z::2025-01-13::single");
    }

    #[test]
    fn leaves_mismatched_pairs_untouched() {
        let base = single("x", "2025-01-06", false);
        let exception = single("x", "2025-01-13", true);
        let records = reconcile(vec![base.clone(), exception.clone()]);
        assert_eq!(records, [base.record, exception.record]);
    }

    #[test]
    fn replaces_duplicate_base_in_place() {
        let records = reconcile(vec![
            series("x", "2025-01-06"),
            single("y", "2025-02-01", false),
            series("x", "2025-03-03"),
            single("x", "2025-03-10", true),
        ]);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id(), "ics::x::2025-03-03::recurring");
        assert_eq!(skip_dates(&records[0]), ["2025-01-27", "2025-03-10"]);
        assert_eq!(records[1].id(), "ics::y::2025-02-01::single");
    }

    #[test]
    fn does_not_duplicate_skip_dates() {
        let records = reconcile(vec![series("x", "2025-01-06"), single("x", "2025-01-27", true)]);
        assert_eq!(skip_dates(&records[0]), ["2025-01-27"]);
    }
}
