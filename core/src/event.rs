// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use serde::Serialize;

/// A normalized calendar event, either a single occurrence or a recurring series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalendarEventRecord {
    /// An event that happens once.
    Single(SingleEvent),

    /// An event that repeats following a recurrence rule.
    Recurring(RecurringEvent),
}

impl CalendarEventRecord {
    /// Stable identity of the record.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            CalendarEventRecord::Single(event) => &event.id,
            CalendarEventRecord::Recurring(event) => &event.id,
        }
    }

    /// Title of the event.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            CalendarEventRecord::Single(event) => &event.title,
            CalendarEventRecord::Recurring(event) => &event.title,
        }
    }

    /// Whether the event spans whole days.
    #[must_use]
    pub fn all_day(&self) -> bool {
        match self {
            CalendarEventRecord::Single(event) => event.all_day,
            CalendarEventRecord::Recurring(event) => event.all_day,
        }
    }

    /// The date of a single event, or the first date of a series.
    #[must_use]
    pub fn anchor_date(&self) -> &str {
        match self {
            CalendarEventRecord::Single(event) => &event.date,
            CalendarEventRecord::Recurring(event) => &event.start_date,
        }
    }

    /// Time of day, absent for all-day events.
    #[must_use]
    pub fn time(&self) -> Option<&TimeOfDay> {
        match self {
            CalendarEventRecord::Single(event) => event.time.as_ref(),
            CalendarEventRecord::Recurring(event) => event.time.as_ref(),
        }
    }

    /// Shape of the record.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            CalendarEventRecord::Single(_) => EventKind::Single,
            CalendarEventRecord::Recurring(_) => EventKind::Recurring,
        }
    }
}

/// An event that happens once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleEvent {
    /// Identity, see [`event_id`].
    pub id: String,
    /// Title, empty if the source has no summary.
    pub title: String,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// Start date, `YYYY-MM-DD`.
    pub date: String,
    /// End date if the event ends on another day.
    pub end_date: Option<String>,
    /// Time of day, absent for all-day events.
    #[serde(flatten)]
    pub time: Option<TimeOfDay>,
}

/// An event that repeats following a recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringEvent {
    /// Identity, see [`event_id`].
    pub id: String,
    /// Title, empty if the source has no summary.
    pub title: String,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// First date of the series, `YYYY-MM-DD`.
    pub start_date: String,
    /// Recurrence rule, e.g. `FREQ=WEEKLY;COUNT=5`.
    pub rrule: String,
    /// Dates removed from the series, without duplicates.
    pub skip_dates: Vec<String>,
    /// Time of day, absent for all-day events.
    #[serde(flatten)]
    pub time: Option<TimeOfDay>,
}

impl RecurringEvent {
    /// Exclude a date from the series, returns false if it was already excluded.
    pub fn add_skip_date(&mut self, date: String) -> bool {
        if self.skip_dates.contains(&date) {
            return false;
        }
        self.skip_dates.push(date);
        true
    }
}

/// Wall clock start and end of an event, `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDay {
    /// Start time.
    pub start_time: String,
    /// End time, if known.
    pub end_time: Option<String>,
}

/// Shape of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A single occurrence.
    Single,
    /// A recurring series.
    Recurring,
}

impl EventKind {
    /// Lowercase name, as used in identities and serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Single => "single",
            EventKind::Recurring => "recurring",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a record: `ics::{uid}::{date}::{kind}`.
#[must_use]
pub fn event_id(uid: &str, date: &str, kind: EventKind) -> String {
    format!("ics::{uid}::{date}::{kind}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn recurring() -> RecurringEvent {
        RecurringEvent {
            id: event_id("abc", "2025-01-06", EventKind::Recurring),
            title: "Standup".to_string(),
            all_day: false,
            start_date: "2025-01-06".to_string(),
            rrule: "FREQ=WEEKLY;COUNT=5".to_string(),
            skip_dates: Vec::new(),
            time: Some(TimeOfDay {
                start_time: "09:00".to_string(),
                end_time: None,
            }),
        }
    }

    #[test]
    fn builds_identities() {
        assert_eq!(
            event_id("abc", "2025-01-06", EventKind::Single),
            "ics::abc::2025-01-06::single"
        );
        assert_eq!(
            event_id("", "2025-01-06", EventKind::Recurring),
            "ics::::2025-01-06::recurring"
        );
    }

    #[test]
    fn keeps_skip_dates_unique_and_ordered() {
        let mut event = recurring();
        assert!(event.add_skip_date("2025-01-20".to_string()));
        assert!(event.add_skip_date("2025-01-13".to_string()));
        assert!(!event.add_skip_date("2025-01-20".to_string()));
        assert_eq!(event.skip_dates, ["2025-01-20", "2025-01-13"]);
    }

    #[test]
    fn serializes_single_event() {
        let record = CalendarEventRecord::Single(SingleEvent {
            id: event_id("abc", "2025-01-06", EventKind::Single),
            title: "Lunch".to_string(),
            all_day: false,
            date: "2025-01-06".to_string(),
            end_date: None,
            time: Some(TimeOfDay {
                start_time: "12:00".to_string(),
                end_time: Some("13:00".to_string()),
            }),
        });
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "type": "single",
                "id": "ics::abc::2025-01-06::single",
                "title": "Lunch",
                "allDay": false,
                "date": "2025-01-06",
                "endDate": null,
                "startTime": "12:00",
                "endTime": "13:00",
            })
        );
    }

    #[test]
    fn serializes_all_day_recurring_event_without_times() {
        let mut event = recurring();
        event.all_day = true;
        event.time = None;
        event.add_skip_date("2025-01-13".to_string());
        let record = CalendarEventRecord::Recurring(event);
        assert_eq!(record.kind(), EventKind::Recurring);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "type": "recurring",
                "id": "ics::abc::2025-01-06::recurring",
                "title": "Standup",
                "allDay": true,
                "startDate": "2025-01-06",
                "rrule": "FREQ=WEEKLY;COUNT=5",
                "skipDates": ["2025-01-13"],
            })
        );
    }

    #[test]
    fn serializes_missing_recurring_end_time_as_null() {
        let value = serde_json::to_value(CalendarEventRecord::Recurring(recurring())).unwrap();
        assert_eq!(value["startTime"], "09:00");
        assert!(value["endTime"].is_null());
        assert!(value.as_object().unwrap().contains_key("endTime"));
    }
}
