// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event component (VEVENT).

use crate::component::{Component, Property};
use crate::keyword::{
    KW_DTEND, KW_DTSTART, KW_DURATION, KW_EXDATE, KW_RECURRENCE_ID, KW_RRULE, KW_SUMMARY, KW_UID,
    KW_VEVENT,
};
use crate::semantic::DateTimeValue;
use crate::value::{ValueDuration, ValueError, ValueRecurrenceRule, unescape_text};

/// Event component (VEVENT)
#[derive(Debug, Clone, Copy)]
pub struct EventComponent<'a> {
    component: &'a Component,
}

impl Component {
    /// Wrap this component as an event, if it is a VEVENT.
    #[must_use]
    pub fn as_event(&self) -> Option<EventComponent<'_>> {
        self.is(KW_VEVENT)
            .then_some(EventComponent { component: self })
    }
}

impl<'a> EventComponent<'a> {
    /// The wrapped component.
    #[must_use]
    pub const fn component(&self) -> &'a Component {
        self.component
    }

    /// Unique identifier for the event
    #[must_use]
    pub fn uid(&self) -> Option<String> {
        self.text(KW_UID)
    }

    /// Summary/title of the event
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.text(KW_SUMMARY)
    }

    /// Date/time the event starts
    #[must_use]
    pub fn dt_start(&self) -> Option<Result<DateTimeValue, ValueError>> {
        self.property(KW_DTSTART).map(DateTimeValue::from_property)
    }

    /// Date/time the event ends
    #[must_use]
    pub fn dt_end(&self) -> Option<Result<DateTimeValue, ValueError>> {
        self.property(KW_DTEND).map(DateTimeValue::from_property)
    }

    /// Duration of the event (alternative to `DTEND`)
    #[must_use]
    pub fn duration(&self) -> Option<Result<ValueDuration, ValueError>> {
        self.property(KW_DURATION).map(|p| p.value.trim().parse())
    }

    /// Occurrence of a recurring series this event overrides
    #[must_use]
    pub fn recurrence_id(&self) -> Option<Result<DateTimeValue, ValueError>> {
        self.property(KW_RECURRENCE_ID)
            .map(DateTimeValue::from_property)
    }

    /// Recurrence rule of the event
    #[must_use]
    pub fn rrule(&self) -> Option<Result<ValueRecurrenceRule, ValueError>> {
        self.property(KW_RRULE).map(|p| p.value.parse())
    }

    /// Every exclusion date, across all `EXDATE` properties, in document order
    #[must_use]
    pub fn ex_dates(&self) -> Vec<Result<DateTimeValue, ValueError>> {
        self.component
            .properties(KW_EXDATE)
            .flat_map(DateTimeValue::list_from_property)
            .collect()
    }

    /// First property with the given name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'a Property> {
        self.component.property(name)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.property(name).map(|p| unescape_text(&p.value))
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::parse;

    #[test]
    fn reads_event_fields() {
        let src = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
UID:abc@example.com\r
SUMMARY:Lunch\\, with team\r
DTSTART;TZID=Europe/Paris:20250301T120000\r
DURATION:PT1H\r
RRULE:FREQ=WEEKLY;COUNT=5\r
EXDATE;VALUE=DATE:20250308,20250315\r
EXDATE;VALUE=DATE:20250322\r
END:VEVENT\r
END:VCALENDAR\r
";
        let roots = parse(src).unwrap();
        let event = roots[0].children[0].as_event().unwrap();

        assert_eq!(event.uid().as_deref(), Some("abc@example.com"));
        assert_eq!(event.summary().as_deref(), Some("Lunch, with team"));
        assert!(matches!(
            event.dt_start(),
            Some(Ok(DateTimeValue::Zoned { ref tz_id, .. })) if tz_id == "Europe/Paris"
        ));
        assert!(event.dt_end().is_none());
        assert_eq!(event.duration().unwrap().unwrap().as_seconds(), 3600);
        assert!(event.recurrence_id().is_none());
        assert_eq!(
            event.rrule().unwrap().unwrap().to_string(),
            "FREQ=WEEKLY;COUNT=5"
        );
        assert_eq!(event.ex_dates().len(), 3);
        assert!(roots[0].as_event().is_none());
    }
}
