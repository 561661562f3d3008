// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Timezone component (VTIMEZONE).

use crate::component::Component;
use crate::keyword::{
    KW_DAYLIGHT, KW_DTSTART, KW_RRULE, KW_STANDARD, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM,
    KW_TZOFFSETTO, KW_VTIMEZONE,
};
use crate::value::{ValueDateTime, ValueError, ValueRecurrenceRule, ValueUtcOffset};

/// Timezone component (VTIMEZONE)
#[derive(Debug, Clone, Copy)]
pub struct TimezoneComponent<'a> {
    component: &'a Component,
}

impl Component {
    /// Wrap this component as a timezone definition, if it is a VTIMEZONE.
    #[must_use]
    pub fn as_timezone(&self) -> Option<TimezoneComponent<'_>> {
        self.is(KW_VTIMEZONE)
            .then_some(TimezoneComponent { component: self })
    }
}

impl<'a> TimezoneComponent<'a> {
    /// Timezone identifier
    #[must_use]
    pub fn tz_id(&self) -> Option<&'a str> {
        self.component
            .property(KW_TZID)
            .map(|p| p.value.trim())
    }

    /// Standard and daylight observances, in document order
    #[must_use]
    pub fn observances(&self) -> Vec<Observance<'a>> {
        self.component
            .children
            .iter()
            .filter_map(|child| {
                let kind = if child.is(KW_STANDARD) {
                    ObservanceKind::Standard
                } else if child.is(KW_DAYLIGHT) {
                    ObservanceKind::Daylight
                } else {
                    return None;
                };
                Some(Observance {
                    kind,
                    component: child,
                })
            })
            .collect()
    }

    /// Standard time observances
    #[must_use]
    pub fn standard(&self) -> Vec<Observance<'a>> {
        self.observances_of(ObservanceKind::Standard)
    }

    /// Daylight saving time observances
    #[must_use]
    pub fn daylight(&self) -> Vec<Observance<'a>> {
        self.observances_of(ObservanceKind::Daylight)
    }

    fn observances_of(&self, kind: ObservanceKind) -> Vec<Observance<'a>> {
        self.observances()
            .into_iter()
            .filter(|o| o.kind == kind)
            .collect()
    }
}

/// Kind of a timezone observance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservanceKind {
    /// STANDARD sub-component
    Standard,
    /// DAYLIGHT sub-component
    Daylight,
}

/// A STANDARD or DAYLIGHT sub-component of a VTIMEZONE
#[derive(Debug, Clone, Copy)]
pub struct Observance<'a> {
    /// Standard or daylight
    pub kind: ObservanceKind,
    component: &'a Component,
}

impl<'a> Observance<'a> {
    /// Offset in use during this observance
    #[must_use]
    pub fn tz_offset_to(&self) -> Option<Result<ValueUtcOffset, ValueError>> {
        self.component
            .property(KW_TZOFFSETTO)
            .map(|p| p.value.trim().parse())
    }

    /// Offset in use before this observance
    #[must_use]
    pub fn tz_offset_from(&self) -> Option<Result<ValueUtcOffset, ValueError>> {
        self.component
            .property(KW_TZOFFSETFROM)
            .map(|p| p.value.trim().parse())
    }

    /// Abbreviated name, e.g. `CET`
    #[must_use]
    pub fn tz_name(&self) -> Option<&'a str> {
        self.component
            .property(KW_TZNAME)
            .map(|p| p.value.trim())
    }

    /// First onset, in local time before the transition
    #[must_use]
    pub fn dt_start(&self) -> Option<Result<ValueDateTime, ValueError>> {
        self.component
            .property(KW_DTSTART)
            .map(|p| p.value.trim().parse())
    }

    /// Recurrence rule of the onsets
    #[must_use]
    pub fn rrule(&self) -> Option<Result<ValueRecurrenceRule, ValueError>> {
        self.component.property(KW_RRULE).map(|p| p.value.parse())
    }
}
