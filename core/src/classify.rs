// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use icsnorm_ical::keyword::{KW_DTEND, KW_DTSTART, KW_DURATION, KW_RECURRENCE_ID};
use icsnorm_ical::{DateTimeValue, EventComponent, ValueDuration};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Span};

use crate::error::DropReason;
use crate::event::{
    CalendarEventRecord, EventKind, RecurringEvent, SingleEvent, TimeOfDay, event_id,
};
use crate::instant::{Instant, civil_date, civil_time, materialize, zone_of};
use crate::timezone::CalendarZones;

/// A classified event, ready for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEvent {
    /// UID of the source event, empty if missing.
    pub uid: String,

    /// The source event overrides one occurrence of a series.
    pub is_exception: bool,

    /// The normalized record.
    pub record: CalendarEventRecord,
}

/// Keep or drop decision for one event.
#[derive(Debug)]
pub enum Extraction {
    /// The event has usable time data.
    Keep(ExtractedEvent),
    /// The event is left out of the import.
    Drop(DropReason),
}

/// Classify an event as single or recurring, and normalize its dates and times.
///
/// Events without a usable start, end or recurrence rule are dropped.
pub fn classify_event(event: EventComponent<'_>, zones: &CalendarZones) -> Extraction {
    match classify(event, zones) {
        Ok(extracted) => Extraction::Keep(extracted),
        Err(reason) => Extraction::Drop(reason),
    }
}

fn classify(event: EventComponent<'_>, zones: &CalendarZones) -> Result<ExtractedEvent, DropReason> {
    let start = event
        .dt_start()
        .ok_or(DropReason::MissingStart)?
        .map_err(DropReason::InvalidStart)?;
    let all_day = start.is_date();
    let start_zone = zone_of(&start, zones);
    let start = instant_of(&start, zones, KW_DTSTART)?;
    let (end, has_end) = end_instant(event, start, start_zone, zones)?;
    let rrule = event.rrule().transpose().map_err(DropReason::InvalidRule)?;

    // all-day dates do not depend on the document zone
    let tz = if all_day {
        TimeZone::UTC
    } else {
        zones.document.tz.clone()
    };

    let uid = event.uid().unwrap_or_default();
    let title = event.summary().unwrap_or_default();

    let record = match rrule {
        Some(rrule) => {
            let start_date = civil_date(start, &tz);
            let mut series = RecurringEvent {
                id: event_id(&uid, &start_date, EventKind::Recurring),
                title,
                all_day,
                start_date,
                rrule: rrule.to_string(),
                skip_dates: Vec::new(),
                time: (!all_day).then(|| TimeOfDay {
                    start_time: civil_time(start, &tz),
                    end_time: has_end.then(|| civil_time(end, &tz)),
                }),
            };
            for date in ex_dates(event, zones, &tz) {
                series.add_skip_date(date);
            }
            CalendarEventRecord::Recurring(series)
        }
        None => {
            let date = civil_date(start, &tz);
            let end_date = has_end
                .then(|| civil_date(end, &tz))
                .filter(|end_date| *end_date != date);
            CalendarEventRecord::Single(SingleEvent {
                id: event_id(&uid, &date, EventKind::Single),
                title,
                all_day,
                date,
                end_date,
                // the end time is read even without DTEND or DURATION
                time: (!all_day).then(|| TimeOfDay {
                    start_time: civil_time(start, &tz),
                    end_time: Some(civil_time(end, &tz)),
                }),
            })
        }
    };

    Ok(ExtractedEvent {
        uid,
        is_exception: event.property(KW_RECURRENCE_ID).is_some(),
        record,
    })
}

fn instant_of(
    value: &DateTimeValue,
    zones: &CalendarZones,
    property: &'static str,
) -> Result<Instant, DropReason> {
    materialize(value, zones).map_err(|source| DropReason::Unmaterializable { property, source })
}

/// End instant, and whether the event states its end explicitly.
fn end_instant(
    event: EventComponent<'_>,
    start: Instant,
    start_zone: TimeZone,
    zones: &CalendarZones,
) -> Result<(Instant, bool), DropReason> {
    if let Some(dt_end) = event.dt_end() {
        let dt_end = dt_end.map_err(DropReason::InvalidEnd)?;
        return Ok((instant_of(&dt_end, zones, KW_DTEND)?, true));
    }

    if let Some(duration) = event.duration() {
        let duration = duration.map_err(DropReason::InvalidDuration)?;
        return Ok((add_duration(start, start_zone, &duration)?, true));
    }

    if start.date_only {
        return Ok((shift(start, SignedDuration::from_hours(24), KW_DTSTART)?, false));
    }
    Ok((start, false))
}

/// Days and weeks are added to the wall clock in the zone of DTSTART, the time part as
/// an exact duration.
fn add_duration(
    start: Instant,
    tz: TimeZone,
    duration: &ValueDuration,
) -> Result<Instant, DropReason> {
    let unusable = |source| DropReason::Unmaterializable {
        property: KW_DURATION,
        source,
    };
    let days = Span::new()
        .try_days(duration.nominal_days())
        .map_err(unusable)?;
    let at = start
        .at
        .to_zoned(tz)
        .checked_add(days)
        .map_err(unusable)?
        .timestamp()
        .checked_add(duration.exact_time())
        .map_err(unusable)?;
    Ok(Instant {
        at,
        date_only: start.date_only,
    })
}

fn shift(
    instant: Instant,
    by: SignedDuration,
    property: &'static str,
) -> Result<Instant, DropReason> {
    let at = instant
        .at
        .checked_add(by)
        .map_err(|source| DropReason::Unmaterializable { property, source })?;
    Ok(Instant {
        at,
        date_only: instant.date_only,
    })
}

/// Dates excluded by the EXDATE properties of the event.
///
/// Only the date is kept, the time of day of an exclusion is discarded. Exclusions that
/// cannot be read are skipped.
fn ex_dates(event: EventComponent<'_>, zones: &CalendarZones, tz: &TimeZone) -> Vec<String> {
    let mut dates = Vec::new();
    for value in event.ex_dates() {
        let instant = match value {
            Ok(value) => materialize(&value, zones),
            Err(err) => {
                tracing::warn!(uid = event.uid().as_deref(), %err, "skipping invalid EXDATE");
                continue;
            }
        };
        match instant {
            // date-only exclusions name a calendar day, not a point in the document zone
            Ok(instant) if instant.date_only => dates.push(civil_date(instant, &TimeZone::UTC)),
            Ok(instant) => dates.push(civil_date(instant, tz)),
            Err(err) => {
                tracing::warn!(uid = event.uid().as_deref(), %err, "skipping unusable EXDATE");
            }
        }
    }
    dates
}
