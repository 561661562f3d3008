// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time};

use crate::event::{CalendarEventRecord, TimeOfDay};

/// Final filter over imported records.
pub trait RecordValidator {
    /// Return the record to keep it, or `None` to drop it.
    fn validate(&self, record: CalendarEventRecord) -> Option<CalendarEventRecord>;
}

impl<F> RecordValidator for F
where
    F: Fn(CalendarEventRecord) -> Option<CalendarEventRecord>,
{
    fn validate(&self, record: CalendarEventRecord) -> Option<CalendarEventRecord> {
        self(record)
    }
}

/// Keeps every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RecordValidator for AcceptAll {
    fn validate(&self, record: CalendarEventRecord) -> Option<CalendarEventRecord> {
        Some(record)
    }
}

/// Drops records that are not well formed.
///
/// A record is well formed when it has an id, its dates are `YYYY-MM-DD` calendar
/// dates, its times are `HH:MM`, it does not end before it starts and, for a series,
/// it has a recurrence rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeValidator;

impl RecordValidator for ShapeValidator {
    fn validate(&self, record: CalendarEventRecord) -> Option<CalendarEventRecord> {
        match check_shape(&record) {
            Ok(()) => Some(record),
            Err(problem) => {
                tracing::warn!(id = record.id(), problem, "dropping malformed record");
                None
            }
        }
    }
}

fn check_shape(record: &CalendarEventRecord) -> Result<(), &'static str> {
    if record.id().is_empty() {
        return Err("empty id");
    }

    match record {
        CalendarEventRecord::Single(event) => {
            let date = parse_date(&event.date).ok_or("invalid date")?;
            if let Some(end_date) = &event.end_date {
                let end_date = parse_date(end_date).ok_or("invalid end date")?;
                if end_date < date {
                    return Err("end date before date");
                }
            }
            check_time(event.time.as_ref())
        }
        CalendarEventRecord::Recurring(event) => {
            parse_date(&event.start_date).ok_or("invalid start date")?;
            if event.rrule.is_empty() {
                return Err("empty recurrence rule");
            }
            if !event.skip_dates.iter().all(|d| parse_date(d).is_some()) {
                return Err("invalid skip date");
            }
            check_time(event.time.as_ref())
        }
    }
}

fn check_time(time: Option<&TimeOfDay>) -> Result<(), &'static str> {
    let Some(time) = time else {
        return Ok(());
    };
    parse_time(&time.start_time).ok_or("invalid start time")?;
    if let Some(end_time) = &time.end_time {
        parse_time(end_time).ok_or("invalid end time")?;
    }
    Ok(())
}

fn parse_date(s: &str) -> Option<Date> {
    if s.len() != 10 {
        return None;
    }
    Date::strptime("%Y-%m-%d", s).ok()
}

fn parse_time(s: &str) -> Option<Time> {
    if s.len() != 5 {
        return None;
    }
    Time::strptime("%H:%M", s).ok()
}
