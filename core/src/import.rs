// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use icsnorm_ical::keyword::KW_VCALENDAR;

use crate::config::Config;
use crate::error::ImportError;
use crate::event::CalendarEventRecord;
use crate::extract::extract_events;
use crate::reconcile::reconcile;
use crate::timezone::CalendarZones;
use crate::validate::{AcceptAll, RecordValidator, ShapeValidator};

/// Import the events of an iCalendar document.
///
/// Records are checked with [`ShapeValidator`] unless validation is disabled in the
/// configuration.
///
/// ## Errors
/// If the document is malformed or has no VCALENDAR. Events with unusable time data are
/// left out rather than reported.
#[tracing::instrument(skip_all)]
pub fn import_calendar(
    text: &str,
    config: &Config,
) -> Result<Vec<CalendarEventRecord>, ImportError> {
    if config.validate {
        import_calendar_with(text, config, &ShapeValidator)
    } else {
        import_calendar_with(text, config, &AcceptAll)
    }
}

/// Import the events of an iCalendar document, filtering records with `validator`.
///
/// ## Errors
/// If the document is malformed or has no VCALENDAR.
#[tracing::instrument(skip_all)]
pub fn import_calendar_with<V>(
    text: &str,
    config: &Config,
    validator: &V,
) -> Result<Vec<CalendarEventRecord>, ImportError>
where
    V: RecordValidator + ?Sized,
{
    let roots = icsnorm_ical::parse(text).map_err(ImportError::Parse)?;
    let mut calendars = roots.iter().filter(|c| c.is(KW_VCALENDAR));
    let calendar = calendars.next().ok_or(ImportError::NoCalendar)?;
    let ignored = calendars.count();
    if ignored > 0 {
        tracing::warn!(ignored, "only the first VCALENDAR is imported");
    }

    let zones = CalendarZones::resolve(calendar, config.fallback_timezone());
    let events = extract_events(calendar, &zones);
    tracing::debug!(count = events.len(), "extracted events");

    let records = reconcile(events);
    let total = records.len();
    let records: Vec<_> = records
        .into_iter()
        .filter_map(|record| validator.validate(record))
        .collect();
    tracing::debug!(total, kept = records.len(), "validated records");
    Ok(records)
}
