// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Normalize iCalendar documents into single and recurring event records.
//!
//! The pipeline resolves the document timezone, classifies every event, folds recurrence
//! exceptions into their series and finally filters the records through a validator.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions)]

mod classify;
mod config;
mod error;
mod event;
mod extract;
mod import;
mod instant;
mod reconcile;
mod timezone;
mod validate;

pub use crate::classify::{ExtractedEvent, Extraction, classify_event};
pub use crate::config::{APP_NAME, Config};
pub use crate::error::{DropReason, ImportError};
pub use crate::event::{
    CalendarEventRecord, EventKind, RecurringEvent, SingleEvent, TimeOfDay, event_id,
};
pub use crate::extract::extract_events;
pub use crate::import::{import_calendar, import_calendar_with};
pub use crate::instant::{Instant, civil_date, civil_time, materialize, zone_of};
pub use crate::reconcile::reconcile;
pub use crate::timezone::{CalendarZones, NEUTRAL_ZONE_ID, ResolvedTimezone, normalize_tzid};
pub use crate::validate::{AcceptAll, RecordValidator, ShapeValidator};
