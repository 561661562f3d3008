// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse iCalendar documents into a component tree and typed property values.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

mod component;
pub mod keyword;
mod parser;
pub mod semantic;
pub mod syntax;
pub mod value;

pub use crate::component::{Component, Parameter, Property};
pub use crate::parser::{ParseError, parse};
pub use crate::semantic::{
    DateTimeValue, EventComponent, Observance, ObservanceKind, TimezoneComponent,
};
pub use crate::value::{
    RecurrenceFrequency, RecurrenceUntil, ValueDate, ValueDateTime, ValueDuration, ValueError,
    ValueKind, ValueRecurrenceRule, ValueTime, ValueUtcOffset, WeekDay, WeekDayNum,
    unescape_text,
};
