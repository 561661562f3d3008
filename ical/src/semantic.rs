// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed access to the components this crate understands.
//!
//! The wrappers borrow the underlying [`Component`](crate::Component) and parse property
//! values on demand, so a malformed property only fails the accessor that reads it.

mod property_datetime;
mod vevent;
mod vtimezone;

pub use crate::semantic::property_datetime::DateTimeValue;
pub use crate::semantic::vevent::EventComponent;
pub use crate::semantic::vtimezone::{Observance, ObservanceKind, TimezoneComponent};
