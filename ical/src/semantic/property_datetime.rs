// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and time representation of date-bearing properties.

use crate::component::Property;
use crate::keyword::{KW_DATE, KW_TZID, KW_VALUE};
use crate::value::{ValueDate, ValueDateTime, ValueError};

/// Date and time representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeValue {
    /// Date-only value
    Date(ValueDate),

    /// Date and time without timezone (floating time)
    Floating(ValueDateTime),

    /// Date and time in UTC
    Utc(ValueDateTime),

    /// Date and time with specific timezone
    Zoned {
        /// Timezone identifier, as written in the `TZID` parameter
        tz_id: String,
        /// Wall clock date and time in that zone
        date_time: ValueDateTime,
    },
}

impl DateTimeValue {
    /// Parse the first value of a date-bearing property.
    ///
    /// # Errors
    /// If the value does not match the value type selected by the parameters.
    pub fn from_property(prop: &Property) -> Result<Self, ValueError> {
        let raw = prop.value.split(',').next().unwrap_or_default();
        Self::parse_with(prop, raw)
    }

    /// Parse every comma separated value of a date-bearing property, such as `EXDATE`.
    pub fn list_from_property(prop: &Property) -> impl Iterator<Item = Result<Self, ValueError>> {
        prop.value
            .split(',')
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Self::parse_with(prop, raw))
    }

    fn parse_with(prop: &Property, raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();
        let is_date = match prop.parameter(KW_VALUE) {
            Some(kind) => kind.eq_ignore_ascii_case(KW_DATE),
            // Some producers omit VALUE=DATE on date-only values
            None => raw.len() == 8,
        };
        if is_date {
            return Ok(Self::Date(raw.parse()?));
        }

        let date_time: ValueDateTime = raw.parse()?;
        Ok(match prop.parameter(KW_TZID) {
            _ if date_time.is_utc() => Self::Utc(date_time),
            Some(tz_id) => Self::Zoned {
                tz_id: tz_id.to_string(),
                date_time,
            },
            None => Self::Floating(date_time),
        })
    }

    /// Whether this is a date without time of day.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Get the date part.
    #[must_use]
    pub const fn date(&self) -> ValueDate {
        match self {
            Self::Date(date) => *date,
            Self::Floating(dt) | Self::Utc(dt) | Self::Zoned { date_time: dt, .. } => dt.date,
        }
    }
}
