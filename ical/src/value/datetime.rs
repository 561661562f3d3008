// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, time and UTC offset values as defined in RFC 5545 Sections 3.3.4, 3.3.5, 3.3.12
//! and 3.3.14.

use std::fmt;
use std::str::FromStr;

use chumsky::prelude::*;

use crate::value::{Extra, ValueError, ValueKind, digits, parse_full};

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`.
    ///
    /// # Errors
    /// If the fields do not form a valid calendar date.
    pub fn civil_date(self) -> Result<jiff::civil::Date, jiff::Error> {
        jiff::civil::Date::new(self.year, self.month, self.day)
    }
}

impl FromStr for ValueDate {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_full(ValueKind::Date, value_date(), s)
    }
}

impl fmt::Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Format Definition:
///
/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub(crate) fn value_date<'src>() -> impl Parser<'src, &'src str, ValueDate, Extra<'src>> + Clone {
    digits(4)
        .then(digits(2))
        .then(digits(2))
        .try_map(|((year, month), day), span| {
            let (Ok(year), Ok(month), Ok(day)) =
                (i16::try_from(year), i8::try_from(month), i8::try_from(day))
            else {
                return Err(Rich::custom(span, "date out of range"));
            };
            match jiff::civil::Date::new(year, month, day) {
                Ok(_) => Ok(ValueDate { year, month, day }),
                Err(_) => Err(Rich::custom(span, "not a calendar date")),
            }
        })
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: i8,

    /// Minute component, 0-59.
    pub minute: i8,

    /// Second component, 0-60 (60 for leap second).
    pub second: i8,

    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl ValueTime {
    /// Create a new `ValueTime` from components.
    #[must_use]
    pub const fn new(hour: i8, minute: i8, second: i8, utc: bool) -> Self {
        Self {
            hour,
            minute,
            second,
            utc,
        }
    }

    /// Convert to `jiff::civil::Time`, a leap second is contracted to 59.
    ///
    /// # Errors
    /// If the fields do not form a valid time of day.
    pub fn civil_time(self) -> Result<jiff::civil::Time, jiff::Error> {
        jiff::civil::Time::new(self.hour, self.minute, self.second.min(59), 0)
    }
}

impl FromStr for ValueTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_full(ValueKind::Time, value_time(), s)
    }
}

impl fmt::Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Format Definition:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// time-utc     = "Z"
/// ```
pub(crate) fn value_time<'src>() -> impl Parser<'src, &'src str, ValueTime, Extra<'src>> + Clone {
    time_fields()
        .then(just('Z').or_not())
        .map(|((hour, minute, second), utc)| ValueTime::new(hour, minute, second, utc.is_some()))
}

fn time_fields<'src>() -> impl Parser<'src, &'src str, (i8, i8, i8), Extra<'src>> + Clone {
    digits(2)
        .then(digits(2))
        .then(digits(2))
        .try_map(|((hour, minute), second), span| {
            match (i8::try_from(hour), i8::try_from(minute), i8::try_from(second)) {
                (Ok(h), Ok(m), Ok(s)) if h <= 23 && m <= 59 && s <= 60 => Ok((h, m, s)),
                _ => Err(Rich::custom(span, "time out of range")),
            }
        })
}

/// Date-Time value defined in the RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,
}

impl ValueDateTime {
    /// Whether the value carries the UTC designator.
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        self.time.utc
    }

    /// Convert to `jiff::civil::DateTime`, ignoring the UTC designator.
    ///
    /// # Errors
    /// If the fields do not form a valid date and time.
    pub fn civil_date_time(&self) -> Result<jiff::civil::DateTime, jiff::Error> {
        Ok(self.date.civil_date()?.to_datetime(self.time.civil_time()?))
    }
}

impl FromStr for ValueDateTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_full(ValueKind::DateTime, value_date_time(), s)
    }
}

impl fmt::Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// Format Definition:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
pub(crate) fn value_date_time<'src>()
-> impl Parser<'src, &'src str, ValueDateTime, Extra<'src>> + Clone {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| ValueDateTime { date, time })
}

/// UTC Offset Value defined in RFC 5545 Section 3.3.14
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueUtcOffset {
    /// Whether the offset is positive
    pub positive: bool,

    /// Hour, 0-23
    pub hour: i8,

    /// Minute, 0-59
    pub minute: i8,

    /// Second, 0-59, optional
    pub second: Option<i8>,
}

impl ValueUtcOffset {
    /// Signed offset from UTC in seconds.
    #[must_use]
    pub fn seconds(&self) -> i32 {
        let abs = i32::from(self.hour) * 3600
            + i32::from(self.minute) * 60
            + i32::from(self.second.unwrap_or(0));
        if self.positive { abs } else { -abs }
    }

    /// Convert to `jiff::tz::Offset`.
    ///
    /// # Errors
    /// If the offset is outside the range supported by jiff.
    pub fn offset(&self) -> Result<jiff::tz::Offset, jiff::Error> {
        jiff::tz::Offset::from_seconds(self.seconds())
    }
}

impl FromStr for ValueUtcOffset {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_full(ValueKind::UtcOffset, value_utc_offset(), s)
    }
}

/// Format Definition:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
fn value_utc_offset<'src>() -> impl Parser<'src, &'src str, ValueUtcOffset, Extra<'src>> + Clone {
    select! { c @ ('+' | '-') => c }
        .then(digits(2))
        .then(digits(2))
        .then(digits(2).or_not())
        .try_map(|(((sign, hour), minute), second), span| {
            let second = second.unwrap_or(0);
            match (i8::try_from(hour), i8::try_from(minute), i8::try_from(second)) {
                (Ok(hour), Ok(minute), Ok(s)) if hour <= 23 && minute <= 59 && s <= 59 => {
                    Ok(ValueUtcOffset {
                        positive: sign != '-',
                        hour,
                        minute,
                        second: (s != 0).then_some(s),
                    })
                }
                _ => Err(Rich::custom(span, "offset out of range")),
            }
        })
}
