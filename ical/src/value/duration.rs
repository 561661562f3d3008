// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.

use std::str::FromStr;

use chumsky::prelude::*;

use crate::value::{Extra, ValueError, ValueKind, number, parse_full, sign};

/// Duration Value defined in RFC 5545 Section 3.3.6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDuration {
    /// Date and Time Duration
    DateTime {
        /// Whether the duration is positive
        positive: bool,
        /// Day Duration
        day: u32,
        /// Hour Duration
        hour: u32,
        /// Minute Duration
        minute: u32,
        /// Second Duration
        second: u32,
    },

    /// Week Duration
    Week {
        /// Whether the duration is positive
        positive: bool,
        /// Week Duration
        week: u32,
    },
}

impl ValueDuration {
    /// Exact length in seconds, days count as 24 hours.
    #[must_use]
    pub fn as_seconds(&self) -> i64 {
        let (positive, abs) = match *self {
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => (
                positive,
                i64::from(day) * 86_400
                    + i64::from(hour) * 3_600
                    + i64::from(minute) * 60
                    + i64::from(second),
            ),
            ValueDuration::Week { positive, week } => (positive, i64::from(week) * 604_800),
        };
        if positive { abs } else { -abs }
    }

    /// Convert to `jiff::SignedDuration`.
    #[must_use]
    pub fn signed_duration(&self) -> jiff::SignedDuration {
        jiff::SignedDuration::from_secs(self.as_seconds())
    }

    /// Signed number of calendar days, weeks count as seven.
    ///
    /// Days are nominal: across a DST change a day is not 24 hours long.
    #[must_use]
    pub fn nominal_days(&self) -> i64 {
        let (positive, days) = match *self {
            ValueDuration::DateTime { positive, day, .. } => (positive, i64::from(day)),
            ValueDuration::Week { positive, week } => (positive, i64::from(week) * 7),
        };
        if positive { days } else { -days }
    }

    /// Signed exact part made of hours, minutes and seconds.
    #[must_use]
    pub fn exact_time(&self) -> jiff::SignedDuration {
        let secs = match *self {
            ValueDuration::DateTime {
                positive,
                hour,
                minute,
                second,
                ..
            } => {
                let abs = i64::from(hour) * 3_600 + i64::from(minute) * 60 + i64::from(second);
                if positive { abs } else { -abs }
            }
            ValueDuration::Week { .. } => 0,
        };
        jiff::SignedDuration::from_secs(secs)
    }
}

impl FromStr for ValueDuration {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_full(ValueKind::Duration, value_duration(), s)
    }
}

/// Format Definition:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
fn value_duration<'src>() -> impl Parser<'src, &'src str, ValueDuration, Extra<'src>> + Clone {
    let int = number(10, 0..=u32::MAX);

    let second = int.clone().then_ignore(just('S'));
    let minute = int.clone().then_ignore(just('M'));
    let hour = int.clone().then_ignore(just('H'));

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_part = minute
        .then(second.clone().or_not())
        .map(|(m, s)| (m, s.unwrap_or(0)));

    let time = just('T').ignore_then(choice((
        hour.then(minute_part.clone().or_not())
            .map(|(h, ms)| {
                let (m, s) = ms.unwrap_or((0, 0));
                (h, m, s)
            }),
        minute_part.map(|(m, s)| (0, m, s)),
        second.map(|s| (0, 0, s)),
    )));

    let date = int
        .clone()
        .then_ignore(just('D'))
        .then(time.clone().or_not())
        .map(|(day, time)| (day, time.unwrap_or((0, 0, 0))));

    let week = int.then_ignore(just('W'));

    sign()
        .then_ignore(just('P'))
        .then(choice((
            date.map(|(day, (h, m, s))| Body::DateTime(day, h, m, s)),
            time.map(|(h, m, s)| Body::DateTime(0, h, m, s)),
            week.map(Body::Week),
        )))
        .map(|(positive, body)| match body {
            Body::DateTime(day, hour, minute, second) => ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            },
            Body::Week(week) => ValueDuration::Week { positive, week },
        })
}

#[derive(Clone, Copy)]
enum Body {
    DateTime(u32, u32, u32, u32),
    Week(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration() {
        use ValueDuration::{DateTime, Week};

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.6
            ("P15DT5H0M20S", DateTime { positive: true, day: 15, hour: 5, minute: 0, second: 20 }),
            ("P7W",  Week { positive: true,  week: 7 }),
            // extra tests
            ("-P1W", Week { positive: false, week: 1 }),
            ("-PT10H11M12S", DateTime { positive: false, day: 0, hour: 10, minute: 11, second: 12 }),
            ("PT15M",        DateTime { positive: true,  day: 0, hour:  0, minute: 15, second:  0 }),
            ("+P1D",         DateTime { positive: true,  day: 1, hour:  0, minute:  0, second:  0 }),
        ];
        for (src, expected) in success_cases {
            assert_eq!(src.parse::<ValueDuration>().unwrap(), expected, "Failed to parse: {src}");
        }

        let fail_cases = ["P", "PT", "P3X", "P-3W", "P3DT4H5M6", "3W", "P10H"];
        for src in fail_cases {
            assert!(src.parse::<ValueDuration>().is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn converts_to_seconds() {
        let cases = [
            ("PT1H30M", 5_400),
            ("P1D", 86_400),
            ("P2W", 1_209_600),
            ("-PT15M", -900),
        ];
        for (src, expected) in cases {
            let duration: ValueDuration = src.parse().unwrap();
            assert_eq!(duration.as_seconds(), expected, "{src}");
        }
        let duration: ValueDuration = "PT45S".parse().unwrap();
        assert_eq!(duration.signed_duration(), jiff::SignedDuration::from_secs(45));

        let duration: ValueDuration = "-P2DT3H".parse().unwrap();
        assert_eq!(duration.nominal_days(), -2);
        assert_eq!(duration.exact_time(), jiff::SignedDuration::from_hours(-3));

        let duration: ValueDuration = "P2W".parse().unwrap();
        assert_eq!(duration.nominal_days(), 14);
        assert_eq!(duration.exact_time(), jiff::SignedDuration::ZERO);
    }
}
