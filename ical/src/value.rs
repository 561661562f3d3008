// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed property values as defined in RFC 5545 Section 3.3.
//!
//! Every value type implements [`FromStr`](std::str::FromStr) over the unfolded raw value
//! of a property, and rejects trailing input.

mod datetime;
mod duration;
mod rrule;
mod text;

use std::fmt;

use chumsky::prelude::*;

pub use crate::value::datetime::{ValueDate, ValueDateTime, ValueTime, ValueUtcOffset};
pub use crate::value::duration::ValueDuration;
pub use crate::value::rrule::{
    RecurrenceFrequency, RecurrenceUntil, ValueRecurrenceRule, WeekDay, WeekDayNum,
};
pub use crate::value::text::unescape_text;

pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// A raw property value that does not match its value type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value {raw:?}: {reason}")]
pub struct ValueError {
    /// Value type name, e.g. `DATE-TIME`
    pub kind: ValueKind,
    /// The offending raw value
    pub raw: String,
    /// What the parser expected
    pub reason: String,
}

/// Value types understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum ValueKind {
    Date,
    DateTime,
    Time,
    Duration,
    UtcOffset,
    Recur,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Date => "DATE",
            ValueKind::DateTime => "DATE-TIME",
            ValueKind::Time => "TIME",
            ValueKind::Duration => "DURATION",
            ValueKind::UtcOffset => "UTC-OFFSET",
            ValueKind::Recur => "RECUR",
        };
        f.write_str(s)
    }
}

/// Run a value parser against the whole input.
pub(crate) fn parse_full<'src, T>(
    kind: ValueKind,
    parser: impl Parser<'src, &'src str, T, Extra<'src>>,
    raw: &'src str,
) -> Result<T, ValueError> {
    parser
        .then_ignore(end())
        .parse(raw)
        .into_result()
        .map_err(|errs| ValueError {
            kind,
            raw: raw.to_string(),
            reason: errs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        })
}

/// Exactly `n` decimal digits.
pub(crate) fn digits<'src>(n: usize) -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .exactly(n)
        .collect::<String>()
        .try_map(|s, span| {
            lexical::parse::<u32, _>(&s).map_err(|_| Rich::custom(span, "expected digits"))
        })
}

/// Between one and `max` decimal digits, within `range`.
pub(crate) fn number<'src>(
    max: usize,
    range: std::ops::RangeInclusive<u32>,
) -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(max)
        .collect::<String>()
        .try_map(move |s, span| match lexical::parse::<u32, _>(&s) {
            Ok(v) if range.contains(&v) => Ok(v),
            Ok(v) => Err(Rich::custom(
                span,
                format!("{v} out of range {}..={}", range.start(), range.end()),
            )),
            Err(_) => Err(Rich::custom(span, "expected number")),
        })
}

/// Optional sign, `true` unless a `-` is present.
pub(crate) fn sign<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> + Clone {
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}
