// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use icsnorm_ical::{ParseError, ValueError};

/// Failure of a whole import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document is not well-formed iCalendar.
    #[error("malformed calendar: {}", ParseErrors(.0))]
    Parse(Vec<ParseError>),

    /// The document has no VCALENDAR component.
    #[error("no VCALENDAR component found")]
    NoCalendar,
}

struct ParseErrors<'a>(&'a [ParseError]);

impl fmt::Display for ParseErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Why an event was left out of the import.
#[derive(Debug, thiserror::Error)]
pub enum DropReason {
    /// No DTSTART property.
    #[error("missing DTSTART")]
    MissingStart,

    /// DTSTART could not be parsed.
    #[error("invalid DTSTART")]
    InvalidStart(#[source] ValueError),

    /// DTEND could not be parsed.
    #[error("invalid DTEND")]
    InvalidEnd(#[source] ValueError),

    /// DURATION could not be parsed.
    #[error("invalid DURATION")]
    InvalidDuration(#[source] ValueError),

    /// RRULE could not be parsed.
    #[error("invalid RRULE")]
    InvalidRule(#[source] ValueError),

    /// A time value does not map to an instant.
    #[error("{property} cannot be converted to an instant")]
    Unmaterializable {
        /// Name of the offending property
        property: &'static str,
        /// Underlying conversion error
        source: jiff::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_errors() {
        let err = icsnorm_ical::parse("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\n").unwrap_err();
        let count = err.len();
        let msg = ImportError::Parse(err).to_string();
        assert!(msg.starts_with("malformed calendar: "));
        assert_eq!(msg.matches("; ").count(), count - 1);
    }

    #[test]
    fn formats_drop_reasons() {
        let err = "2025".parse::<icsnorm_ical::ValueDateTime>().unwrap_err();
        let detail = err.to_string();
        let reason = DropReason::InvalidStart(err);
        assert_eq!(reason.to_string(), "invalid DTSTART");

        // the cause is reported once, through the source chain
        let source = std::error::Error::source(&reason).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some(detail.as_str()));
        assert_eq!(DropReason::MissingStart.to_string(), "missing DTSTART");
    }
}
