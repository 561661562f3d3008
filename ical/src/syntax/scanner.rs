// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! Errors are attached to the offending [`ContentLine`] instead of aborting the scan,
//! so that every malformed line of a document can be reported at once.

use std::iter::Peekable;

use crate::syntax::Span;
use crate::syntax::lexer::{SpannedToken, Token};

/// A scanned iCalendar content line, with folding already removed.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property name as written (e.g., "DTSTART", "summary")
    pub name: String,

    /// Property parameters (semicolon-separated)
    pub parameters: Vec<ScannedParameter>,

    /// Property value, everything after the first unquoted colon
    pub value: String,

    /// Span of the entire content line
    pub span: Span,

    /// Error information if scanning this line failed
    pub error: Option<ContentLineError>,
}

/// A scanned parameter from a content line.
///
/// Parameters have the format: `name=value` or `name=value1,"value 2"`
#[derive(Debug, Clone)]
pub struct ScannedParameter {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub name: String,

    /// Parameter values (comma-separated), with surrounding quotes removed
    pub values: Vec<String>,

    /// Span of the entire parameter
    pub span: Span,
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// Line does not start with a property name.
    #[error("missing property name at {span}")]
    MissingName {
        /// Span of the line
        span: Span,
    },

    /// Missing colon separator, e.g. `PROPNAME value`.
    #[error("missing colon in property at {expected_at}")]
    MissingColon {
        /// Span where colon was expected
        expected_at: Span,
    },

    /// Invalid parameter syntax.
    #[error("{kind} at {span}")]
    InvalidParameter {
        /// Span of the invalid parameter
        span: Span,
        /// Specific error details
        kind: ParameterErrorKind,
    },

    /// Character the lexer does not accept.
    #[error("invalid character at {span}")]
    InvalidCharacter {
        /// Span of the character
        span: Span,
    },
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterErrorKind {
    /// Missing equals sign, e.g. `TZID America/New_York`
    #[error("missing equals in parameter")]
    MissingEquals,

    /// Empty parameter name, e.g. `;=value`
    #[error("empty parameter name")]
    EmptyName,

    /// Unterminated quoted string, e.g. `PARAM="unclosed value`
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Result of scanning content lines.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// All scanned content lines (including ones with errors)
    pub lines: Vec<ContentLine>,

    /// Whether any errors were encountered
    pub has_errors: bool,
}

/// Scan a token stream into content lines.
///
/// Blank lines are skipped. The last line may omit its line break.
pub fn scan_content_lines<'src>(
    tokens: impl IntoIterator<Item = SpannedToken<'src>>,
) -> ScanResult {
    let mut tokens = tokens.into_iter().peekable();
    let mut lines = Vec::new();
    let mut has_errors = false;

    while let Some(&SpannedToken(token, _)) = tokens.peek() {
        if matches!(token, Token::Newline) {
            tokens.next();
            continue;
        }

        let line = scan_one_content_line(&mut tokens);
        has_errors |= line.error.is_some();
        lines.push(line);
    }

    ScanResult { lines, has_errors }
}

fn scan_one_content_line<'src, I>(tokens: &mut Peekable<I>) -> ContentLine
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut line = ContentLine {
        name: String::new(),
        parameters: Vec::new(),
        value: String::new(),
        span: tokens.peek().map(|t| t.1).unwrap_or_default(),
        error: None,
    };

    // name
    while let Some(&SpannedToken(Token::Word(text), span)) = tokens.peek() {
        line.name.push_str(text);
        line.span = line.span.union(span);
        tokens.next();
    }
    if line.name.is_empty() {
        line.error = Some(ContentLineError::MissingName { span: line.span });
        consume_until_newline(tokens, &mut line.span);
        return line;
    }

    // *(";" param)
    while let Some(&SpannedToken(Token::Semicolon, semi_span)) = tokens.peek() {
        tokens.next();
        match scan_parameter(tokens, semi_span) {
            Ok(param) => {
                line.span = line.span.union(param.span);
                line.parameters.push(param);
            }
            Err(kind) => {
                line.error = Some(ContentLineError::InvalidParameter {
                    span: semi_span,
                    kind,
                });
                consume_until_newline(tokens, &mut line.span);
                return line;
            }
        }
    }

    // ":"
    match tokens.peek() {
        Some(&SpannedToken(Token::Colon, span)) => {
            line.span = line.span.union(span);
            tokens.next();
        }
        Some(&SpannedToken(_, span)) => {
            line.error = Some(ContentLineError::MissingColon { expected_at: span });
            consume_until_newline(tokens, &mut line.span);
            return line;
        }
        None => {
            let at = Span::new(line.span.end, line.span.end);
            line.error = Some(ContentLineError::MissingColon { expected_at: at });
            return line;
        }
    }

    // value CRLF
    while let Some(SpannedToken(token, span)) = tokens.next() {
        line.span = line.span.union(span);
        match token {
            Token::Newline => break,
            Token::Error => {
                if line.error.is_none() {
                    line.error = Some(ContentLineError::InvalidCharacter { span });
                }
            }
            _ => line.value.push_str(token_text(token)),
        }
    }
    line
}

fn scan_parameter<'src, I>(
    tokens: &mut Peekable<I>,
    semi_span: Span,
) -> Result<ScannedParameter, ParameterErrorKind>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut span = semi_span;
    let mut name = String::new();
    while let Some(&SpannedToken(Token::Word(text), word_span)) = tokens.peek() {
        name.push_str(text);
        span = span.union(word_span);
        tokens.next();
    }
    if name.is_empty() {
        return Err(ParameterErrorKind::EmptyName);
    }

    match tokens.next() {
        Some(SpannedToken(Token::Equal, eq_span)) => span = span.union(eq_span),
        Some(_) | None => return Err(ParameterErrorKind::MissingEquals),
    }

    let mut values = Vec::new();
    loop {
        let value = scan_parameter_value(tokens, &mut span)?;
        values.push(value);

        match tokens.peek() {
            Some(&SpannedToken(Token::Comma, comma_span)) => {
                span = span.union(comma_span);
                tokens.next();
            }
            _ => break,
        }
    }

    Ok(ScannedParameter { name, values, span })
}

fn scan_parameter_value<'src, I>(
    tokens: &mut Peekable<I>,
    span: &mut Span,
) -> Result<String, ParameterErrorKind>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut value = String::new();

    if let Some(&SpannedToken(Token::DQuote, quote_span)) = tokens.peek() {
        *span = span.union(quote_span);
        tokens.next();
        loop {
            match tokens.next() {
                Some(SpannedToken(Token::DQuote, end_span)) => {
                    *span = span.union(end_span);
                    return Ok(value);
                }
                Some(SpannedToken(Token::Newline | Token::Error, _)) | None => {
                    return Err(ParameterErrorKind::UnterminatedQuote);
                }
                Some(SpannedToken(token, token_span)) => {
                    *span = span.union(token_span);
                    value.push_str(token_text(token));
                }
            }
        }
    }

    while let Some(&SpannedToken(token, token_span)) = tokens.peek() {
        match token {
            Token::Word(_) | Token::Symbol(_) | Token::UnicodeText(_) | Token::Equal => {
                *span = span.union(token_span);
                value.push_str(token_text(token));
                tokens.next();
            }
            _ => break,
        }
    }
    Ok(value)
}

fn consume_until_newline<'src, I>(tokens: &mut Peekable<I>, span: &mut Span)
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    for SpannedToken(token, token_span) in tokens.by_ref() {
        *span = span.union(token_span);
        if matches!(token, Token::Newline) {
            break;
        }
    }
}

fn token_text<'src>(token: Token<'src>) -> &'src str {
    match token {
        Token::DQuote => "\"",
        Token::Comma => ",",
        Token::Colon => ":",
        Token::Semicolon => ";",
        Token::Equal => "=",
        Token::Symbol(s) | Token::Word(s) | Token::UnicodeText(s) => s,
        Token::Newline | Token::Error => "",
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::syntax::tokenize;

    fn scan(src: &str) -> ScanResult {
        scan_content_lines(tokenize(src))
    }

    #[test]
    fn scans_simple_property() {
        let result = scan("SUMMARY:Team Meeting\r\n");
        assert!(!result.has_errors);
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].name, "SUMMARY");
        assert_eq!(result.lines[0].value, "Team Meeting");
    }

    #[test]
    fn scans_parameters_and_colons_in_value() {
        let result = scan("DTSTART;TZID=\"America/New_York\";VALUE=DATE-TIME:20250101T090000\r\n");
        assert!(!result.has_errors);
        let line = &result.lines[0];
        assert_eq!(line.parameters.len(), 2);
        assert_eq!(line.parameters[0].name, "TZID");
        assert_eq!(line.parameters[0].values, ["America/New_York"]);
        assert_eq!(line.parameters[1].values, ["DATE-TIME"]);
        assert_eq!(line.value, "20250101T090000");

        let result = scan("URL:https://example.com/a;b=c\r\n");
        assert_eq!(result.lines[0].value, "https://example.com/a;b=c");
    }

    #[test]
    fn scans_quoted_parameter_with_separators() {
        let result = scan("ATTENDEE;CN=\"Doe, John; Jr.\":mailto:j@example.com\r\n");
        assert!(!result.has_errors);
        let line = &result.lines[0];
        assert_eq!(line.parameters[0].values, ["Doe, John; Jr."]);
        assert_eq!(line.value, "mailto:j@example.com");
    }

    #[test]
    fn scans_multi_valued_parameter() {
        let result = scan("X-P;MEMBER=a,b,c:v\r\n");
        assert_eq!(result.lines[0].parameters[0].values, ["a", "b", "c"]);
    }

    #[test]
    fn joins_folded_value() {
        let result = scan("DESCRIPTION:This is a lo\r\n ng description\r\n\tthat wraps\r\n");
        assert_eq!(
            result.lines[0].value,
            "This is a long descriptionthat wraps"
        );
    }

    #[test]
    fn skips_blank_lines_and_accepts_missing_final_newline() {
        let result = scan("\r\nA:1\r\n\r\n\nB:2");
        assert!(!result.has_errors);
        let names: Vec<_> = result.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn reports_missing_colon_and_continues() {
        let result = scan("BROKEN LINE\r\nA:1\r\n");
        assert!(result.has_errors);
        assert_eq!(result.lines.len(), 2);
        assert!(matches!(
            result.lines[0].error,
            Some(ContentLineError::MissingColon { .. })
        ));
        assert!(result.lines[1].error.is_none());
    }

    #[test]
    fn accepts_empty_parameter_values() {
        let result = scan("ATTENDEE;CN=;X-TAG=\"\",b:mailto:x@y.z\r\n");
        assert!(!result.has_errors);
        let line = &result.lines[0];
        assert_eq!(line.parameters[0].name, "CN");
        assert_eq!(line.parameters[0].values, [""]);
        assert_eq!(line.parameters[1].values, ["", "b"]);
        assert_eq!(line.value, "mailto:x@y.z");
    }

    #[test]
    fn reports_parameter_errors() {
        let cases = [
            ("A;=x:1\r\n", ParameterErrorKind::EmptyName),
            ("A;TZID:1\r\n", ParameterErrorKind::MissingEquals),
            ("A;CN=\"open:1\r\n", ParameterErrorKind::UnterminatedQuote),
        ];
        for (src, expected) in cases {
            let result = scan(src);
            assert!(result.has_errors, "{src:?}");
            match &result.lines[0].error {
                Some(ContentLineError::InvalidParameter { kind, .. }) => {
                    assert_eq!(*kind, expected, "{src:?}");
                }
                other => panic!("unexpected error for {src:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn reports_missing_name() {
        let result = scan(":value\r\n");
        assert!(matches!(
            result.lines[0].error,
            Some(ContentLineError::MissingName { .. })
        ));
    }
}
