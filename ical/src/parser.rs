// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::component::Component;
use crate::syntax::{ContentLineError, TreeBuildError, build_tree, scan_content_lines, tokenize};

/// Parse an iCalendar document into its root components.
///
/// Both CRLF and bare LF line endings are accepted.
///
/// ## Errors
/// Every malformed content line and every nesting error is reported. A document
/// without any component is an error as well.
pub fn parse(src: &str) -> Result<Vec<Component>, Vec<ParseError>> {
    let scanned = scan_content_lines(tokenize(src));
    let mut errors: Vec<ParseError> = scanned
        .lines
        .iter()
        .filter_map(|line| line.error.clone())
        .map(ParseError::ContentLine)
        .collect();

    let tree = build_tree(scanned.lines);
    errors.extend(tree.errors.into_iter().map(ParseError::Tree));

    if !errors.is_empty() {
        return Err(errors);
    }
    if tree.roots.is_empty() {
        return Err(vec![ParseError::Empty]);
    }
    Ok(tree.roots)
}

/// Error during parsing iCalendar document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Malformed content line
    #[error("{0}")]
    ContentLine(#[from] ContentLineError),

    /// Broken component nesting
    #[error("{0}")]
    Tree(#[from] TreeBuildError),

    /// No component in the document
    #[error("document contains no component")]
    Empty,
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn parses_minimal_calendar() {
        let roots = parse("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n").unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "VCALENDAR");
    }

    #[test]
    fn collects_all_errors() {
        let errs = parse("BEGIN:VCALENDAR\r\nBROKEN\r\nBEGIN:VEVENT\r\nEND:VCALENDAR\r\n")
            .unwrap_err();
        assert!(errs.iter().any(|e| matches!(e, ParseError::ContentLine(_))));
        assert!(errs.iter().any(|e| matches!(e, ParseError::Tree(_))));
    }

    #[test]
    fn rejects_empty_document() {
        assert_eq!(parse("").unwrap_err(), [ParseError::Empty]);
        assert_eq!(parse("\r\n\r\n").unwrap_err(), [ParseError::Empty]);
    }
}
