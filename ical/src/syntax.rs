// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer of the parser, as defined in RFC 5545 section 3.1.
//!
//! ```text
//! Source Text → Lexer → Token Stream → Scanner → Content Lines → Tree Builder → Components
//! ```
//!
//! No value is interpreted here, every property value stays as unfolded text.

mod lexer;
mod scanner;
mod tree_builder;

use std::fmt;

pub use crate::syntax::lexer::{SpannedToken, Token, tokenize};
pub use crate::syntax::scanner::{
    ContentLine, ContentLineError, ParameterErrorKind, ScanResult, ScannedParameter,
    scan_content_lines,
};
pub use crate::syntax::tree_builder::{TreeBuildError, TreeBuilderResult, build_tree};

/// Byte range in the source text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset, inclusive
    pub start: usize,
    /// End offset, exclusive
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Merge two spans into one covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<logos::Span> for Span {
    fn from(span: logos::Span) -> Self {
        Self::new(span.start, span.end)
    }
}
