// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing component hierarchy from content lines.
//!
//! The tree builder uses a stack-based algorithm:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and add to parent component

use crate::component::{Component, Parameter, Property};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::Span;
use crate::syntax::scanner::ContentLine;

/// Build a component tree from scanned content lines.
///
/// Lines carrying a scan error are skipped, they are reported by the scanner.
/// Component, property and parameter names are upper-cased, values are kept verbatim.
#[must_use]
pub fn build_tree(lines: Vec<ContentLine>) -> TreeBuilderResult {
    let mut stack: Vec<Component> = Vec::new();
    let mut roots: Vec<Component> = Vec::new();
    let mut errors: Vec<TreeBuildError> = Vec::new();

    for line in lines {
        if line.error.is_some() {
            continue;
        }

        let is_begin = line.name.eq_ignore_ascii_case(KW_BEGIN);
        let is_end = line.name.eq_ignore_ascii_case(KW_END);
        if (is_begin || is_end) && !line.parameters.is_empty() {
            errors.push(TreeBuildError::BeginEndWithParameters {
                name: line.name.to_ascii_uppercase(),
                span: line.span,
            });
        }

        if is_begin {
            stack.push(Component {
                name: line.value.trim().to_ascii_uppercase(),
                properties: Vec::new(),
                children: Vec::new(),
                span: line.span,
            });
        } else if is_end {
            let end_name = line.value.trim().to_ascii_uppercase();
            let Some(mut component) = stack.pop() else {
                errors.push(TreeBuildError::UnmatchedEnd {
                    name: end_name,
                    span: line.span,
                });
                continue;
            };

            if component.name != end_name {
                errors.push(TreeBuildError::MismatchedNesting {
                    expected: component.name.clone(),
                    found: end_name,
                    span: line.span,
                });
            }

            component.span = component.span.union(line.span);
            match stack.last_mut() {
                Some(parent) => parent.children.push(component),
                None => roots.push(component),
            }
        } else if let Some(current) = stack.last_mut() {
            current.properties.push(Property {
                name: line.name.to_ascii_uppercase(),
                parameters: line
                    .parameters
                    .into_iter()
                    .map(|param| Parameter {
                        name: param.name.to_ascii_uppercase(),
                        values: param.values,
                    })
                    .collect(),
                value: line.value,
                span: line.span,
            });
        }
        // Properties outside of any component carry no meaning and are dropped.
    }

    // Any remaining components on stack are unmatched BEGINs
    for component in stack {
        errors.push(TreeBuildError::UnmatchedBegin {
            name: component.name,
            span: component.span,
        });
    }

    TreeBuilderResult { roots, errors }
}

/// Errors that can occur during tree building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeBuildError {
    /// Unmatched END (no corresponding BEGIN)
    #[error("unmatched END:{name} (no corresponding BEGIN) at {span}")]
    UnmatchedEnd {
        /// Component name that was being closed
        name: String,
        /// Span of the END line
        span: Span,
    },

    /// Unmatched BEGIN (component not closed)
    #[error("unmatched BEGIN:{name} (component not closed) at {span}")]
    UnmatchedBegin {
        /// Component name that was not closed
        name: String,
        /// Span of the BEGIN line
        span: Span,
    },

    /// Mismatched BEGIN/END names
    #[error("mismatched nesting: expected END:{expected}, found END:{found} at {span}")]
    MismatchedNesting {
        /// Expected component name
        expected: String,
        /// Actual component name found
        found: String,
        /// Span of the END line
        span: Span,
    },

    /// BEGIN or END line with parameters (not allowed per RFC 5545)
    #[error("{name} line with parameters (not allowed per RFC 5545) at {span}")]
    BeginEndWithParameters {
        /// BEGIN or END
        name: String,
        /// Span of the line
        span: Span,
    },
}

/// Result of building a tree.
#[derive(Debug, Clone)]
pub struct TreeBuilderResult {
    /// The root components (typically one VCALENDAR)
    pub roots: Vec<Component>,
    /// Errors encountered during tree building
    pub errors: Vec<TreeBuildError>,
}
