// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::syntax::Span;

/// A parsed iCalendar component (e.g., VCALENDAR, VEVENT, VTIMEZONE)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component name, upper-cased
    pub name: String,
    /// Properties in original order
    pub properties: Vec<Property>,
    /// Nested child components
    pub children: Vec<Component>,
    /// Span of the entire component (from BEGIN to END)
    pub span: Span,
}

impl Component {
    /// Whether this component has the given name, ignoring case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|prop| prop.name.eq_ignore_ascii_case(name))
    }

    /// All properties with the given name, in document order.
    pub fn properties<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties
            .iter()
            .filter(move |prop| prop.name.eq_ignore_ascii_case(name))
    }

    /// First direct child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Component> {
        self.children.iter().find(|child| child.is(name))
    }

    /// Direct children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> + 'a {
        self.children.iter().filter(move |child| child.is(name))
    }

    /// All nested components with the given name, depth-first in document order.
    ///
    /// The component itself is not included.
    #[must_use]
    pub fn descendants_named(&self, name: &str) -> Vec<&Component> {
        let mut found = Vec::new();
        let mut stack: Vec<&Component> = self.children.iter().rev().collect();
        while let Some(comp) = stack.pop() {
            if comp.is(name) {
                found.push(comp);
            }
            stack.extend(comp.children.iter().rev());
        }
        found
    }
}

/// A parsed iCalendar property (name, parameters and raw value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name, upper-cased
    pub name: String,
    /// Property parameters (allow duplicates and multi-values)
    pub parameters: Vec<Parameter>,
    /// Unfolded raw value, escapes untouched
    pub value: String,
    /// Span of the content line
    pub span: Span,
}

impl Property {
    /// First value of the first parameter with the given name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|param| param.name.eq_ignore_ascii_case(name))
            .and_then(|param| param.values.first())
            .map(String::as_str)
    }
}

/// A parsed iCalendar parameter (e.g., `TZID=America/New_York`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, upper-cased
    pub name: String,
    /// Parameter values split by commas, with quotes removed
    pub values: Vec<String>,
}
