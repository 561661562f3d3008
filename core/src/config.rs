// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::timezone::ResolvedTimezone;

/// The name of the application.
pub const APP_NAME: &str = "icsnorm";

/// Configuration of the import pipeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zone applied when the document carries no zone information, UTC if unset.
    pub default_timezone: Option<String>,

    /// If false, records are emitted without shape validation.
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timezone: None,
            validate: true,
        }
    }
}

impl Config {
    /// Zone used for documents without `X-WR-TIMEZONE` or VTIMEZONE.
    #[must_use]
    pub fn fallback_timezone(&self) -> ResolvedTimezone {
        match self.default_timezone.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ResolvedTimezone::from_identifier(id),
            _ => ResolvedTimezone::neutral(),
        }
    }
}
