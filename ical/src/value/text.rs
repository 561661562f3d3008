// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text value as defined in RFC 5545 Section 3.3.11.

use chumsky::prelude::*;

use crate::value::Extra;

/// Resolve the escapes of a TEXT value.
///
/// ```txt
/// ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
/// ```
///
/// Unknown escapes keep the escaped character and a trailing backslash is kept as is.
#[must_use]
pub fn unescape_text(raw: &str) -> String {
    value_text()
        .parse(raw)
        .into_output()
        .unwrap_or_else(|| raw.to_string())
}

fn value_text<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> {
    let escape = just('\\').ignore_then(choice((
        just('n').to('\n'),
        just('N').to('\n'),
        any(),
    )));

    choice((escape, any())).repeated().collect()
}
