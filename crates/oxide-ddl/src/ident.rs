//! Identifier validation.
//!
//! Two shapes are accepted: references to other tables and columns may start
//! with an underscore, names this crate emits itself (tables, constraints,
//! attached columns) must start with a letter.

use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid identifier regex"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("valid name regex"));

/// Returns true if `value` is a SQL identifier (letter or underscore first).
#[must_use]
pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}

/// Returns true if `value` is a name that starts with a letter.
#[must_use]
pub fn is_name(value: &str) -> bool {
    NAME.is_match(value)
}

/// Trims and lowercases an identifier.
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
