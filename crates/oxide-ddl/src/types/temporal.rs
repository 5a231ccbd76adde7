//! Date and time types.
//!
//! Values are validated by parsing them with a strftime-style pattern. The
//! built-in types use fixed patterns; [`TemporalType`] lets callers declare
//! their own named type with a custom pattern.

use std::sync::LazyLock;

use chrono::format::{self, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

use super::{SqlType, TypeName};
use crate::error::TypeError;
use crate::value::Value;

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[A-Za-z]").expect("valid directive regex"));

/// Width of the text each directive may consume.
fn directive_shape(directive: char) -> &'static str {
    match directive {
        'Y' => r"\d{4}",
        'y' | 'm' | 'd' | 'H' | 'I' | 'M' | 'S' | 'U' | 'W' => r"\d{1,2}",
        'j' => r"\d{1,3}",
        'f' => r"\d{1,6}",
        'w' | 'u' => r"\d",
        'z' => r"(?:[+-]\d{2}:?\d{2}|Z)",
        '%' => "%",
        _ => r"\S+?",
    }
}

/// Builds an anchored regex describing the text a pattern accepts.
///
/// chrono accepts signed or short years and skips whitespace before numeric
/// fields, so the shape is checked before parsing.
fn pattern_shape(pattern: &str) -> Option<Regex> {
    let mut shape = String::from("(?i)^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '%' => shape.push_str(directive_shape(chars.next()?)),
            c if c.is_whitespace() => {
                while chars.next_if(|next| next.is_whitespace()).is_some() {}
                shape.push_str(r"\s+");
            }
            c => shape.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    shape.push('$');
    Regex::new(&shape).ok()
}

/// Returns true if `text` parses against `pattern`.
///
/// Full date, datetime and time parses are tried first so that calendar
/// errors (`2023-02-30`, `25:00:00`) are rejected. Patterns that describe
/// only part of a date (`%Y-%m`) fall back to a field-level parse. Leap
/// seconds are rejected.
fn matches_pattern(pattern: &str, text: &str) -> bool {
    if !pattern_shape(pattern).is_some_and(|shape| shape.is_match(text)) {
        return false;
    }

    let attempts = [
        NaiveDateTime::parse_from_str(text, pattern).map(|dt| dt.time()),
        NaiveDate::parse_from_str(text, pattern).map(|_| NaiveTime::MIN),
        NaiveTime::parse_from_str(text, pattern),
    ];

    if let Some(time) = attempts.iter().flatten().next() {
        return time.nanosecond() < 1_000_000_000;
    }
    let incomplete = attempts
        .iter()
        .all(|attempt| matches!(attempt, Err(e) if e.kind() == ParseErrorKind::NotEnough));
    if !incomplete {
        return false;
    }

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(pattern)).is_ok()
        && parsed.second().is_none_or(|second| second < 60)
}

/// A validated strftime-style date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatePattern(String);

impl DatePattern {
    /// Validates a pattern for the named type.
    ///
    /// The pattern must contain at least one `%<letter>` directive.
    pub fn new(type_name: &str, pattern: &str) -> Result<Self, TypeError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || !DIRECTIVE.is_match(trimmed) {
            return Err(TypeError::InvalidDatePattern {
                type_name: type_name.to_string(),
                pattern: pattern.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `text` parses against this pattern.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        matches_pattern(&self.0, text)
    }
}

macro_rules! temporal_type {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $pattern:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $ty;

        impl $ty {
            /// Canonical type name.
            pub const NAME: &'static str = $name;

            /// Pattern accepted by [`SqlType::validate`].
            pub const PATTERN: &'static str = $pattern;

            /// Creates the type.
            #[must_use]
            pub const fn new() -> Self {
                Self
            }
        }

        impl SqlType for $ty {
            fn name(&self) -> &str {
                Self::NAME
            }

            fn validate(&self, value: &Value) -> bool {
                value
                    .as_text()
                    .is_some_and(|text| matches_pattern(Self::PATTERN, text))
            }
        }
    };
}

temporal_type!(
    /// DATE, validated as `YYYY-MM-DD`.
    Date,
    "DATE",
    "%Y-%m-%d"
);

temporal_type!(
    /// DATETIME, validated as `YYYY-MM-DD HH:MM:SS`.
    DateTime,
    "DATETIME",
    "%Y-%m-%d %H:%M:%S"
);

temporal_type!(
    /// TIME, validated as `HH:MM:SS`.
    Time,
    "TIME",
    "%H:%M:%S"
);

/// A user-named date-family type with its own pattern.
///
/// ```rust
/// use oxide_ddl::types::{SqlType, TemporalType};
/// use oxide_ddl::Value;
///
/// let month = TemporalType::new("year_month", "%Y-%m").unwrap();
/// assert_eq!(month.to_sql(), "YEAR_MONTH");
/// assert!(month.validate(&Value::from("2024-06")));
/// assert!(!month.validate(&Value::from("2024-13")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalType {
    name: TypeName,
    pattern: DatePattern,
}

impl TemporalType {
    /// Creates a type from a name and a pattern.
    pub fn new(name: &str, pattern: &str) -> Result<Self, TypeError> {
        let name = TypeName::new(name)?;
        let pattern = DatePattern::new(name.as_str(), pattern)?;
        Ok(Self { name, pattern })
    }

    /// Returns the validation pattern.
    #[must_use]
    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }
}

impl SqlType for TemporalType {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn validate(&self, value: &Value) -> bool {
        value.as_text().is_some_and(|text| self.pattern.matches(text))
    }
}
