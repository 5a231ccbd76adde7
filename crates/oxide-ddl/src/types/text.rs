//! Character types.

use super::{SqlType, positive_length, render_sized};
use crate::error::TypeError;
use crate::value::Value;

/// CHAR with an optional fixed length (one character when unset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Char {
    length: Option<u32>,
}

impl Char {
    /// Canonical type name.
    pub const NAME: &'static str = "CHAR";

    /// Creates an unsized CHAR.
    #[must_use]
    pub const fn new() -> Self {
        Self { length: None }
    }

    /// Creates a CHAR of the given length.
    pub fn with_length(length: u32) -> Result<Self, TypeError> {
        Ok(Self {
            length: Some(positive_length(Self::NAME, length)?),
        })
    }

    /// Returns the declared length.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.length
    }
}

impl SqlType for Char {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn to_sql(&self) -> String {
        render_sized(Self::NAME, self.length)
    }

    fn validate(&self, value: &Value) -> bool {
        value
            .as_text()
            .is_some_and(|s| s.chars().count() <= self.length.unwrap_or(1) as usize)
    }
}

/// VARCHAR with an optional maximum length (unbounded when unset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Varchar {
    length: Option<u32>,
}

impl Varchar {
    /// Canonical type name.
    pub const NAME: &'static str = "VARCHAR";

    /// Creates an unbounded VARCHAR.
    #[must_use]
    pub const fn new() -> Self {
        Self { length: None }
    }

    /// Creates a VARCHAR with a maximum length.
    pub fn with_length(length: u32) -> Result<Self, TypeError> {
        Ok(Self {
            length: Some(positive_length(Self::NAME, length)?),
        })
    }

    /// Returns the maximum length.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.length
    }
}

impl SqlType for Varchar {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn to_sql(&self) -> String {
        render_sized(Self::NAME, self.length)
    }

    fn validate(&self, value: &Value) -> bool {
        let Some(text) = value.as_text() else {
            return false;
        };
        match self.length {
            Some(length) => text.chars().count() <= length as usize,
            None => true,
        }
    }
}
