//! Numeric types: INTEGER, BIT, BOOLEAN and the decimal family.

use super::{SqlType, render_sized};
use crate::error::TypeError;
use crate::value::Value;

/// INTEGER with an optional display length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Integer {
    length: Option<u32>,
}

impl Integer {
    /// Canonical type name.
    pub const NAME: &'static str = "INTEGER";

    /// Creates an unsized INTEGER.
    #[must_use]
    pub const fn new() -> Self {
        Self { length: None }
    }

    /// Creates an INTEGER with a display length.
    pub fn with_length(length: u32) -> Result<Self, TypeError> {
        if length == 0 {
            return Err(TypeError::InvalidPrecision {
                type_name: Self::NAME.to_string(),
                precision: length,
            });
        }
        Ok(Self {
            length: Some(length),
        })
    }

    /// Returns the display length.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.length
    }
}

impl SqlType for Integer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn to_sql(&self) -> String {
        render_sized(Self::NAME, self.length)
    }

    /// Accepts integers whose digit count (sign excluded) fits the length.
    fn validate(&self, value: &Value) -> bool {
        let Value::Int(n) = value else {
            return false;
        };
        match self.length {
            Some(length) => digit_count(n.unsigned_abs()) <= length as usize,
            None => true,
        }
    }

    fn is_numeric(&self) -> bool {
        true
    }
}

fn digit_count(n: u64) -> usize {
    n.to_string().len()
}

/// BIT: accepts booleans and the integers 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bit;

impl Bit {
    /// Canonical type name.
    pub const NAME: &'static str = "BIT";

    /// Creates a BIT.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlType for Bit {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_) | Value::Int(0 | 1))
    }

    fn is_numeric(&self) -> bool {
        true
    }
}

/// BOOLEAN: accepts booleans only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boolean;

impl Boolean {
    /// Canonical type name.
    pub const NAME: &'static str = "BOOLEAN";

    /// Creates a BOOLEAN.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlType for Boolean {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn is_numeric(&self) -> bool {
        true
    }
}

// =============================================================================
// Decimal family
// =============================================================================

fn check_precision_scale(
    type_name: &str,
    precision: Option<u32>,
    scale: Option<u32>,
) -> Result<(), TypeError> {
    if precision == Some(0) {
        return Err(TypeError::InvalidPrecision {
            type_name: type_name.to_string(),
            precision: 0,
        });
    }
    if let Some(scale) = scale {
        match precision {
            Some(p) if scale < p => {}
            _ => {
                return Err(TypeError::InvalidScale {
                    type_name: type_name.to_string(),
                    scale,
                });
            }
        }
    }
    Ok(())
}

fn render_precision_scale(name: &str, precision: Option<u32>, scale: Option<u32>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) => format!("{name}({p}, {s})"),
        _ => render_sized(name, precision),
    }
}

/// Digit-count check on the default textual form of the value.
///
/// The decimal point and sign are not counted towards the precision. No
/// rounding happens: `4.351` has three fractional digits whatever the scale.
fn fits_precision_scale(value: &Value, precision: Option<u32>, scale: Option<u32>) -> bool {
    let Some(text) = value.numeric_text() else {
        return false;
    };
    let Some(precision) = precision else {
        return true;
    };

    let unsigned = text.trim_start_matches('-');
    let digits = unsigned.chars().filter(|c| *c != '.').count();
    if digits > precision as usize {
        return false;
    }

    match (scale, unsigned.find('.')) {
        (Some(scale), Some(pos)) => unsigned.len() - pos - 1 <= scale as usize,
        _ => true,
    }
}

macro_rules! decimal_type {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $ty {
            precision: Option<u32>,
            scale: Option<u32>,
        }

        impl $ty {
            /// Canonical type name.
            pub const NAME: &'static str = $name;

            /// Creates the type without size parameters.
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    precision: None,
                    scale: None,
                }
            }

            /// Creates the type with a precision.
            pub fn with_precision(precision: u32) -> Result<Self, TypeError> {
                Self::sized(Some(precision), None)
            }

            /// Creates the type with a precision and a scale lower than it.
            pub fn with_precision_and_scale(precision: u32, scale: u32) -> Result<Self, TypeError> {
                Self::sized(Some(precision), Some(scale))
            }

            /// Creates the type from optional size parameters.
            ///
            /// A scale requires a precision and must satisfy
            /// `0 <= scale < precision`.
            pub fn sized(precision: Option<u32>, scale: Option<u32>) -> Result<Self, TypeError> {
                check_precision_scale(Self::NAME, precision, scale)?;
                Ok(Self { precision, scale })
            }

            /// Returns the precision.
            #[must_use]
            pub const fn precision(&self) -> Option<u32> {
                self.precision
            }

            /// Returns the scale.
            #[must_use]
            pub const fn scale(&self) -> Option<u32> {
                self.scale
            }
        }

        impl SqlType for $ty {
            fn name(&self) -> &str {
                Self::NAME
            }

            fn to_sql(&self) -> String {
                render_precision_scale(Self::NAME, self.precision, self.scale)
            }

            fn validate(&self, value: &Value) -> bool {
                fits_precision_scale(value, self.precision, self.scale)
            }

            fn is_numeric(&self) -> bool {
                true
            }
        }
    };
}

decimal_type!(
    /// DECIMAL with optional precision and scale.
    Decimal,
    "DECIMAL"
);

decimal_type!(
    /// FLOAT with optional precision and scale.
    Float,
    "FLOAT"
);

decimal_type!(
    /// DOUBLE with optional precision and scale.
    Double,
    "DOUBLE"
);

decimal_type!(
    /// REAL with optional precision and scale.
    Real,
    "REAL"
);
