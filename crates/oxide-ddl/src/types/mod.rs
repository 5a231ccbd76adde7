//! SQL scalar type descriptors.
//!
//! Every type implements [`SqlType`]: it knows its canonical uppercase name,
//! renders itself (optionally parameterized, e.g. `DECIMAL(6, 2)`) and
//! validates literal values against its size parameters.
//!
//! The set is open. A new type only needs to implement the trait; the
//! [`TypeName`], [`positive_length`] and [`DatePattern`] helpers give it the
//! same validated name, size and pattern handling the built-in types use.
//!
//! ```rust
//! use oxide_ddl::types::{Decimal, Integer, SqlType};
//! use oxide_ddl::Value;
//!
//! let price = Decimal::with_precision_and_scale(6, 2).unwrap();
//! assert_eq!(price.to_sql(), "DECIMAL(6, 2)");
//!
//! let small = Integer::with_length(2).unwrap();
//! assert!(small.validate(&Value::Int(65)));
//! assert!(!small.validate(&Value::Int(100)));
//! ```

mod numeric;
mod temporal;
mod text;

use core::fmt;

pub use numeric::{Bit, Boolean, Decimal, Double, Float, Integer, Real};
pub use temporal::{Date, DatePattern, DateTime, TemporalType, Time};
pub use text::{Char, Varchar};

use crate::error::TypeError;
use crate::value::Value;

/// Capability set of a SQL scalar type.
pub trait SqlType: fmt::Debug + Send + Sync {
    /// The canonical uppercase type name.
    fn name(&self) -> &str;

    /// Renders the type as it appears in a column definition.
    fn to_sql(&self) -> String {
        self.name().to_string()
    }

    /// Returns true if `value` is a valid literal of this type.
    fn validate(&self, value: &Value) -> bool;

    /// Whether the type is numeric. Only numeric columns render an
    /// auto-increment keyword.
    fn is_numeric(&self) -> bool {
        false
    }
}

impl fmt::Display for dyn SqlType + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl<T: SqlType + ?Sized> SqlType for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn to_sql(&self) -> String {
        (**self).to_sql()
    }

    fn validate(&self, value: &Value) -> bool {
        (**self).validate(value)
    }

    fn is_numeric(&self) -> bool {
        (**self).is_numeric()
    }
}

/// A validated type name: non-blank, trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(String);

impl TypeName {
    /// Validates and normalizes a type name.
    pub fn new(name: &str) -> Result<Self, TypeError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidTypeName {
                name: name.to_string(),
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks a length parameter of a text-like type.
pub fn positive_length(type_name: &str, length: u32) -> Result<u32, TypeError> {
    if length == 0 {
        return Err(TypeError::InvalidTypeLength {
            type_name: type_name.to_string(),
            length,
        });
    }
    Ok(length)
}

/// Renders `NAME` or `NAME(size)`.
pub fn render_sized(name: &str, size: Option<u32>) -> String {
    match size {
        Some(n) => format!("{name}({n})"),
        None => name.to_string(),
    }
}
