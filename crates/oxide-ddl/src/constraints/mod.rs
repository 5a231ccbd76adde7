//! Table constraints.
//!
//! Two families exist. An unnamed [`ForeignKey`] is attached to a single
//! column and rendered inline in the `CREATE TABLE` body. Named constraints
//! ([`PrimaryKeyConstraint`], [`UniqueConstraint`], [`ForeignKeyConstraint`])
//! are declared at table level, mutate the columns they reference when the
//! table is built, and render as separate `ALTER TABLE ... ADD` statements.

mod foreign_key;
mod named;

use core::fmt;
use core::str::FromStr;

pub use foreign_key::{ForeignKey, ForeignKeyBuilder};
pub use named::{
    ForeignKeyConstraint, ForeignKeyConstraintBuilder, PrimaryKeyConstraint, UniqueConstraint,
};

use crate::error::{ConstraintError, UnknownActionError};
use crate::ident;

// =============================================================================
// Referential actions
// =============================================================================

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

impl FromStr for ForeignKeyAction {
    type Err = UnknownActionError;

    /// Parses a clause case-insensitively (`"cascade"`, `"SET NULL"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no action" => Ok(Self::NoAction),
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            "set null" => Ok(Self::SetNull),
            "set default" => Ok(Self::SetDefault),
            _ => Err(UnknownActionError(s.to_string())),
        }
    }
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Parses the optional ON DELETE and ON UPDATE clauses of a foreign key.
fn parse_actions(
    constraint: Option<&str>,
    on_delete: Option<&str>,
    on_update: Option<&str>,
) -> Result<(Option<ForeignKeyAction>, Option<ForeignKeyAction>), ConstraintError> {
    let on_delete = on_delete
        .map(|clause| {
            clause
                .parse::<ForeignKeyAction>()
                .map_err(|UnknownActionError(clause)| ConstraintError::InvalidOnDeleteClause {
                    constraint: constraint.map(str::to_string),
                    clause,
                })
        })
        .transpose()?;
    let on_update = on_update
        .map(|clause| {
            clause
                .parse::<ForeignKeyAction>()
                .map_err(|UnknownActionError(clause)| ConstraintError::InvalidOnUpdateClause {
                    constraint: constraint.map(str::to_string),
                    clause,
                })
        })
        .transpose()?;
    Ok((on_delete, on_update))
}

fn render_actions(
    on_delete: Option<ForeignKeyAction>,
    on_update: Option<ForeignKeyAction>,
) -> String {
    let mut sql = String::new();
    if let Some(action) = on_delete {
        sql.push_str(" ON DELETE ");
        sql.push_str(action.as_sql());
    }
    if let Some(action) = on_update {
        sql.push_str(" ON UPDATE ");
        sql.push_str(action.as_sql());
    }
    sql
}

// =============================================================================
// Column references
// =============================================================================

/// One column or an ordered list of columns referenced by a constraint.
///
/// Named constraints normalize their columns: names are lowercased and a
/// single-element list collapses to [`Columns::One`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// A single column.
    One(String),
    /// An ordered list of columns.
    Many(Vec<String>),
}

impl Columns {
    /// Returns the column names as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(name) => core::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if this is an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Returns true for the list form.
    #[must_use]
    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    /// Lowercases every name, checks it with `valid` and collapses a
    /// single-element list.
    fn normalize<E>(
        self,
        valid: impl Fn(&str) -> bool,
        invalid: impl Fn(String) -> E,
    ) -> Result<Self, E> {
        let check = |name: String| {
            if valid(&name) {
                Ok(ident::normalize(&name))
            } else {
                Err(invalid(name))
            }
        };
        match self {
            Self::One(name) => Ok(Self::One(check(name)?)),
            Self::Many(names) => {
                let mut names = names.into_iter().map(check).collect::<Result<Vec<_>, _>>()?;
                if names.len() == 1 {
                    Ok(Self::One(names.remove(0)))
                } else {
                    Ok(Self::Many(names))
                }
            }
        }
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_slice().join(", "))
    }
}

impl From<&str> for Columns {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for Columns {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<&[&str]> for Columns {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<Vec<&str>> for Columns {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

// =============================================================================
// Named constraint set
// =============================================================================

/// Any table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedConstraint {
    /// `CONSTRAINT name PRIMARY KEY (...)`.
    PrimaryKey(PrimaryKeyConstraint),
    /// `CONSTRAINT name UNIQUE (...)`.
    Unique(UniqueConstraint),
    /// `CONSTRAINT name FOREIGN KEY (...) REFERENCES ...`.
    ForeignKey(ForeignKeyConstraint),
}

impl NamedConstraint {
    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PrimaryKey(c) => c.name(),
            Self::Unique(c) => c.name(),
            Self::ForeignKey(c) => c.name(),
        }
    }

    /// Returns the local columns the constraint covers.
    #[must_use]
    pub fn columns(&self) -> &Columns {
        match self {
            Self::PrimaryKey(c) => c.columns(),
            Self::Unique(c) => c.columns(),
            Self::ForeignKey(c) => c.columns(),
        }
    }

    /// Renders the constraint as it follows `ADD` in `ALTER TABLE`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::PrimaryKey(c) => c.to_sql(),
            Self::Unique(c) => c.to_sql(),
            Self::ForeignKey(c) => c.to_sql(),
        }
    }
}

impl fmt::Display for NamedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<PrimaryKeyConstraint> for NamedConstraint {
    fn from(c: PrimaryKeyConstraint) -> Self {
        Self::PrimaryKey(c)
    }
}

impl From<UniqueConstraint> for NamedConstraint {
    fn from(c: UniqueConstraint) -> Self {
        Self::Unique(c)
    }
}

impl From<ForeignKeyConstraint> for NamedConstraint {
    fn from(c: ForeignKeyConstraint) -> Self {
        Self::ForeignKey(c)
    }
}
