//! Named (table-level) constraints.

use super::{Columns, ForeignKeyAction, parse_actions, render_actions};
use crate::error::ConstraintError;
use crate::ident;

fn constraint_name(name: &str) -> Result<String, ConstraintError> {
    if !ident::is_name(name) {
        return Err(ConstraintError::InvalidConstraintName {
            name: name.to_string(),
        });
    }
    Ok(ident::normalize(name))
}

fn local_columns(
    constraint: &str,
    columns: Columns,
    valid: fn(&str) -> bool,
) -> Result<Columns, ConstraintError> {
    let columns = columns.normalize(valid, |column| {
        ConstraintError::InvalidColumnName {
            constraint: constraint.to_string(),
            column,
        }
    })?;
    if columns.is_empty() {
        return Err(ConstraintError::InvalidColumnName {
            constraint: constraint.to_string(),
            column: String::new(),
        });
    }
    Ok(columns)
}

/// Length of a column list, or `None` for a single column. One-element
/// lists count as a single column.
fn list_len(columns: &Columns) -> Option<usize> {
    match columns {
        Columns::Many(names) if names.len() != 1 => Some(names.len()),
        _ => None,
    }
}

// =============================================================================
// PRIMARY KEY
// =============================================================================

/// `CONSTRAINT <name> PRIMARY KEY (<columns>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyConstraint {
    name: String,
    columns: Columns,
}

impl PrimaryKeyConstraint {
    /// Creates a primary key over one or more columns.
    pub fn new(name: &str, columns: impl Into<Columns>) -> Result<Self, ConstraintError> {
        let name = constraint_name(name)?;
        let columns = local_columns(&name, columns.into(), ident::is_identifier)?;
        Ok(Self { name, columns })
    }

    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the covered columns.
    #[must_use]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Renders the constraint.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("CONSTRAINT {} PRIMARY KEY ({})", self.name, self.columns)
    }
}

// =============================================================================
// UNIQUE
// =============================================================================

/// `CONSTRAINT <name> UNIQUE (<column>)`. Single column only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint {
    name: String,
    columns: Columns,
}

impl UniqueConstraint {
    /// Creates a unique constraint on one column. List input is rejected.
    pub fn new(name: &str, column: impl Into<Columns>) -> Result<Self, ConstraintError> {
        let name = constraint_name(name)?;
        let column = column.into();
        if column.is_many() {
            return Err(ConstraintError::InvalidColumnType { constraint: name });
        }
        let columns = local_columns(&name, column, ident::is_name)?;
        Ok(Self { name, columns })
    }

    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the covered column.
    #[must_use]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Renders the constraint.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("CONSTRAINT {} UNIQUE ({})", self.name, self.columns)
    }
}

// =============================================================================
// FOREIGN KEY
// =============================================================================

/// `CONSTRAINT <name> FOREIGN KEY (<columns>) REFERENCES <TABLE>(<columns>)`.
///
/// Local and referenced columns pair up by position, so both sides must be
/// single columns or lists of the same length.
///
/// ```rust
/// use oxide_ddl::constraints::ForeignKeyConstraint;
///
/// let fk = ForeignKeyConstraint::builder(
///     "fk_item",
///     ["order_id", "line"],
///     "orders",
///     ["id", "line"],
/// )
/// .on_delete("cascade")
/// .build()
/// .unwrap();
/// assert_eq!(
///     fk.to_sql(),
///     "CONSTRAINT fk_item FOREIGN KEY (order_id, line) REFERENCES ORDERS(id, line) ON DELETE CASCADE"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    name: String,
    columns: Columns,
    ref_table: String,
    ref_columns: Columns,
    on_delete: Option<ForeignKeyAction>,
    on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyConstraint {
    /// Creates a foreign key without referential actions.
    pub fn new(
        name: &str,
        columns: impl Into<Columns>,
        ref_table: &str,
        ref_columns: impl Into<Columns>,
    ) -> Result<Self, ConstraintError> {
        Self::builder(name, columns, ref_table, ref_columns).build()
    }

    /// Starts a foreign key with referential actions.
    #[must_use]
    pub fn builder<'a>(
        name: &'a str,
        columns: impl Into<Columns>,
        ref_table: &'a str,
        ref_columns: impl Into<Columns>,
    ) -> ForeignKeyConstraintBuilder<'a> {
        ForeignKeyConstraintBuilder {
            name,
            columns: columns.into(),
            ref_table,
            ref_columns: ref_columns.into(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the local columns.
    #[must_use]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Returns the referenced table, lowercased.
    #[must_use]
    pub fn ref_table(&self) -> &str {
        &self.ref_table
    }

    /// Returns the referenced columns.
    #[must_use]
    pub fn ref_columns(&self) -> &Columns {
        &self.ref_columns
    }

    /// Returns the ON DELETE action.
    #[must_use]
    pub fn on_delete(&self) -> Option<ForeignKeyAction> {
        self.on_delete
    }

    /// Returns the ON UPDATE action.
    #[must_use]
    pub fn on_update(&self) -> Option<ForeignKeyAction> {
        self.on_update
    }

    /// Renders the constraint.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({}){}",
            self.name,
            self.columns,
            self.ref_table.to_uppercase(),
            self.ref_columns,
            render_actions(self.on_delete, self.on_update)
        )
    }
}

/// Builder for [`ForeignKeyConstraint`].
#[derive(Debug, Clone)]
pub struct ForeignKeyConstraintBuilder<'a> {
    name: &'a str,
    columns: Columns,
    ref_table: &'a str,
    ref_columns: Columns,
    on_delete: Option<&'a str>,
    on_update: Option<&'a str>,
}

impl<'a> ForeignKeyConstraintBuilder<'a> {
    /// Sets the ON DELETE clause.
    #[must_use]
    pub fn on_delete(mut self, clause: &'a str) -> Self {
        self.on_delete = Some(clause);
        self
    }

    /// Sets the ON UPDATE clause.
    #[must_use]
    pub fn on_update(mut self, clause: &'a str) -> Self {
        self.on_update = Some(clause);
        self
    }

    /// Validates and builds the constraint.
    pub fn build(self) -> Result<ForeignKeyConstraint, ConstraintError> {
        let name = constraint_name(self.name)?;
        let columns = local_columns(&name, self.columns, ident::is_identifier)?;

        if !ident::is_identifier(self.ref_table) {
            return Err(ConstraintError::InvalidRefTable {
                constraint: Some(name),
                ref_table: self.ref_table.to_string(),
            });
        }
        let ref_table = ident::normalize(self.ref_table);

        match (list_len(&columns), list_len(&self.ref_columns)) {
            (None, None) => {}
            (None, Some(_)) => {
                return Err(ConstraintError::RefColumnMustBeStr { constraint: name });
            }
            (Some(_), None) => {
                return Err(ConstraintError::RefColumnMustBeList { constraint: name });
            }
            (Some(local), Some(referenced)) => {
                if local != referenced {
                    return Err(ConstraintError::RefColumnLengthMismatch {
                        constraint: name,
                        columns: local,
                        ref_columns: referenced,
                    });
                }
            }
        }

        let ref_columns = self.ref_columns.normalize(ident::is_identifier, |ref_column| {
            ConstraintError::InvalidRefColumn {
                constraint: Some(name.clone()),
                ref_table: ref_table.clone(),
                ref_column,
            }
        })?;

        let (on_delete, on_update) = parse_actions(Some(&name), self.on_delete, self.on_update)?;

        Ok(ForeignKeyConstraint {
            name,
            columns,
            ref_table,
            ref_columns,
            on_delete,
            on_update,
        })
    }
}
