//! Unnamed (inline) foreign keys.

use super::{ForeignKeyAction, parse_actions, render_actions};
use crate::error::ConstraintError;
use crate::ident;

/// A foreign key declared on a column and rendered inside `CREATE TABLE`.
///
/// The local column is unknown until the owning table binds the column's
/// name, so rendering a detached foreign key fails.
///
/// ```rust
/// use oxide_ddl::constraints::ForeignKey;
///
/// let mut fk = ForeignKey::builder("T_Setor", "ID")
///     .on_delete("cascade")
///     .build()
///     .unwrap();
/// assert!(fk.to_sql().is_err());
///
/// fk.attach_column("id_setor").unwrap();
/// assert_eq!(
///     fk.to_sql().unwrap(),
///     "FOREIGN KEY (id_setor) REFERENCES T_SETOR(id) ON DELETE CASCADE"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    ref_table: String,
    ref_column: String,
    on_delete: Option<ForeignKeyAction>,
    on_update: Option<ForeignKeyAction>,
    column: Option<String>,
}

impl ForeignKey {
    /// Creates a foreign key referencing `ref_table(ref_column)`.
    pub fn new(ref_table: &str, ref_column: &str) -> Result<Self, ConstraintError> {
        Self::builder(ref_table, ref_column).build()
    }

    /// Starts a foreign key with referential actions.
    #[must_use]
    pub fn builder<'a>(ref_table: &'a str, ref_column: &'a str) -> ForeignKeyBuilder<'a> {
        ForeignKeyBuilder {
            ref_table,
            ref_column,
            on_delete: None,
            on_update: None,
        }
    }

    /// Returns the referenced table, lowercased.
    #[must_use]
    pub fn ref_table(&self) -> &str {
        &self.ref_table
    }

    /// Returns the referenced column, lowercased.
    #[must_use]
    pub fn ref_column(&self) -> &str {
        &self.ref_column
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

    /// Returns the local column once attached.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Sets the local column name.
    pub fn attach_column(&mut self, name: &str) -> Result<(), ConstraintError> {
        if !ident::is_name(name) {
            return Err(ConstraintError::InvalidAddedColumnName {
                column: name.to_string(),
            });
        }
        self.column = Some(name.to_string());
        Ok(())
    }

    /// Renders the inline clause.
    pub fn to_sql(&self) -> Result<String, ConstraintError> {
        let column = self
            .column
            .as_deref()
            .ok_or_else(|| ConstraintError::MissingColumnName {
                ref_table: self.ref_table.clone(),
                ref_column: self.ref_column.clone(),
            })?;
        Ok(self.render(column))
    }

    /// Renders the clause for `column` regardless of attachment.
    pub(crate) fn render(&self, column: &str) -> String {
        format!(
            "FOREIGN KEY ({column}) REFERENCES {}({}){}",
            self.ref_table.to_uppercase(),
            self.ref_column,
            render_actions(self.on_delete, self.on_update)
        )
    }
}

/// Builder for [`ForeignKey`].
#[derive(Debug, Clone)]
pub struct ForeignKeyBuilder<'a> {
    ref_table: &'a str,
    ref_column: &'a str,
    on_delete: Option<&'a str>,
    on_update: Option<&'a str>,
}

impl<'a> ForeignKeyBuilder<'a> {
    /// Sets the ON DELETE clause (`cascade`, `set null`, `set default`,
    /// `no action` or `restrict`, any case).
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

    /// Validates and builds the foreign key.
    pub fn build(self) -> Result<ForeignKey, ConstraintError> {
        if !ident::is_identifier(self.ref_table) {
            return Err(ConstraintError::InvalidRefTable {
                constraint: None,
                ref_table: self.ref_table.to_string(),
            });
        }
        if !ident::is_identifier(self.ref_column) {
            return Err(ConstraintError::InvalidRefColumn {
                constraint: None,
                ref_table: self.ref_table.to_string(),
                ref_column: self.ref_column.to_string(),
            });
        }
        let (on_delete, on_update) = parse_actions(None, self.on_delete, self.on_update)?;

        Ok(ForeignKey {
            ref_table: ident::normalize(self.ref_table),
            ref_column: ident::normalize(self.ref_column),
            on_delete,
            on_update,
            column: None,
        })
    }
}
