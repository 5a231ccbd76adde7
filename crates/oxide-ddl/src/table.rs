//! Tables and their `CREATE TABLE` rendering.
//!
//! A [`Table`] is assembled by a [`TableBuilder`], either directly or
//! through a type implementing [`TableModel`]. Building binds column names,
//! validates the named constraints against those columns and applies them
//! in a fixed order: primary keys, then foreign keys, then unique
//! constraints.
//!
//! # Example
//!
//! ```rust
//! use oxide_ddl::column::{AutoIncrement, Column};
//! use oxide_ddl::table::Table;
//! use oxide_ddl::types::{Integer, Varchar};
//!
//! let table = Table::builder("T")
//!     .column(
//!         "id",
//!         Column::builder(Integer::new())
//!             .primary_key()
//!             .auto_increment(AutoIncrement::Mysql)
//!             .build()
//!             .unwrap(),
//!     )
//!     .column("name", Column::builder(Varchar::with_length(50).unwrap()).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     table.to_sql(),
//!     "CREATE TABLE T (\n\tid INTEGER AUTO_INCREMENT NOT NULL,\n\tname VARCHAR(50) NOT NULL,\n\n\tPRIMARY KEY (id)\n);"
//! );
//! ```

use core::fmt;

use tracing::debug;

use crate::column::Column;
use crate::constraints::NamedConstraint;
use crate::error::{Result, TableError};
use crate::ident;

// =============================================================================
// Options
// =============================================================================

/// Per-table rendering and registration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    /// Render `CREATE TABLE IF NOT EXISTS`.
    pub create_if_not_exists: bool,
    /// Keep the table out of a [`Schema`](crate::schema::Schema).
    pub test: bool,
}

// =============================================================================
// Table
// =============================================================================

/// A table with bound columns and applied named constraints.
#[derive(Debug)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    constraints: Vec<NamedConstraint>,
    options: TableOptions,
}

impl Table {
    /// Starts a table whose default name is `type_ident` uppercased.
    #[must_use]
    pub fn builder(type_ident: &str) -> TableBuilder {
        TableBuilder {
            type_ident: type_ident.to_string(),
            name: None,
            columns: Vec::new(),
            constraints: Vec::new(),
            options: TableOptions::default(),
        }
    }

    /// Returns the uppercased table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by its lowercased name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == Some(name))
    }

    /// Returns every primary key column, inline or named.
    #[must_use]
    pub fn primary_key(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key()).collect()
    }

    /// Returns the named constraints in declaration order.
    #[must_use]
    pub fn named_constraints(&self) -> &[NamedConstraint] {
        &self.constraints
    }

    /// Returns the table options.
    #[must_use]
    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// Whether the table is kept out of schemas.
    #[must_use]
    pub fn is_test(&self) -> bool {
        self.options.test
    }

    /// Renders the `CREATE TABLE` statement followed by one
    /// `ALTER TABLE ... ADD` statement per named constraint.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let inline = self.inline_constraints();

        let mut sql = String::from("CREATE TABLE ");
        if self.options.create_if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.name);
        sql.push_str(" (\n\t");
        sql.push_str(
            &self
                .columns
                .iter()
                .map(Column::to_sql)
                .collect::<Vec<_>>()
                .join(",\n\t"),
        );
        if !inline.is_empty() {
            sql.push_str(",\n\n\t");
            sql.push_str(&inline);
        }
        sql.push_str("\n);");

        for constraint in &self.constraints {
            sql.push_str(&format!(
                "\n\nALTER TABLE {}\n\tADD {};",
                self.name,
                constraint.to_sql()
            ));
        }
        sql
    }

    fn inline_constraints(&self) -> String {
        let pk_columns: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.is_primary_key() && !c.is_primary_key_named())
            .filter_map(Column::name)
            .collect();

        let fk_clauses: Vec<String> = self
            .columns
            .iter()
            .filter(|c| !c.is_foreign_key_named())
            .filter_map(|c| Some(c.unnamed_foreign_key()?.render(c.name()?)))
            .collect();

        let mut parts = Vec::with_capacity(fk_clauses.len() + 1);
        if !pk_columns.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", pk_columns.join(", ")));
        }
        parts.extend(fk_clauses);
        parts.join(",\n\t")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

// =============================================================================
// TableBuilder
// =============================================================================

/// Builder for [`Table`].
#[derive(Debug)]
pub struct TableBuilder {
    type_ident: String,
    name: Option<String>,
    columns: Vec<(String, Column)>,
    constraints: Vec<NamedConstraint>,
    options: TableOptions,
}

impl TableBuilder {
    /// Overrides the table name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Adds a column. Declaration order is rendering order.
    #[must_use]
    pub fn column(mut self, name: &str, column: Column) -> Self {
        self.columns.push((name.to_string(), column));
        self
    }

    /// Adds a named constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: impl Into<NamedConstraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Adds several named constraints.
    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = NamedConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Renders `IF NOT EXISTS`.
    #[must_use]
    pub fn create_if_not_exists(mut self) -> Self {
        self.options.create_if_not_exists = true;
        self
    }

    /// Keeps the table out of schemas.
    #[must_use]
    pub fn test(mut self) -> Self {
        self.options.test = true;
        self
    }

    /// Replaces all options.
    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the table and applies its named constraints.
    pub fn build(self) -> Result<Table> {
        let name = self.resolve_name()?;

        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len());
        for (column_name, mut column) in self.columns {
            if !ident::is_identifier(&column_name) {
                return Err(TableError::InvalidColumnName {
                    table: name,
                    column: column_name,
                }
                .into());
            }
            let column_name = ident::normalize(&column_name);
            if columns.iter().any(|c| c.name() == Some(column_name.as_str())) {
                return Err(TableError::DuplicateColumn {
                    table: name,
                    column: column_name,
                }
                .into());
            }
            column.bind_name(&column_name)?;
            columns.push(column);
        }

        let mut table = Table {
            name,
            columns,
            constraints: self.constraints,
            options: self.options,
        };
        table.check_constraints()?;
        table.apply_constraints()?;

        debug!(
            table = %table.name,
            columns = table.columns.len(),
            constraints = table.constraints.len(),
            "Built table"
        );
        Ok(table)
    }

    fn resolve_name(&self) -> Result<String> {
        let name = self.name.as_deref().unwrap_or(&self.type_ident);
        if !ident::is_name(name.trim()) {
            return Err(TableError::InvalidName {
                name: name.to_string(),
            }
            .into());
        }
        Ok(name.trim().to_uppercase())
    }
}

impl Table {
    fn check_constraints(&self) -> Result<()> {
        let primary_keys = self
            .constraints
            .iter()
            .filter(|c| matches!(c, NamedConstraint::PrimaryKey(_)))
            .count();
        if primary_keys > 1 {
            return Err(TableError::MultiplePrimaryKeyConstraints {
                table: self.name.clone(),
            }
            .into());
        }

        for constraint in &self.constraints {
            let all_exist = constraint
                .columns()
                .as_slice()
                .iter()
                .all(|name| self.column(name).is_some());
            if !all_exist {
                return Err(TableError::InvalidNamedConstraint {
                    table: self.name.clone(),
                    constraint: constraint.name().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn apply_constraints(&mut self) -> Result<()> {
        let Self {
            name: table,
            columns,
            constraints,
            ..
        } = self;

        for constraint in constraints.iter() {
            if let NamedConstraint::PrimaryKey(pk) = constraint {
                for column in matching(&mut columns[..], pk.columns().as_slice()) {
                    column.apply_named_primary_key();
                }
                debug!(table = %table, constraint = %pk.name(), "Applied primary key");
            }
        }
        for constraint in constraints.iter() {
            if let NamedConstraint::ForeignKey(fk) = constraint {
                for column in matching(&mut columns[..], fk.columns().as_slice()) {
                    column.apply_named_foreign_key(fk)?;
                }
                debug!(table = %table, constraint = %fk.name(), "Applied foreign key");
            }
        }
        for constraint in constraints.iter() {
            if let NamedConstraint::Unique(unique) = constraint {
                for column in matching(&mut columns[..], unique.columns().as_slice()) {
                    column.apply_named_unique()?;
                }
                debug!(table = %table, constraint = %unique.name(), "Applied unique constraint");
            }
        }
        Ok(())
    }
}

fn matching<'a>(
    columns: &'a mut [Column],
    names: &'a [String],
) -> impl Iterator<Item = &'a mut Column> + 'a {
    columns
        .iter_mut()
        .filter(move |c| c.name().is_some_and(|n| names.iter().any(|x| x == n)))
}

// =============================================================================
// TableModel
// =============================================================================

/// A Rust type that declares a table.
///
/// The table name defaults to the type's identifier, uppercased, and can be
/// overridden with [`TableModel::TABLE_NAME`].
///
/// ```rust
/// use oxide_ddl::column::Column;
/// use oxide_ddl::constraints::{NamedConstraint, PrimaryKeyConstraint};
/// use oxide_ddl::table::TableModel;
/// use oxide_ddl::types::Integer;
///
/// struct Sector;
///
/// impl TableModel for Sector {
///     fn columns() -> oxide_ddl::Result<Vec<(&'static str, Column)>> {
///         Ok(vec![("id", Column::builder(Integer::new()).build()?)])
///     }
///
///     fn constraints() -> oxide_ddl::Result<Vec<NamedConstraint>> {
///         Ok(vec![PrimaryKeyConstraint::new("pk_sector", "id")?.into()])
///     }
/// }
///
/// let table = Sector::table().unwrap();
/// assert_eq!(table.name(), "SECTOR");
/// assert!(table.column("id").unwrap().is_primary_key_named());
/// ```
pub trait TableModel {
    /// Overrides the derived table name.
    const TABLE_NAME: Option<&'static str> = None;

    /// Declares the columns in rendering order.
    fn columns() -> Result<Vec<(&'static str, Column)>>;

    /// Declares the named constraints.
    fn constraints() -> Result<Vec<NamedConstraint>> {
        Ok(Vec::new())
    }

    /// Builds the table with default options.
    fn table() -> Result<Table> {
        Self::table_with(TableOptions::default())
    }

    /// Builds the table with the given options.
    fn table_with(options: TableOptions) -> Result<Table> {
        let mut builder = Table::builder(type_ident::<Self>()).options(options);
        if let Some(name) = Self::TABLE_NAME {
            builder = builder.name(name);
        }
        for (name, column) in Self::columns()? {
            builder = builder.column(name, column);
        }
        builder.constraints(Self::constraints()?).build()
    }
}

/// Last path segment of a type name, without generic arguments.
fn type_ident<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
