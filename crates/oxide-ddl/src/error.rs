//! Error types for schema definition.
//!
//! Every validator fails at the call that introduced the bad value, so each
//! component gets its own error enum. Operations that cross components
//! (building a table, saving a schema) return the crate-level [`Error`].

use thiserror::Error;

/// Errors raised while constructing SQL type descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The type name is empty or blank.
    #[error("invalid SQL type name: {name:?}")]
    InvalidTypeName {
        /// The rejected name.
        name: String,
    },

    /// A length parameter of a text type is out of range.
    #[error("the given length of {type_name} type is invalid: {length}")]
    InvalidTypeLength {
        /// The type being constructed.
        type_name: String,
        /// The rejected length.
        length: u32,
    },

    /// A precision parameter of a numeric type is out of range.
    #[error("the given precision of {type_name} type is invalid: {precision}")]
    InvalidPrecision {
        /// The type being constructed.
        type_name: String,
        /// The rejected precision.
        precision: u32,
    },

    /// A scale was given without a precision, or is not lower than it.
    #[error("the given scale of {type_name} type is invalid: {scale}")]
    InvalidScale {
        /// The type being constructed.
        type_name: String,
        /// The rejected scale.
        scale: u32,
    },

    /// A date pattern has no format directive.
    #[error("the date pattern of {type_name} type is invalid: {pattern:?}")]
    InvalidDatePattern {
        /// The type being constructed.
        type_name: String,
        /// The rejected pattern.
        pattern: String,
    },
}

/// Errors raised while constructing or rendering constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The constraint name is not an identifier.
    #[error("the given value is an invalid constraint name: {name:?}")]
    InvalidConstraintName {
        /// The rejected name.
        name: String,
    },

    /// A column name of a named constraint is not an identifier.
    #[error("the given value for {constraint} constraint is an invalid column name: {column:?}")]
    InvalidColumnName {
        /// Owning constraint.
        constraint: String,
        /// The rejected column name.
        column: String,
    },

    /// A single-column constraint received a column list.
    #[error("the {constraint} constraint accepts a single column, not a list")]
    InvalidColumnType {
        /// Owning constraint.
        constraint: String,
    },

    /// The referenced table is not an identifier.
    #[error("invalid referenced table{}: {ref_table:?}", owner(.constraint))]
    InvalidRefTable {
        /// Owning constraint, `None` for an unnamed foreign key.
        constraint: Option<String>,
        /// The rejected table name.
        ref_table: String,
    },

    /// A referenced column is not an identifier.
    #[error("invalid referenced column{}: {ref_table}.{ref_column:?}", owner(.constraint))]
    InvalidRefColumn {
        /// Owning constraint, `None` for an unnamed foreign key.
        constraint: Option<String>,
        /// The referenced table.
        ref_table: String,
        /// The rejected column name.
        ref_column: String,
    },

    /// The constraint covers several columns but references a single one.
    #[error("the ref_column parameter of {constraint} constraint must be a list")]
    RefColumnMustBeList {
        /// Owning constraint.
        constraint: String,
    },

    /// The constraint covers one column but references a list.
    #[error("the ref_column parameter of {constraint} constraint must be a single column")]
    RefColumnMustBeStr {
        /// Owning constraint.
        constraint: String,
    },

    /// Column and referenced column lists differ in length.
    #[error(
        "the ref_column list of {constraint} constraint has {ref_columns} columns \
         but the column list has {columns}"
    )]
    RefColumnLengthMismatch {
        /// Owning constraint.
        constraint: String,
        /// Number of local columns.
        columns: usize,
        /// Number of referenced columns.
        ref_columns: usize,
    },

    /// The ON DELETE clause is not one of the supported actions.
    #[error("invalid ON DELETE clause{}: {clause:?}", owner(.constraint))]
    InvalidOnDeleteClause {
        /// Owning constraint, `None` for an unnamed foreign key.
        constraint: Option<String>,
        /// The rejected clause.
        clause: String,
    },

    /// The ON UPDATE clause is not one of the supported actions.
    #[error("invalid ON UPDATE clause{}: {clause:?}", owner(.constraint))]
    InvalidOnUpdateClause {
        /// Owning constraint, `None` for an unnamed foreign key.
        constraint: Option<String>,
        /// The rejected clause.
        clause: String,
    },

    /// An invalid column name was attached to an unnamed foreign key.
    #[error("added an invalid column name in FOREIGN KEY constraint: {column:?}")]
    InvalidAddedColumnName {
        /// The rejected column name.
        column: String,
    },

    /// An unnamed foreign key was rendered before being attached to a column.
    #[error("missing column name in FOREIGN KEY constraint for {ref_table}.{ref_column}")]
    MissingColumnName {
        /// The referenced table.
        ref_table: String,
        /// The referenced column.
        ref_column: String,
    },
}

/// A referential action keyword outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown referential action: {0:?} \
     (expected one of 'cascade', 'set null', 'set default', 'no action', 'restrict')"
)]
pub struct UnknownActionError(pub String);

fn owner(constraint: &Option<String>) -> String {
    constraint
        .as_ref()
        .map(|name| format!(" for {name} constraint"))
        .unwrap_or_default()
}

/// Errors raised while constructing or annotating columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// The auto-increment dialect is unknown.
    #[error(
        "invalid auto_increment parameter: {value:?} \
         (expected one of 'mssql', 'mysql', 'sqlite', 'postgree')"
    )]
    InvalidAutoIncrement {
        /// The rejected dialect keyword.
        value: String,
    },

    /// The default value does not satisfy the column's type.
    #[error("the given default value {value} isn't a valid {data_type} data")]
    InvalidDefaultValue {
        /// Rendered column type.
        data_type: String,
        /// Rendered default value.
        value: String,
    },

    /// A second named foreign key targeted the same column.
    #[error("the {column} column already has a named foreign key constraint")]
    AlreadyHasNamedForeignKey {
        /// The column name.
        column: String,
    },

    /// A second named unique constraint targeted the same column.
    #[error("the {column} column already has a named unique constraint")]
    AlreadyHasNamedUnique {
        /// The column name.
        column: String,
    },
}

/// Errors raised while assembling a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table name is not an identifier.
    #[error("the given value is an invalid table name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A column name is not an identifier.
    #[error("the {table} table has an invalid column name: {column:?}")]
    InvalidColumnName {
        /// Table name.
        table: String,
        /// The rejected column name.
        column: String,
    },

    /// Two columns share a name.
    #[error("the {table} table declares the {column} column more than once")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// The duplicated column name.
        column: String,
    },

    /// More than one named primary key constraint was declared.
    #[error("the {table} table has multiple primary key constraints")]
    MultiplePrimaryKeyConstraints {
        /// Table name.
        table: String,
    },

    /// A named constraint references a column the table doesn't have.
    #[error("the {constraint} constraint references a column that doesn't exist in the {table} table")]
    InvalidNamedConstraint {
        /// Table name.
        table: String,
        /// The offending constraint.
        constraint: String,
    },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// SQL type error.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Constraint error.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// Column error.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// Table error.
    #[error(transparent)]
    Table(#[from] TableError),

    /// IO error while writing generated SQL.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
