//! Column definitions.
//!
//! A [`Column`] pairs a [`SqlType`] with its modifiers. The column's name is
//! bound by the owning table, which also applies named constraints to it.
//!
//! ```rust
//! use oxide_ddl::column::{AutoIncrement, Column};
//! use oxide_ddl::types::{Float, Integer};
//!
//! let id = Column::builder(Integer::new())
//!     .primary_key()
//!     .auto_increment(AutoIncrement::Mysql)
//!     .build()
//!     .unwrap();
//! assert_eq!(id.to_sql(), "INTEGER AUTO_INCREMENT NOT NULL");
//!
//! let salary = Column::builder(Float::with_precision_and_scale(7, 2).unwrap())
//!     .default(1212.78)
//!     .build()
//!     .unwrap();
//! assert_eq!(salary.to_sql(), "FLOAT(7, 2) NOT NULL DEFAULT 1212.78");
//! ```

use core::fmt;
use core::str::FromStr;

use crate::constraints::{ForeignKey, ForeignKeyConstraint};
use crate::error::{ColumnError, ConstraintError};
use crate::types::SqlType;
use crate::value::Value;

// =============================================================================
// Auto-increment dialects
// =============================================================================

/// Dialect whose auto-increment keyword a column renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoIncrement {
    /// `IDENTITY(1, 1)`.
    Mssql,
    /// `AUTO_INCREMENT`.
    Mysql,
    /// `AUTO INCREMENT`.
    Sqlite,
    /// `SERIAL`.
    Postgree,
}

impl AutoIncrement {
    /// Returns the keyword rendered in the column definition.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Mssql => "IDENTITY(1, 1)",
            Self::Mysql => "AUTO_INCREMENT",
            Self::Sqlite => "AUTO INCREMENT",
            Self::Postgree => "SERIAL",
        }
    }
}

impl FromStr for AutoIncrement {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mssql" => Ok(Self::Mssql),
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            "postgree" => Ok(Self::Postgree),
            _ => Err(ColumnError::InvalidAutoIncrement {
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Column
// =============================================================================

/// The foreign key a column participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyRef<'a> {
    /// Declared inline on the column.
    Unnamed(&'a ForeignKey),
    /// Applied from a table-level constraint.
    Named(&'a ForeignKeyConstraint),
}

impl ForeignKeyRef<'_> {
    /// Returns the referenced table, lowercased.
    #[must_use]
    pub fn ref_table(&self) -> &str {
        match self {
            Self::Unnamed(fk) => fk.ref_table(),
            Self::Named(fk) => fk.ref_table(),
        }
    }

    /// Returns true for a table-level constraint.
    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

/// A table column.
#[derive(Debug)]
pub struct Column {
    name: Option<String>,
    data_type: Box<dyn SqlType>,
    foreign_key: Option<ForeignKey>,
    primary_key: bool,
    auto_increment: Option<AutoIncrement>,
    nullable: bool,
    unique: bool,
    default: Option<Value>,
    named_primary_key: bool,
    named_foreign_key: Option<ForeignKeyConstraint>,
    named_unique: bool,
    modifiers: String,
}

impl Column {
    /// Starts a column of the given type. Columns are NOT NULL unless
    /// [`ColumnBuilder::nullable`] is called.
    #[must_use]
    pub fn builder(data_type: impl SqlType + 'static) -> ColumnBuilder {
        ColumnBuilder {
            data_type: Box::new(data_type),
            foreign_key: None,
            primary_key: false,
            auto_increment: None,
            nullable: false,
            unique: false,
            default: None,
        }
    }

    /// Returns the bound name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the column type.
    #[must_use]
    pub fn data_type(&self) -> &dyn SqlType {
        self.data_type.as_ref()
    }

    /// Returns the unnamed foreign key if any, else the named one.
    #[must_use]
    pub fn foreign_key(&self) -> Option<ForeignKeyRef<'_>> {
        self.foreign_key
            .as_ref()
            .map(ForeignKeyRef::Unnamed)
            .or_else(|| self.named_foreign_key.as_ref().map(ForeignKeyRef::Named))
    }

    /// Returns the inline foreign key.
    #[must_use]
    pub fn unnamed_foreign_key(&self) -> Option<&ForeignKey> {
        self.foreign_key.as_ref()
    }

    /// Whether the column is a primary key, inline or named.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.primary_key || self.named_primary_key
    }

    /// Whether a named primary key was applied.
    #[must_use]
    pub fn is_primary_key_named(&self) -> bool {
        self.named_primary_key
    }

    /// Whether a named foreign key was applied.
    #[must_use]
    pub fn is_foreign_key_named(&self) -> bool {
        self.named_foreign_key.is_some()
    }

    /// Returns the auto-increment dialect.
    #[must_use]
    pub fn auto_increment(&self) -> Option<AutoIncrement> {
        self.auto_increment
    }

    /// Whether the column accepts NULL.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the column is unique, inline or named.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique || self.named_unique
    }

    /// Returns the default value.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Renders the column definition.
    ///
    /// The name is omitted until the column is bound to a table.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        if let Some(name) = &self.name {
            sql.push_str(name);
            sql.push(' ');
        }
        sql.push_str(&self.data_type.to_sql());
        if !self.modifiers.is_empty() {
            sql.push(' ');
            sql.push_str(&self.modifiers);
        }
        sql
    }

    /// Binds the name and attaches it to the inline foreign key.
    pub(crate) fn bind_name(&mut self, name: &str) -> Result<(), ConstraintError> {
        if let Some(fk) = self.foreign_key.as_mut() {
            fk.attach_column(name)?;
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    pub(crate) fn apply_named_primary_key(&mut self) {
        self.nullable = false;
        self.named_primary_key = true;
        self.modifiers = self.render_modifiers();
        // Set after rendering so the named key never prints UNIQUE.
        self.unique = true;
    }

    pub(crate) fn apply_named_foreign_key(
        &mut self,
        constraint: &ForeignKeyConstraint,
    ) -> Result<(), ColumnError> {
        if self.named_foreign_key.is_some() {
            return Err(ColumnError::AlreadyHasNamedForeignKey {
                column: self.name.clone().unwrap_or_default(),
            });
        }
        self.named_foreign_key = Some(constraint.clone());
        Ok(())
    }

    pub(crate) fn apply_named_unique(&mut self) -> Result<(), ColumnError> {
        if self.named_unique {
            return Err(ColumnError::AlreadyHasNamedUnique {
                column: self.name.clone().unwrap_or_default(),
            });
        }
        self.named_unique = true;
        Ok(())
    }

    fn render_modifiers(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(auto_increment) = self.auto_increment {
            if self.data_type.is_numeric() {
                parts.push(auto_increment.keyword().to_string());
            }
        }
        if !self.nullable {
            parts.push(String::from("NOT NULL"));
        }
        if self.unique && !self.primary_key {
            parts.push(String::from("UNIQUE"));
        }
        if let Some(default) = &self.default {
            parts.push(format!("DEFAULT {}", default.to_sql()));
        }
        parts.join(" ")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

// =============================================================================
// ColumnBuilder
// =============================================================================

/// Builder for [`Column`].
#[derive(Debug)]
pub struct ColumnBuilder {
    data_type: Box<dyn SqlType>,
    foreign_key: Option<ForeignKey>,
    primary_key: bool,
    auto_increment: Option<AutoIncrement>,
    nullable: bool,
    unique: bool,
    default: Option<Value>,
}

impl ColumnBuilder {
    /// Declares an inline foreign key.
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    /// Marks the column as PRIMARY KEY. Implies NOT NULL and UNIQUE.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Renders the dialect's auto-increment keyword on numeric columns.
    #[must_use]
    pub fn auto_increment(mut self, dialect: AutoIncrement) -> Self {
        self.auto_increment = Some(dialect);
        self
    }

    /// Allows NULL. Ignored on primary keys.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validates the default value and builds the column.
    pub fn build(self) -> Result<Column, ColumnError> {
        if let Some(default) = &self.default {
            if !self.data_type.validate(default) {
                return Err(ColumnError::InvalidDefaultValue {
                    data_type: self.data_type.to_sql(),
                    value: default.to_sql(),
                });
            }
        }

        let mut column = Column {
            name: None,
            data_type: self.data_type,
            foreign_key: self.foreign_key,
            primary_key: self.primary_key,
            auto_increment: self.auto_increment,
            nullable: self.nullable && !self.primary_key,
            unique: self.unique || self.primary_key,
            default: self.default,
            named_primary_key: false,
            named_foreign_key: None,
            named_unique: false,
            modifiers: String::new(),
        };
        column.modifiers = column.render_modifiers();
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bit, Boolean, Char, Date, Integer, Varchar};

    #[test]
    fn test_auto_increment_keywords() {
        assert_eq!("MSSQL".parse(), Ok(AutoIncrement::Mssql));
        assert_eq!("mysql".parse(), Ok(AutoIncrement::Mysql));
        assert_eq!(AutoIncrement::Sqlite.keyword(), "AUTO INCREMENT");
        assert_eq!(AutoIncrement::Postgree.keyword(), "SERIAL");
        assert!(matches!(
            "oracle".parse::<AutoIncrement>(),
            Err(ColumnError::InvalidAutoIncrement { .. })
        ));
    }

    #[test]
    fn test_default_column_is_not_null() {
        let col = Column::builder(Integer::new()).build().unwrap();
        assert_eq!(col.to_sql(), "INTEGER NOT NULL");
        assert!(!col.is_nullable());
        assert!(col.name().is_none());
    }

    #[test]
    fn test_nullable_column() {
        let col = Column::builder(Varchar::new()).nullable().build().unwrap();
        assert_eq!(col.to_sql(), "VARCHAR");
    }

    #[test]
    fn test_primary_key_overrides_nullable() {
        let col = Column::builder(Integer::new())
            .primary_key()
            .nullable()
            .unique()
            .build()
            .unwrap();
        assert!(!col.is_nullable());
        assert!(col.is_unique());
        assert_eq!(col.to_sql(), "INTEGER NOT NULL");
    }

    #[test]
    fn test_unique_column() {
        let col = Column::builder(Char::with_length(11).unwrap())
            .unique()
            .build()
            .unwrap();
        assert_eq!(col.to_sql(), "CHAR(11) NOT NULL UNIQUE");
    }

    #[test]
    fn test_auto_increment_only_on_numeric_types() {
        let mssql = Column::builder(Integer::new())
            .auto_increment(AutoIncrement::Mssql)
            .build()
            .unwrap();
        assert_eq!(mssql.to_sql(), "INTEGER IDENTITY(1, 1) NOT NULL");

        let bit = Column::builder(Bit::new())
            .auto_increment(AutoIncrement::Postgree)
            .build()
            .unwrap();
        assert_eq!(bit.to_sql(), "BIT SERIAL NOT NULL");

        let text = Column::builder(Varchar::new())
            .auto_increment(AutoIncrement::Mysql)
            .build()
            .unwrap();
        assert_eq!(text.to_sql(), "VARCHAR NOT NULL");
        assert_eq!(text.auto_increment(), Some(AutoIncrement::Mysql));
    }

    #[test]
    fn test_default_values() {
        let col = Column::builder(Varchar::with_length(10).unwrap())
            .default("n/a")
            .build()
            .unwrap();
        assert_eq!(col.to_sql(), "VARCHAR(10) NOT NULL DEFAULT 'n/a'");
        assert_eq!(col.default(), Some(&Value::from("n/a")));

        let err = Column::builder(Integer::with_length(2).unwrap())
            .default(100)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ColumnError::InvalidDefaultValue {
                data_type: "INTEGER(2)".into(),
                value: "100".into(),
            }
        );

        assert!(Column::builder(Date::new()).default("2023-13-01").build().is_err());
    }

    #[test]
    fn test_boolean_default_renders_sql_keyword() {
        let col = Column::builder(Boolean::new()).default(false).build().unwrap();
        assert_eq!(col.to_sql(), "BOOLEAN NOT NULL DEFAULT FALSE");
    }

    #[test]
    fn test_temporal_default_must_match_exactly() {
        for text in ["23-01-31", " 2023-01-31", "+2023-01-31"] {
            assert!(matches!(
                Column::builder(Date::new()).default(text).build(),
                Err(ColumnError::InvalidDefaultValue { .. })
            ));
        }
        let col = Column::builder(Date::new()).default("2023-01-31").build().unwrap();
        assert_eq!(col.to_sql(), "DATE NOT NULL DEFAULT '2023-01-31'");
    }

    #[test]
    fn test_bind_name_attaches_foreign_key() {
        let mut col = Column::builder(Integer::new())
            .foreign_key(ForeignKey::new("t_setor", "id").unwrap())
            .build()
            .unwrap();
        col.bind_name("id_setor").unwrap();
        assert_eq!(col.name(), Some("id_setor"));
        assert_eq!(col.to_sql(), "id_setor INTEGER NOT NULL");

        let fk = col.unnamed_foreign_key().unwrap();
        assert_eq!(fk.column(), Some("id_setor"));
        assert!(matches!(col.foreign_key(), Some(ForeignKeyRef::Unnamed(_))));
    }

    #[test]
    fn test_named_primary_key_does_not_render_unique() {
        let mut col = Column::builder(Integer::new()).nullable().build().unwrap();
        col.bind_name("id").unwrap();
        col.apply_named_primary_key();
        assert_eq!(col.to_sql(), "id INTEGER NOT NULL");
        assert!(col.is_primary_key());
        assert!(col.is_primary_key_named());
        assert!(col.is_unique());
    }

    #[test]
    fn test_named_unique_applies_once() {
        let mut col = Column::builder(Char::with_length(11).unwrap()).build().unwrap();
        col.bind_name("cpf").unwrap();
        col.apply_named_unique().unwrap();
        assert!(col.is_unique());
        assert_eq!(col.to_sql(), "cpf CHAR(11) NOT NULL");
        assert_eq!(
            col.apply_named_unique(),
            Err(ColumnError::AlreadyHasNamedUnique {
                column: "cpf".into()
            })
        );
    }

    #[test]
    fn test_named_foreign_key_applies_once() {
        let fk = ForeignKeyConstraint::new("fk_setor", "id_setor", "t_setor", "id").unwrap();
        let mut col = Column::builder(Integer::new()).build().unwrap();
        col.bind_name("id_setor").unwrap();
        col.apply_named_foreign_key(&fk).unwrap();
        assert!(col.is_foreign_key_named());
        assert!(matches!(col.foreign_key(), Some(ForeignKeyRef::Named(_))));
        assert!(matches!(
            col.apply_named_foreign_key(&fk),
            Err(ColumnError::AlreadyHasNamedForeignKey { .. })
        ));
    }

    #[test]
    fn test_unnamed_foreign_key_wins_accessor() {
        let named = ForeignKeyConstraint::new("fk_other", "ref_id", "other", "id").unwrap();
        let mut col = Column::builder(Integer::new())
            .foreign_key(ForeignKey::new("t_setor", "id").unwrap())
            .build()
            .unwrap();
        col.bind_name("ref_id").unwrap();
        col.apply_named_foreign_key(&named).unwrap();

        let fk = col.foreign_key().unwrap();
        assert!(!fk.is_named());
        assert_eq!(fk.ref_table(), "t_setor");
    }
}
