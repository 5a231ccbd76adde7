//! Ordered collection of tables rendered together.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::table::{Table, TableModel};

/// An append-only, insertion-ordered set of tables.
///
/// Test tables are never registered.
#[derive(Debug, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table. Returns false if the table is a test table and
    /// was skipped.
    pub fn add(&mut self, table: Table) -> bool {
        if table.is_test() {
            debug!(table = %table.name(), "Skipping test table");
            return false;
        }
        if self.table(table.name()).is_some() {
            warn!(table = %table.name(), "Table name already registered");
        }
        debug!(table = %table.name(), position = self.tables.len(), "Registered table");
        self.tables.push(table);
        true
    }

    /// Builds `T`'s table with default options and registers it.
    pub fn create<T: TableModel>(&mut self) -> Result<()> {
        self.add(T::table()?);
        Ok(())
    }

    /// Returns the registered tables in insertion order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Returns the first table with the given (uppercased) name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Returns the number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Renders every table, separated by a blank line, or `None` when empty.
    #[must_use]
    pub fn to_sql(&self) -> Option<String> {
        if self.tables.is_empty() {
            return None;
        }
        Some(
            self.tables
                .iter()
                .map(Table::to_sql)
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    }

    /// Writes the rendered schema to `writer`. An empty schema writes nothing.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        if let Some(sql) = self.to_sql() {
            writer.write_all(sql.as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the rendered schema to a UTF-8 file, replacing its contents.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!(
            path = %path.display(),
            tables = self.tables.len(),
            "Saving schema"
        );
        fs::write(path, self.to_sql().unwrap_or_default())?;
        Ok(())
    }
}
