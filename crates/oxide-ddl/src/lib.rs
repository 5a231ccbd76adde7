//! # oxide-ddl
//!
//! A declarative generator for SQL `CREATE TABLE` and `ALTER TABLE`
//! statements.
//!
//! Tables are described as in-memory values: typed columns with modifiers,
//! inline foreign keys and named table-level constraints. Everything is
//! validated when it is constructed, and rendering is deterministic down to
//! the tab indentation, so the output is stable enough for snapshot tests.
//!
//! ## Declaring a table
//!
//! ```rust
//! use oxide_ddl::column::{AutoIncrement, Column};
//! use oxide_ddl::constraints::ForeignKey;
//! use oxide_ddl::table::TableModel;
//! use oxide_ddl::types::{Char, Integer, Varchar};
//! use oxide_ddl::{Result, Schema};
//!
//! struct Employee;
//!
//! impl TableModel for Employee {
//!     const TABLE_NAME: Option<&'static str> = Some("t_employee");
//!
//!     fn columns() -> Result<Vec<(&'static str, Column)>> {
//!         Ok(vec![
//!             (
//!                 "id",
//!                 Column::builder(Integer::new())
//!                     .primary_key()
//!                     .auto_increment(AutoIncrement::Mysql)
//!                     .build()?,
//!             ),
//!             ("name", Column::builder(Varchar::with_length(50)?).build()?),
//!             ("cpf", Column::builder(Char::with_length(11)?).unique().build()?),
//!             (
//!                 "sector_id",
//!                 Column::builder(Integer::new())
//!                     .foreign_key(ForeignKey::new("t_sector", "id")?)
//!                     .build()?,
//!             ),
//!         ])
//!     }
//! }
//!
//! let mut schema = Schema::new();
//! schema.create::<Employee>().unwrap();
//!
//! assert_eq!(
//!     schema.to_sql().unwrap(),
//!     "CREATE TABLE T_EMPLOYEE (\n\
//!      \tid INTEGER AUTO_INCREMENT NOT NULL,\n\
//!      \tname VARCHAR(50) NOT NULL,\n\
//!      \tcpf CHAR(11) NOT NULL UNIQUE,\n\
//!      \tsector_id INTEGER NOT NULL,\n\n\
//!      \tPRIMARY KEY (id),\n\
//!      \tFOREIGN KEY (sector_id) REFERENCES T_SECTOR(id)\n);"
//! );
//! ```
//!
//! ## Named constraints
//!
//! Named constraints are rendered after the `CREATE TABLE` statement as
//! `ALTER TABLE ... ADD CONSTRAINT ...` and annotate the columns they
//! reference, so an inline `PRIMARY KEY (...)` clause is not emitted for a
//! column covered by a named primary key.

pub mod column;
pub mod constraints;
pub mod error;
pub mod ident;
pub mod schema;
pub mod table;
pub mod types;
pub mod value;

pub use column::{AutoIncrement, Column, ColumnBuilder};
pub use constraints::{
    Columns, ForeignKey, ForeignKeyAction, ForeignKeyConstraint, NamedConstraint,
    PrimaryKeyConstraint, UniqueConstraint,
};
pub use error::{ColumnError, ConstraintError, Error, Result, TableError, TypeError};
pub use schema::Schema;
pub use table::{Table, TableBuilder, TableModel, TableOptions};
pub use types::SqlType;
pub use value::Value;
