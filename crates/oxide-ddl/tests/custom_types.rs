//! Types defined outside the crate.

mod common;

use common::assert_sql;
use oxide_ddl::column::{AutoIncrement, Column};
use oxide_ddl::error::{ColumnError, TypeError};
use oxide_ddl::table::Table;
use oxide_ddl::types::{SqlType, TemporalType, TypeName, positive_length, render_sized};
use oxide_ddl::Value;

#[derive(Debug)]
struct NewTextType {
    name: TypeName,
    length: Option<u32>,
}

impl NewTextType {
    fn new(length: Option<u32>) -> Result<Self, TypeError> {
        let name = TypeName::new("newtexttype")?;
        let length = length
            .map(|n| positive_length(name.as_str(), n))
            .transpose()?;
        Ok(Self { name, length })
    }
}

impl SqlType for NewTextType {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn to_sql(&self) -> String {
        render_sized(self.name(), self.length)
    }

    fn validate(&self, value: &Value) -> bool {
        value.as_text().is_some()
    }
}

#[test]
fn test_custom_type_renders_like_builtins() {
    assert_eq!(NewTextType::new(None).unwrap().to_sql(), "NEWTEXTTYPE");
    assert_eq!(NewTextType::new(Some(20)).unwrap().to_sql(), "NEWTEXTTYPE(20)");
    assert!(matches!(
        NewTextType::new(Some(0)),
        Err(TypeError::InvalidTypeLength { .. })
    ));
}

#[test]
fn test_custom_type_in_table() {
    let table = Table::builder("documento")
        .column(
            "codigo",
            Column::builder(NewTextType::new(Some(20)).unwrap())
                .auto_increment(AutoIncrement::Mssql)
                .default("abc")
                .build()
                .unwrap(),
        )
        .column(
            "ano",
            Column::builder(TemporalType::new("year", "%Y").unwrap())
                .nullable()
                .build()
                .unwrap(),
        )
        .test()
        .build()
        .unwrap();
    assert_sql(
        &table.to_sql(),
        "CREATE TABLE DOCUMENTO (\n\
         \tcodigo NEWTEXTTYPE(20) NOT NULL DEFAULT 'abc',\n\
         \tano YEAR\n);",
    );
}

#[test]
fn test_custom_type_default_is_validated() {
    let err = Column::builder(NewTextType::new(None).unwrap())
        .default(10)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ColumnError::InvalidDefaultValue {
            data_type: "NEWTEXTTYPE".into(),
            value: "10".into(),
        }
    );
}

#[test]
fn test_invalid_custom_names_and_patterns() {
    assert!(matches!(
        TemporalType::new("", "%Y"),
        Err(TypeError::InvalidTypeName { .. })
    ));
    assert!(matches!(
        TemporalType::new("newdatetype", "aaa"),
        Err(TypeError::InvalidDatePattern { .. })
    ));
}
