#![allow(dead_code)]

use oxide_ddl::column::{AutoIncrement, Column};
use oxide_ddl::constraints::{
    ForeignKey, ForeignKeyConstraint, NamedConstraint, PrimaryKeyConstraint, UniqueConstraint,
};
use oxide_ddl::table::{Table, TableBuilder};
use oxide_ddl::types::{Char, Float, Integer, Varchar};

/// Employee columns declared with inline constraints only.
pub fn employee_inline() -> TableBuilder {
    Table::builder("Tabela")
        .column(
            "id",
            Column::builder(Integer::new())
                .primary_key()
                .auto_increment(AutoIncrement::Mysql)
                .build()
                .unwrap(),
        )
        .column("nome", Column::builder(Varchar::with_length(50).unwrap()).build().unwrap())
        .column("sobrenome", Column::builder(Varchar::new()).nullable().build().unwrap())
        .column(
            "cpf",
            Column::builder(Char::with_length(11).unwrap())
                .unique()
                .build()
                .unwrap(),
        )
        .column("salario", salary())
        .column(
            "id_setor",
            Column::builder(Integer::new())
                .foreign_key(ForeignKey::new("t_setor", "id").unwrap())
                .build()
                .unwrap(),
        )
}

/// The same employee columns, constrained through named constraints.
pub fn employee_named() -> TableBuilder {
    Table::builder("Tabela")
        .name("t_funcionario")
        .column(
            "id",
            Column::builder(Integer::new())
                .auto_increment(AutoIncrement::Mysql)
                .build()
                .unwrap(),
        )
        .column("nome", Column::builder(Varchar::with_length(50).unwrap()).build().unwrap())
        .column("sobrenome", Column::builder(Varchar::new()).nullable().build().unwrap())
        .column("cpf", Column::builder(Char::with_length(11).unwrap()).build().unwrap())
        .column("salario", salary())
        .column("id_setor", Column::builder(Integer::new()).build().unwrap())
        .constraints(employee_constraints())
}

pub fn employee_constraints() -> Vec<NamedConstraint> {
    vec![
        PrimaryKeyConstraint::new("pk_tabela", "id").unwrap().into(),
        UniqueConstraint::new("un_tabela_cpf", "cpf").unwrap().into(),
        ForeignKeyConstraint::new("fk_funcionario_setor", "id_setor", "t_setor", "id")
            .unwrap()
            .into(),
    ]
}

fn salary() -> Column {
    Column::builder(Float::with_precision_and_scale(7, 2).unwrap())
        .default(1212.78)
        .build()
        .unwrap()
}

pub const EMPLOYEE_COLUMNS: &str = "\tid INTEGER AUTO_INCREMENT NOT NULL,\n\
     \tnome VARCHAR(50) NOT NULL,\n\
     \tsobrenome VARCHAR,\n\
     \tcpf CHAR(11) NOT NULL UNIQUE,\n\
     \tsalario FLOAT(7, 2) NOT NULL DEFAULT 1212.78,\n\
     \tid_setor INTEGER NOT NULL";

/// Asserts the rendered SQL, printing both sides with visible tabs on failure.
pub fn assert_sql(actual: &str, expected: &str) {
    assert_eq!(
        actual,
        expected,
        "SQL mismatch.\n  Actual:\n{}\n  Expected:\n{}",
        actual.replace('\t', "→"),
        expected.replace('\t', "→")
    );
}
