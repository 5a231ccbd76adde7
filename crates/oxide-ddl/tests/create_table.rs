//! Rendering of complete tables.

mod common;

use common::{EMPLOYEE_COLUMNS, assert_sql, employee_inline, employee_named};
use oxide_ddl::column::{AutoIncrement, Column};
use oxide_ddl::constraints::{ForeignKey, ForeignKeyConstraint, PrimaryKeyConstraint};
use oxide_ddl::table::{Table, TableOptions};
use oxide_ddl::types::{Date, Integer, Varchar};
use oxide_ddl::Value;

#[test]
fn test_inline_constraints_derived_name() {
    let table = employee_inline().build().unwrap();
    let expected = format!(
        "CREATE TABLE TABELA (\n{EMPLOYEE_COLUMNS},\n\n\
         \tPRIMARY KEY (id),\n\
         \tFOREIGN KEY (id_setor) REFERENCES T_SETOR(id)\n);"
    );
    assert_sql(&table.to_sql(), &expected);
}

#[test]
fn test_inline_constraints_name_override() {
    for name in ["t_funcionario", "T_FUNCIONARIO"] {
        let table = employee_inline().name(name).build().unwrap();
        let expected = format!(
            "CREATE TABLE T_FUNCIONARIO (\n{EMPLOYEE_COLUMNS},\n\n\
             \tPRIMARY KEY (id),\n\
             \tFOREIGN KEY (id_setor) REFERENCES T_SETOR(id)\n);"
        );
        assert_sql(&table.to_sql(), &expected);
    }
}

#[test]
fn test_named_constraints_render_as_alter_table() {
    let table = employee_named().build().unwrap();
    assert_sql(
        &table.to_sql(),
        "CREATE TABLE T_FUNCIONARIO (\n\
         \tid INTEGER AUTO_INCREMENT NOT NULL,\n\
         \tnome VARCHAR(50) NOT NULL,\n\
         \tsobrenome VARCHAR,\n\
         \tcpf CHAR(11) NOT NULL,\n\
         \tsalario FLOAT(7, 2) NOT NULL DEFAULT 1212.78,\n\
         \tid_setor INTEGER NOT NULL\n);\n\n\
         ALTER TABLE T_FUNCIONARIO\n\
         \tADD CONSTRAINT pk_tabela PRIMARY KEY (id);\n\n\
         ALTER TABLE T_FUNCIONARIO\n\
         \tADD CONSTRAINT un_tabela_cpf UNIQUE (cpf);\n\n\
         ALTER TABLE T_FUNCIONARIO\n\
         \tADD CONSTRAINT fk_funcionario_setor FOREIGN KEY (id_setor) REFERENCES T_SETOR(id);",
    );
}

#[test]
fn test_create_if_not_exists() {
    let table = Table::builder("Tabela")
        .column("col", Column::builder(Integer::new()).build().unwrap())
        .options(TableOptions {
            create_if_not_exists: true,
            test: true,
        })
        .build()
        .unwrap();
    assert_sql(
        &table.to_sql(),
        "CREATE TABLE IF NOT EXISTS TABELA (\n\tcol INTEGER NOT NULL\n);",
    );
}

#[test]
fn test_render_is_idempotent() {
    let table = employee_named().build().unwrap();
    assert_eq!(table.to_sql(), table.to_sql());
    assert_eq!(table.to_string(), table.to_sql());
}

#[test]
fn test_inline_column_accessors() {
    let table = employee_inline().build().unwrap();
    let columns = table.columns();

    let rendered: Vec<String> = columns.iter().map(Column::to_sql).collect();
    assert_eq!(
        rendered,
        [
            "id INTEGER AUTO_INCREMENT NOT NULL",
            "nome VARCHAR(50) NOT NULL",
            "sobrenome VARCHAR",
            "cpf CHAR(11) NOT NULL UNIQUE",
            "salario FLOAT(7, 2) NOT NULL DEFAULT 1212.78",
            "id_setor INTEGER NOT NULL",
        ]
    );

    let types: Vec<String> = columns.iter().map(|c| c.data_type().to_string()).collect();
    assert_eq!(
        types,
        ["INTEGER", "VARCHAR(50)", "VARCHAR", "CHAR(11)", "FLOAT(7, 2)", "INTEGER"]
    );

    let names: Vec<&str> = columns.iter().filter_map(Column::name).collect();
    assert_eq!(names, ["id", "nome", "sobrenome", "cpf", "salario", "id_setor"]);

    let pk: Vec<bool> = columns.iter().map(Column::is_primary_key).collect();
    assert_eq!(pk, [true, false, false, false, false, false]);

    let nullable: Vec<bool> = columns.iter().map(Column::is_nullable).collect();
    assert_eq!(nullable, [false, false, true, false, false, false]);

    let unique: Vec<bool> = columns.iter().map(Column::is_unique).collect();
    assert_eq!(unique, [true, false, false, true, false, false]);

    assert_eq!(columns[0].auto_increment(), Some(AutoIncrement::Mysql));
    assert!(columns[1..].iter().all(|c| c.auto_increment().is_none()));

    assert_eq!(columns[4].default(), Some(&Value::Float(1212.78)));
    assert!(columns[5].foreign_key().is_some_and(|fk| !fk.is_named()));
    assert!(columns[..5].iter().all(|c| c.foreign_key().is_none()));
}

#[test]
fn test_named_column_accessors() {
    let table = employee_named().build().unwrap();

    let id = table.column("id").unwrap();
    assert!(id.is_primary_key());
    assert!(id.is_primary_key_named());
    assert!(id.is_unique());
    assert_eq!(id.to_sql(), "id INTEGER AUTO_INCREMENT NOT NULL");

    let cpf = table.column("cpf").unwrap();
    assert!(cpf.is_unique());
    assert_eq!(cpf.to_sql(), "cpf CHAR(11) NOT NULL");

    let sector = table.column("id_setor").unwrap();
    assert!(sector.is_foreign_key_named());
    let fk = sector.foreign_key().unwrap();
    assert!(fk.is_named());
    assert_eq!(fk.ref_table(), "t_setor");

    let names: Vec<&str> = table.named_constraints().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["pk_tabela", "un_tabela_cpf", "fk_funcionario_setor"]);
}

#[test]
fn test_primary_key_accessor_covers_named_and_inline() {
    let inline = Table::builder("Tabela")
        .column("pk_col_1", Column::builder(Integer::new()).primary_key().build().unwrap())
        .column("pk_col_2", Column::builder(Integer::new()).primary_key().build().unwrap())
        .build()
        .unwrap();
    assert_eq!(inline.primary_key().len(), 2);

    let named = Table::builder("Tabela")
        .column("pk_col_1", Column::builder(Integer::new()).build().unwrap())
        .column("pk_col_2", Column::builder(Integer::new()).build().unwrap())
        .constraint(PrimaryKeyConstraint::new("pk_tabela", ["pk_col_1", "pk_col_2"]).unwrap())
        .build()
        .unwrap();
    let pk_columns = named.primary_key();
    let pk: Vec<&str> = pk_columns.iter().filter_map(|c| c.name()).collect();
    assert_eq!(pk, ["pk_col_1", "pk_col_2"]);
    assert_sql(
        &named.to_sql(),
        "CREATE TABLE TABELA (\n\
         \tpk_col_1 INTEGER NOT NULL,\n\
         \tpk_col_2 INTEGER NOT NULL\n);\n\n\
         ALTER TABLE TABELA\n\
         \tADD CONSTRAINT pk_tabela PRIMARY KEY (pk_col_1, pk_col_2);",
    );
}

#[test]
fn test_named_foreign_key_suppresses_inline_clause() {
    let table = Table::builder("pedido")
        .column(
            "cliente_id",
            Column::builder(Integer::new())
                .foreign_key(ForeignKey::new("cliente", "id").unwrap())
                .build()
                .unwrap(),
        )
        .constraint(
            ForeignKeyConstraint::builder("fk_pedido_cliente", "cliente_id", "cliente", "id")
                .on_delete("cascade")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_sql(
        &table.to_sql(),
        "CREATE TABLE PEDIDO (\n\
         \tcliente_id INTEGER NOT NULL\n);\n\n\
         ALTER TABLE PEDIDO\n\
         \tADD CONSTRAINT fk_pedido_cliente FOREIGN KEY (cliente_id) REFERENCES CLIENTE(id) ON DELETE CASCADE;",
    );
    // The inline key still wins the accessor.
    let fk = table.column("cliente_id").unwrap().foreign_key().unwrap();
    assert!(!fk.is_named());
}

#[test]
fn test_multiple_inline_foreign_keys_with_actions() {
    let table = Table::builder("evento")
        .column(
            "id",
            Column::builder(Integer::new())
                .primary_key()
                .auto_increment(AutoIncrement::Postgree)
                .build()
                .unwrap(),
        )
        .column(
            "sala_id",
            Column::builder(Integer::new())
                .foreign_key(
                    ForeignKey::builder("sala", "id")
                        .on_delete("set null")
                        .build()
                        .unwrap(),
                )
                .nullable()
                .build()
                .unwrap(),
        )
        .column(
            "autor_id",
            Column::builder(Integer::new())
                .foreign_key(
                    ForeignKey::builder("usuario", "id")
                        .on_update("CASCADE")
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .column(
            "dia",
            Column::builder(Date::new()).default("2024-01-01").build().unwrap(),
        )
        .column(
            "titulo",
            Column::builder(Varchar::with_length(80).unwrap())
                .unique()
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_sql(
        &table.to_sql(),
        "CREATE TABLE EVENTO (\n\
         \tid INTEGER SERIAL NOT NULL,\n\
         \tsala_id INTEGER,\n\
         \tautor_id INTEGER NOT NULL,\n\
         \tdia DATE NOT NULL DEFAULT '2024-01-01',\n\
         \ttitulo VARCHAR(80) NOT NULL UNIQUE,\n\n\
         \tPRIMARY KEY (id),\n\
         \tFOREIGN KEY (sala_id) REFERENCES SALA(id) ON DELETE SET NULL,\n\
         \tFOREIGN KEY (autor_id) REFERENCES USUARIO(id) ON UPDATE CASCADE\n);",
    );
}
