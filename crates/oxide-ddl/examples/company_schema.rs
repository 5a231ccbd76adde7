//! Builds a small company schema and writes the generated SQL.
//!
//! ```text
//! cargo run -p oxide-ddl --example company_schema -- schema.sql --verbose
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::column::{AutoIncrement, Column};
use oxide_ddl::constraints::{
    ForeignKey, ForeignKeyConstraint, NamedConstraint, PrimaryKeyConstraint, UniqueConstraint,
};
use oxide_ddl::table::TableModel;
use oxide_ddl::types::{Boolean, Char, Date, Float, Integer, Varchar};
use oxide_ddl::{Result, Schema};

/// Generates the company schema as SQL DDL.
#[derive(Parser)]
#[command(name = "company_schema")]
struct Cli {
    /// Output file. The SQL is printed when omitted.
    output: Option<PathBuf>,

    /// Dialect whose auto-increment keyword is rendered.
    #[arg(short, long, default_value = "mysql")]
    dialect: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

struct Sector;

impl TableModel for Sector {
    const TABLE_NAME: Option<&'static str> = Some("t_setor");

    fn columns() -> Result<Vec<(&'static str, Column)>> {
        Ok(vec![
            ("id", Column::builder(Integer::new()).primary_key().build()?),
            ("nome", Column::builder(Varchar::with_length(40)?).unique().build()?),
            (
                "ativo",
                Column::builder(Boolean::new()).default(true).build()?,
            ),
        ])
    }
}

struct Employee;

impl TableModel for Employee {
    const TABLE_NAME: Option<&'static str> = Some("t_funcionario");

    fn columns() -> Result<Vec<(&'static str, Column)>> {
        Ok(vec![
            ("id", Column::builder(Integer::new()).build()?),
            ("nome", Column::builder(Varchar::with_length(50)?).build()?),
            ("sobrenome", Column::builder(Varchar::new()).nullable().build()?),
            ("cpf", Column::builder(Char::with_length(11)?).build()?),
            (
                "salario",
                Column::builder(Float::with_precision_and_scale(7, 2)?)
                    .default(1212.78)
                    .build()?,
            ),
            ("admissao", Column::builder(Date::new()).nullable().build()?),
            ("id_setor", Column::builder(Integer::new()).build()?),
        ])
    }

    fn constraints() -> Result<Vec<NamedConstraint>> {
        Ok(vec![
            PrimaryKeyConstraint::new("pk_funcionario", "id")?.into(),
            UniqueConstraint::new("un_funcionario_cpf", "cpf")?.into(),
            ForeignKeyConstraint::builder("fk_funcionario_setor", "id_setor", "t_setor", "id")
                .on_delete("restrict")
                .build()?
                .into(),
        ])
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect: AutoIncrement = cli.dialect.parse()?;

    let mut schema = Schema::new();
    schema.create::<Sector>()?;
    schema.create::<Employee>()?;

    // Tables can also be assembled without a model type.
    let log = oxide_ddl::Table::builder("t_log")
        .column(
            "id",
            Column::builder(Integer::new())
                .primary_key()
                .auto_increment(dialect)
                .build()?,
        )
        .column(
            "id_funcionario",
            Column::builder(Integer::new())
                .foreign_key(
                    ForeignKey::builder("t_funcionario", "id")
                        .on_delete("cascade")
                        .build()?,
                )
                .build()?,
        )
        .column("mensagem", Column::builder(Varchar::new()).build()?)
        .create_if_not_exists()
        .build()?;
    schema.add(log);

    match cli.output {
        Some(path) => {
            schema.save(&path)?;
            info!("Wrote {} tables to {}", schema.len(), path.display());
        }
        None => schema.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}
