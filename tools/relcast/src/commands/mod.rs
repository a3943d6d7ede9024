pub mod convert;
pub mod schema;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use localrel::{ConvertedRelation, Converter, SchemaSpec};

use crate::input::read_jsonl;

/// Input and schema options shared by every subcommand.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to a JSON-lines file, one record per line
    input: PathBuf,

    /// DDL schema, e.g. "id BIGINT, name STRING"
    #[arg(short, long, conflicts_with = "columns")]
    schema: Option<String>,

    /// Comma-separated column names
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Session timezone for timestamp columns
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

impl SourceArgs {
    pub fn convert(&self) -> Result<ConvertedRelation> {
        let records = read_jsonl(&self.input)?;
        log::debug!("read {} records from {}", records.len(), self.input.display());

        let converter = Converter::builder()
            .with_session_timezone(&self.timezone)
            .build()?;
        let schema = match (&self.schema, &self.columns) {
            (Some(ddl), _) => Some(SchemaSpec::Ddl(ddl.clone())),
            (None, Some(names)) => Some(SchemaSpec::Names(names.clone())),
            (None, None) => None,
        };
        converter
            .convert(records, schema)
            .with_context(|| format!("failed to convert {}", self.input.display()))
    }
}
