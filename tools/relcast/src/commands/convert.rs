use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::SourceArgs;
use crate::{
    format::OutputFormat,
    writer::{CsvWriter, JsonlWriter, ParquetWriter, RecordBatchWriter, TableWriter},
};

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output format ("table" pretty-prints)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let converted = self.source.convert()?;

        let mut writer: Box<dyn RecordBatchWriter> = match self.format {
            OutputFormat::Jsonl => Box::new(JsonlWriter::new(self.output.as_deref())?),
            OutputFormat::Csv => Box::new(CsvWriter::new(self.output.as_deref())?),
            OutputFormat::Table => Box::new(TableWriter::new(self.output.as_deref())),
            OutputFormat::Parquet => {
                let path = self
                    .output
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("Parquet output requires -o <file>"))?;
                Box::new(ParquetWriter::new(path)?)
            }
        };

        let (batch, dropped_columns) = self.format.prepare(converted.table)?;
        if !dropped_columns.is_empty() {
            log::warn!(
                "{:?} output skipped nested columns: {}",
                self.format,
                dropped_columns.join(", ")
            );
        }
        writer.write_batch(batch)?;
        writer.finish()
    }
}
