use anyhow::Result;
use arrow::{datatypes::DataType, record_batch::RecordBatch};
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Jsonl,
    Csv,
    Parquet,
    /// Aligned text table for the terminal.
    Table,
}

impl OutputFormat {
    fn keeps_nested(&self) -> bool {
        !matches!(self, OutputFormat::Csv)
    }

    /// Drop columns the format cannot hold; returns the batch and the
    /// dropped column names.
    pub fn prepare(&self, batch: RecordBatch) -> Result<(RecordBatch, Vec<String>)> {
        if self.keeps_nested() {
            return Ok((batch, Vec::new()));
        }

        let schema = batch.schema();
        let mut kept = Vec::new();
        let mut dropped = Vec::new();
        for (i, field) in schema.fields().iter().enumerate() {
            match field.data_type() {
                DataType::List(_) | DataType::Struct(_) => dropped.push(field.name().clone()),
                _ => kept.push(i),
            }
        }
        if dropped.is_empty() {
            return Ok((batch, dropped));
        }
        let projected = batch.project(&kept)?;
        Ok((projected, dropped))
    }
}
