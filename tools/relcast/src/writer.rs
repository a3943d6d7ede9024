use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

pub trait RecordBatchWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

fn open_destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

// --- JSON Lines ---

pub struct JsonlWriter {
    inner: Option<arrow::json::LineDelimitedWriter<Box<dyn Write>>>,
}

impl JsonlWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        Ok(Self {
            inner: Some(arrow::json::LineDelimitedWriter::new(open_destination(
                output,
            )?)),
        })
    }
}

impl RecordBatchWriter for JsonlWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let writer = self
            .inner
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("writer already finished"))?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.inner.take() {
            writer.finish()?;
            writer.into_inner().flush()?;
        }
        Ok(())
    }
}

// --- CSV ---

pub struct CsvWriter {
    inner: Option<arrow::csv::Writer<Box<dyn Write>>>,
}

impl CsvWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let inner = arrow::csv::WriterBuilder::new()
            .with_header(true)
            .build(open_destination(output)?);
        Ok(Self { inner: Some(inner) })
    }
}

impl RecordBatchWriter for CsvWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let writer = self
            .inner
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("writer already finished"))?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.inner.take() {
            writer.into_inner().flush()?;
        }
        Ok(())
    }
}

// --- Pretty table ---

pub struct TableWriter {
    output: Option<PathBuf>,
    batches: Vec<RecordBatch>,
}

impl TableWriter {
    pub fn new(output: Option<&Path>) -> Self {
        Self {
            output: output.map(Path::to_path_buf),
            batches: Vec::new(),
        }
    }
}

impl RecordBatchWriter for TableWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        self.batches.push(batch);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let table = arrow::util::pretty::pretty_format_batches(&self.batches)?;
        let mut out = open_destination(self.output.as_deref())?;
        writeln!(out, "{table}")?;
        out.flush()?;
        self.batches.clear();
        Ok(())
    }
}

// --- Parquet ---

pub struct ParquetWriter {
    output_path: PathBuf,
    inner: Option<ArrowWriter<fs::File>>,
}

impl ParquetWriter {
    pub fn new(output: &Path) -> Result<Self> {
        Ok(Self {
            output_path: output.to_path_buf(),
            inner: None,
        })
    }
}

impl RecordBatchWriter for ParquetWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        if self.inner.is_none() {
            let file = fs::File::create(&self.output_path)
                .with_context(|| format!("cannot create {}", self.output_path.display()))?;
            let props = WriterProperties::builder().build();
            self.inner = Some(ArrowWriter::try_new(file, batch.schema(), Some(props))?);
        }
        if let Some(writer) = self.inner.as_mut() {
            writer.write(&batch)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let writer = self
            .inner
            .take()
            .ok_or_else(|| anyhow::anyhow!("no table was written"))?;
        writer.close()?;
        log::info!("written to {}", self.output_path.display());
        Ok(())
    }
}
