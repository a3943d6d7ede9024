use std::io::Cursor;

use arrow::{
    error::ArrowError,
    ipc::{reader::StreamReader, writer::StreamWriter},
    record_batch::RecordBatch,
};

use crate::convert::ConvertedRelation;

/// Literal relation payload for remote plan submission: the table as an
/// Arrow IPC stream plus the schema text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRelation {
    pub data: Vec<u8>,
    /// Spark JSON schema or DDL text; `None` when the caller gave no schema.
    pub schema: Option<String>,
}

impl LocalRelation {
    pub fn try_from_converted(converted: &ConvertedRelation) -> Result<Self, ArrowError> {
        let mut data = Vec::new();
        {
            let mut writer = StreamWriter::try_new(&mut data, &converted.table.schema())?;
            writer.write(&converted.table)?;
            writer.finish()?;
        }
        Ok(Self {
            data,
            schema: converted.schema.as_ref().map(|s| s.to_json()),
        })
    }

    /// Decode the IPC stream back into batches.
    pub fn read_batches(&self) -> Result<Vec<RecordBatch>, ArrowError> {
        StreamReader::try_new(Cursor::new(self.data.as_slice()), None)?.collect()
    }
}
