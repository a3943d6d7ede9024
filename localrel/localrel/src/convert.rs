use std::sync::Arc;

use arrow::{
    datatypes::Schema,
    record_batch::{RecordBatch, RecordBatchOptions},
};
use localrel_arrow::{SessionTimezone, rows_to_record_batch};
use localrel_core::{FieldDefs, InferError};

use crate::{
    error::ConvertError,
    input::{
        ArraySource, FrameSource, InputCollection, Produced, RecordSource, RowSource,
        SourceContext,
    },
    schema::{ResolvedSchema, SchemaDescriptor, SchemaSpec},
};

/// Result of [`Converter::convert`].
#[derive(Debug, Clone)]
pub struct ConvertedRelation {
    /// Materialized table. Every field is nullable.
    pub table: RecordBatch,
    /// Schema IR of `table`. A declared struct schema is carried as given,
    /// including its nullability.
    pub fields: FieldDefs,
    /// Schema to attach to the relation; `None` when the caller gave none or
    /// only column names.
    pub schema: Option<SchemaDescriptor>,
}

/// Converts client-side data into a schema-typed Arrow table.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    session: SessionTimezone,
}

/// Builder for configuring [`Converter`].
#[derive(Debug, Clone)]
pub struct ConverterBuilder {
    session_timezone: String,
}

impl Converter {
    /// Create a builder for [`Converter`].
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder {
            session_timezone: "UTC".to_string(),
        }
    }

    /// A converter with session timezone `UTC`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_timezone(&self) -> &SessionTimezone {
        &self.session
    }

    /// Convert `data` under an optional caller schema.
    ///
    /// Records are normalized, inferred, and merged into one schema; frames and
    /// arrays are converted column-wise. An explicit struct schema (or DDL that
    /// parses to one) types the table: record fields are looked up by declared
    /// name, and frame and array columns are cast. When the inferred schema has
    /// fields of undetermined type and no struct schema is given, the call
    /// fails.
    ///
    /// The declared column count, if any, must match the data; output
    /// columns then take the declared or supplied names.
    ///
    /// # Errors
    /// See [`ConvertError::kind`] for the classification.
    pub fn convert(
        &self,
        data: impl Into<InputCollection>,
        schema: Option<SchemaSpec>,
    ) -> Result<ConvertedRelation, ConvertError> {
        let data = data.into();
        let schema = ResolvedSchema::resolve(schema, self.session.name())?;
        log::debug!("converting {} {}", data.len(), data.kind_name());

        if let InputCollection::Array(array) = &data {
            array.validate()?;
        }
        if data.is_empty() {
            let fields = schema.empty_table_fields().ok_or(InferError::EmptyDataset)?;
            let table = rows_to_record_batch(&fields, &[])?;
            return Ok(ConvertedRelation {
                table,
                fields,
                schema: schema.descriptor,
            });
        }

        let ctx = SourceContext {
            schema: &schema,
            session: &self.session,
        };
        let produced = match data {
            InputCollection::Records(items) => RecordSource::new(items).produce(&ctx)?,
            InputCollection::Frame(frame) => FrameSource::new(frame).produce(&ctx)?,
            InputCollection::Array(array) => ArraySource::new(array).produce(&ctx)?,
        };
        let (table, fields) = match produced {
            Produced::Rows { rows, fields } => (rows_to_record_batch(&fields, &rows)?, fields),
            Produced::Columns { batch, fields } => (batch, fields),
        };

        finalize(table, fields, schema)
    }
}

/// Check the column count against the caller's schema and apply its names.
fn finalize(
    table: RecordBatch,
    fields: FieldDefs,
    schema: ResolvedSchema,
) -> Result<ConvertedRelation, ConvertError> {
    if let Some(expected) = schema.expected_columns()
        && expected != table.num_columns()
    {
        return Err(ConvertError::LengthMismatch {
            expected,
            actual: table.num_columns(),
        });
    }

    let (table, fields) = match schema.column_names() {
        Some(names) => (rename_columns(&table, &names)?, fields.renamed(&names)),
        None => (table, fields),
    };
    log::debug!(
        "converted {} rows with schema {}",
        table.num_rows(),
        fields
            .iter()
            .map(|f| format!("{}:{}", f.name, f.data_type().simple_string()))
            .collect::<Vec<_>>()
            .join(",")
    );

    Ok(ConvertedRelation {
        table,
        fields,
        schema: schema.descriptor,
    })
}

fn rename_columns(table: &RecordBatch, names: &[String]) -> Result<RecordBatch, ConvertError> {
    let fields = table
        .schema()
        .fields()
        .iter()
        .zip(names)
        .map(|(f, name)| f.as_ref().clone().with_name(name))
        .collect::<Vec<_>>();
    let options = RecordBatchOptions::new().with_row_count(Some(table.num_rows()));
    let batch = RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        table.columns().to_vec(),
        &options,
    )
    .map_err(localrel_arrow::ArrowConvertError::from)?;
    Ok(batch)
}

impl ConverterBuilder {
    /// Session timezone for temporal coercion: an IANA name or a fixed offset
    /// such as `+05:30` (default: `UTC`).
    pub fn with_session_timezone(mut self, tz: impl Into<String>) -> Self {
        self.session_timezone = tz.into();
        self
    }

    /// Build the converter.
    ///
    /// # Errors
    /// Fails when the session timezone cannot be parsed.
    pub fn build(self) -> Result<Converter, ConvertError> {
        let session = self.session_timezone.parse::<SessionTimezone>()?;
        Ok(Converter { session })
    }
}
