use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef},
    datatypes::{Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use localrel_core::FieldDefs;

use crate::{
    coerce::{cast_column, coerce_column},
    error::ArrowConvertError,
    schema_convert::{arrow_schema_to_field_defs, field_defs_to_relaxed_arrow_schema},
    timezone::SessionTimezone,
};

/// Materialize a tabular frame.
///
/// Without `declared`, every column goes through [`coerce_column`] and the
/// schema is derived from the coerced columns. With `declared`, column `i` is
/// cast to field `i` and takes its name.
///
/// Returns the table together with its schema IR. All table fields are
/// nullable.
///
/// # Errors
/// - [`ArrowConvertError::LengthMismatch`] when `declared` has a different
///   field count than the frame has columns.
/// - [`ArrowConvertError::Cast`] or [`ArrowConvertError::NonexistentLocalTime`]
///   when a column cannot be converted.
/// - [`ArrowConvertError::UnsupportedType`] when an undeclared column has a
///   type the schema IR cannot describe.
pub fn frame_to_record_batch(
    frame: &RecordBatch,
    declared: Option<&FieldDefs>,
    session: &SessionTimezone,
) -> Result<(RecordBatch, FieldDefs), ArrowConvertError> {
    let options = RecordBatchOptions::new().with_row_count(Some(frame.num_rows()));

    let Some(fields) = declared else {
        let frame_schema = frame.schema();
        let mut arrow_fields = Vec::with_capacity(frame.num_columns());
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(frame.num_columns());
        for (field, column) in frame_schema.fields().iter().zip(frame.columns()) {
            let coerced = coerce_column(field.name(), column, session)?;
            arrow_fields.push(Field::new(field.name(), coerced.data_type().clone(), true));
            columns.push(coerced);
        }
        let schema = Arc::new(Schema::new(arrow_fields));
        let field_defs = arrow_schema_to_field_defs(&schema)?;
        let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;
        return Ok((batch, field_defs));
    };

    if fields.len() != frame.num_columns() {
        return Err(ArrowConvertError::LengthMismatch {
            expected: fields.len(),
            actual: frame.num_columns(),
        });
    }

    let schema = Arc::new(field_defs_to_relaxed_arrow_schema(fields));
    let columns = schema
        .fields()
        .iter()
        .zip(frame.columns())
        .map(|(field, column)| cast_column(field.name(), column, field.data_type(), session))
        .collect::<Result<Vec<_>, _>>()?;
    let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;
    Ok((batch, fields.clone()))
}
