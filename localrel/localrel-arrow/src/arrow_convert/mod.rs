//! Columnar materialization of canonical rows into an Arrow `RecordBatch`.
//!
//! One builder is created per schema field and fed the value each row holds
//! for that field, coerced to the field's type. Nested structs and arrays are
//! built as nested Arrow columns.

mod append;
mod builder;
mod scalar;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::DataType;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use localrel_core::{CanonicalRow, FieldDefs, Value};

use crate::{error::ArrowConvertError, schema_convert::field_defs_to_relaxed_arrow_schema};

/// Materialize `rows` under `fields`.
///
/// Keyed rows are read by field name and positional rows by field index;
/// absent values become nulls. The output schema is
/// [`field_defs_to_relaxed_arrow_schema`] of `fields`, so nulls are kept even
/// where the declared field is non-nullable.
///
/// # Errors
/// - [`ArrowConvertError::RowTooLong`] when a positional row has more values
///   than `fields`.
/// - [`ArrowConvertError::Coercion`] when a value does not fit its field type.
pub fn rows_to_record_batch(
    fields: &FieldDefs,
    rows: &[CanonicalRow],
) -> Result<RecordBatch, ArrowConvertError> {
    if let Some((row, r)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| !r.is_keyed() && r.len() > fields.len())
    {
        return Err(ArrowConvertError::RowTooLong {
            row,
            expected: fields.len(),
            actual: r.len(),
        });
    }

    let schema = Arc::new(field_defs_to_relaxed_arrow_schema(fields));
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(fields.len());

    for (i, (field, arrow_field)) in fields.iter().zip(schema.fields()).enumerate() {
        let values: Vec<&Value> = rows.iter().map(|r| r.value_for(&field.name, i)).collect();
        arrays.push(build_array_from_values(
            &field.name,
            arrow_field.data_type(),
            &values,
        )?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
}

fn build_array_from_values(
    name: &str,
    dt: &DataType,
    values: &[&Value],
) -> Result<ArrayRef, ArrowConvertError> {
    let capacity = match dt {
        DataType::List(_) => values.len().saturating_mul(4),
        _ => values.len(),
    };
    let mut builder = builder::make_builder(dt, capacity).ok_or_else(|| {
        ArrowConvertError::UnsupportedType {
            field: name.to_string(),
            data_type: dt.clone(),
        }
    })?;
    for (row, value) in values.iter().enumerate() {
        append::append_value_to_builder(&mut builder, dt, value).map_err(|source| {
            ArrowConvertError::Coercion {
                field: name.to_string(),
                row,
                source,
            }
        })?;
    }
    Ok(builder.finish())
}
