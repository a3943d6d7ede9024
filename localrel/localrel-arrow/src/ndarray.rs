//! Homogeneous array input.

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, UInt64Array},
    compute::take,
    datatypes::{Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use localrel_core::{FieldDefs, SCALAR_COLUMN_NAME};

use crate::{
    coerce::coerce_column, error::ArrowConvertError, schema_convert::arrow_schema_to_field_defs,
    timezone::SessionTimezone,
};

/// A dense array stored row-major in a single Arrow column.
#[derive(Debug, Clone)]
pub struct NumericArray {
    pub shape: Vec<usize>,
    pub values: ArrayRef,
}

impl NumericArray {
    pub fn new(shape: Vec<usize>, values: ArrayRef) -> Self {
        Self { shape, values }
    }

    /// One-dimensional array over `values`.
    pub fn vector(values: ArrayRef) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Check that the array is 1-D or 2-D and that the value count matches the
    /// shape. Returns `(rows, columns)`.
    pub fn validate(&self) -> Result<(usize, usize), ArrowConvertError> {
        let (rows, cols) = match self.shape.as_slice() {
            [n] => (*n, 1),
            [n, m] => (*n, *m),
            _ => return Err(ArrowConvertError::InvalidDimensions { ndim: self.ndim() }),
        };
        let expected = rows.checked_mul(cols).unwrap_or(usize::MAX);
        if expected != self.values.len() {
            return Err(ArrowConvertError::ShapeMismatch {
                shape: self.shape.clone(),
                expected,
                actual: self.values.len(),
            });
        }
        Ok((rows, cols))
    }
}

/// Column names used when none are supplied: `value` for a single column,
/// `_1.._N` otherwise.
pub fn default_array_column_names(array: &NumericArray) -> Vec<String> {
    match array.shape.as_slice() {
        [_] | [_, 1] => vec![SCALAR_COLUMN_NAME.to_string()],
        [_, cols] => (1..=*cols).map(|i| format!("_{i}")).collect(),
        _ => Vec::new(),
    }
}

/// Split an array into a table with one column per trailing-axis index.
///
/// Columns go through [`coerce_column`](crate::coerce_column).
///
/// # Errors
/// - [`ArrowConvertError::InvalidDimensions`] unless the array is 1-D or 2-D.
/// - [`ArrowConvertError::ShapeMismatch`] when the value count does not match
///   the shape.
/// - [`ArrowConvertError::LengthMismatch`] when `names` does not have one name
///   per column.
pub fn array_to_record_batch(
    array: &NumericArray,
    names: Option<&[String]>,
    session: &SessionTimezone,
) -> Result<(RecordBatch, FieldDefs), ArrowConvertError> {
    let (rows, cols) = array.validate()?;
    let names = match names {
        Some(names) => names.to_vec(),
        None => default_array_column_names(array),
    };
    if names.len() != cols {
        return Err(ArrowConvertError::LengthMismatch {
            expected: names.len(),
            actual: cols,
        });
    }

    let mut fields = Vec::with_capacity(cols);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(cols);
    for (j, name) in names.iter().enumerate() {
        let column = if cols == 1 {
            array.values.clone()
        } else {
            let indices = UInt64Array::from_iter_values((0..rows).map(|i| (i * cols + j) as u64));
            take(array.values.as_ref(), &indices, None)?
        };
        let column = coerce_column(name, &column, session)?;
        fields.push(Field::new(name, column.data_type().clone(), true));
        columns.push(column);
    }

    let schema = Arc::new(Schema::new(fields));
    let field_defs = arrow_schema_to_field_defs(&schema)?;
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;
    Ok((batch, field_defs))
}
