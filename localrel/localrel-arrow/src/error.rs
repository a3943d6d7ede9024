use arrow::{datatypes::DataType, error::ArrowError};
use localrel_core::ValueTypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    /// A row value could not be stored in its field's type.
    #[error("cannot convert field '{field}' at row {row}: {source}")]
    Coercion {
        field: String,
        row: usize,
        #[source]
        source: ValueTypeError,
    },

    /// A frame or array column could not be cast to its target type.
    #[error("cannot cast column '{field}' from {from} to {to}: {source}")]
    Cast {
        field: String,
        from: DataType,
        to: DataType,
        #[source]
        source: ArrowError,
    },

    /// A positional row carries more values than the schema has fields.
    #[error("row {row} has {actual} values but the schema has {expected} fields")]
    RowTooLong {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported column type {data_type} for column '{field}'")]
    UnsupportedType { field: String, data_type: DataType },

    #[error("invalid session timezone '{0}'")]
    InvalidTimezone(String),

    /// A naive timestamp falls into a gap of the session timezone.
    #[error("local time in column '{field}' does not exist in timezone '{tz}'")]
    NonexistentLocalTime { field: String, tz: String },

    #[error("array input should be of 1 or 2 dimensions, got {ndim}")]
    InvalidDimensions { ndim: usize },

    #[error("array shape {shape:?} needs {expected} values, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Length mismatch: Expected axis has {expected} elements, new values have {actual} elements"
    )]
    LengthMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
