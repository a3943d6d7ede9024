//! Error types for [`Converter`](crate::Converter).

use localrel_arrow::ArrowConvertError;
use localrel_core::InferError;
use localrel_ddl::DdlError;

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: empty data without a schema, bad array dimensions,
    /// mixed record shapes, unparseable schema or timezone, unsupported
    /// column types.
    Input,
    /// Types could not be determined from the data and no struct schema was
    /// supplied to fall back on.
    InferenceConflict,
    /// Declared and materialized column counts disagree.
    Cardinality,
    /// A value or column could not be converted to its field type.
    Coercion,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Infer(#[from] InferError),

    #[error(transparent)]
    Ddl(#[from] DdlError),

    /// Records mix mappings, sequences, and scalars.
    #[error("row {row} is a {actual} but the first row is a {expected}")]
    MixedRowShapes {
        row: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("single data type {0} is not supported with a tabular frame")]
    AtomicSchemaWithFrame(String),

    /// Inference left a field undetermined and no struct schema was given.
    #[error(
        "some of types cannot be determined after inferring (first at '{field}'), a struct schema is required in this case"
    )]
    Undetermined { field: String },

    #[error(
        "Length mismatch: Expected axis has {expected} elements, new values have {actual} elements"
    )]
    LengthMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Arrow(#[from] ArrowConvertError),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Infer(_)
            | Self::Ddl(_)
            | Self::AtomicSchemaWithFrame(_)
            | Self::MixedRowShapes { .. } => ErrorKind::Input,
            Self::Undetermined { .. } => ErrorKind::InferenceConflict,
            Self::LengthMismatch { .. } => ErrorKind::Cardinality,
            Self::Arrow(e) => match e {
                ArrowConvertError::RowTooLong { .. } | ArrowConvertError::LengthMismatch { .. } => {
                    ErrorKind::Cardinality
                }
                ArrowConvertError::UnsupportedType { .. }
                | ArrowConvertError::InvalidTimezone(_)
                | ArrowConvertError::InvalidDimensions { .. }
                | ArrowConvertError::ShapeMismatch { .. } => ErrorKind::Input,
                ArrowConvertError::Coercion { .. }
                | ArrowConvertError::Cast { .. }
                | ArrowConvertError::NonexistentLocalTime { .. }
                | ArrowConvertError::Arrow(_) => ErrorKind::Coercion,
            },
        }
    }
}
