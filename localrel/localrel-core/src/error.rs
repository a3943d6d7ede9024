//! Error types for the core layer.

use thiserror::Error;

/// A value did not have the shape its target type requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Errors raised while inferring a schema from rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferError {
    #[error("can not infer schema from empty dataset")]
    EmptyDataset,

    /// Two fields of one struct share a name.
    #[error("duplicate field name '{name}' in struct")]
    DuplicateField { name: String },
}
