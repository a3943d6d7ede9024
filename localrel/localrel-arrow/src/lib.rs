//! Arrow layer of `localrel`.
//!
//! Three ways into a [`RecordBatch`](arrow::record_batch::RecordBatch):
//! - [`rows_to_record_batch`]: canonical rows plus a resolved schema, built
//!   column by column with per-field coercion.
//! - [`frame_to_record_batch`]: an existing Arrow frame, coerced column-wise
//!   (temporal columns land in the session timezone).
//! - [`array_to_record_batch`]: a 1-D or 2-D homogeneous array split into
//!   columns.
//!
//! [`record_batch_to_rows`] goes the other way, for reading a table back as
//! values.
//!
//! Every table produced here has only nullable fields; the declared
//! nullability stays in the schema IR returned next to it.
//!
//! # Typical Flow
//! ```rust
//! use localrel_arrow::rows_to_record_batch;
//! use localrel_core::{Value, infer_schema_from_rows, normalize_all};
//!
//! let items = vec![Value::map([("a", Value::Int(1))]), Value::map([("a", Value::Int(2))])];
//! let rows = normalize_all(items, None);
//! let fields = infer_schema_from_rows(&rows).unwrap();
//! let batch = rows_to_record_batch(&fields, &rows).unwrap();
//! assert_eq!(batch.num_rows(), 2);
//! ```
pub mod arrow_convert;
pub mod coerce;
pub mod error;
pub mod frame;
pub mod ndarray;
pub mod rows;
pub mod schema_convert;
pub mod timezone;

pub use arrow_convert::rows_to_record_batch;
pub use coerce::{cast_column, coerce_column};
pub use error::ArrowConvertError;
pub use frame::frame_to_record_batch;
pub use ndarray::{NumericArray, array_to_record_batch, default_array_column_names};
pub use rows::record_batch_to_rows;
pub use schema_convert::{
    LIST_ELEMENT_NAME, arrow_schema_to_field_defs, arrow_to_data_type_def,
    data_type_def_to_arrow, field_defs_to_arrow_schema, field_defs_to_relaxed_arrow_schema,
};
pub use timezone::SessionTimezone;
