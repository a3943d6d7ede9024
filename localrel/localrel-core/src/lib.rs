//! Arrow-independent core of the local relation conversion engine.
//!
//! This crate provides the client value model ([`Value`]), the schema
//! intermediate representation ([`DataTypeDef`] / [`FieldDefs`]), and the
//! row-oriented half of the pipeline:
//!
//! ```text
//! Value items
//!   └─ normalize               – mapping / record / sequence / scalar → CanonicalRow
//!       └─ infer_row_schema    – one row → FieldDefs
//!           └─ merge_field_defs – left fold over all rows → one schema
//! ```

mod error;
mod infer;
mod merge;
mod row;
mod schema;
mod value;

pub use error::{InferError, ValueTypeError};
pub use infer::{infer_row_schema, infer_schema_from_rows, infer_value_type};
pub use merge::{find_undetermined, merge_field_defs, merge_types};
pub use row::{CanonicalRow, RowEntry, SCALAR_COLUMN_NAME, normalize, normalize_all};
pub use schema::{
    DataTypeDef, ElementDef, FieldDef, FieldDefs, FloatWidth, IntWidth, format_field_defs,
};
pub use value::Value;
