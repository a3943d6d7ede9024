//! Converts client-side data into a schema-typed Arrow table plus a schema
//! descriptor, ready to ship as a literal relation.
//!
//! ```text
//! InputCollection ──┬─ Records ─ normalize → infer → merge ─┐
//!                   ├─ Frame ── column coercion ────────────┼─ materialize → finalize
//!                   └─ Array ── column split ───────────────┘
//! ```
//!
//! # Typical Flow
//! ```rust
//! use localrel::{Converter, LocalRelation, SchemaSpec};
//! use localrel::core::Value;
//!
//! let converter = Converter::builder()
//!     .with_session_timezone("Asia/Tokyo")
//!     .build()
//!     .unwrap();
//! let data = vec![
//!     Value::map([("b", Value::Int(1)), ("a", Value::Int(2))]),
//!     Value::map([("a", Value::Int(3)), ("b", Value::Int(4))]),
//! ];
//! let converted = converter
//!     .convert(data, Some(SchemaSpec::Ddl("a long, b long".into())))
//!     .unwrap();
//! assert_eq!(converted.table.num_rows(), 2);
//!
//! let relation = LocalRelation::try_from_converted(&converted).unwrap();
//! assert_eq!(relation.schema.as_deref(), Some("a long, b long"));
//! ```
mod convert;
mod error;
mod input;
mod relation;
mod schema;

pub use convert::{ConvertedRelation, Converter, ConverterBuilder};
pub use error::{ConvertError, ErrorKind};
pub use input::{
    ArraySource, FrameSource, InputCollection, Produced, RecordSource, RowSource, SourceContext,
};
pub use localrel_arrow as arrow;
pub use localrel_core as core;
pub use localrel_ddl as ddl;
pub use relation::LocalRelation;
pub use schema::{SchemaDescriptor, SchemaSpec};
