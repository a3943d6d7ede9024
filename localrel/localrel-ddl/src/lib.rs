//! DDL schema strings for `localrel`.
//!
//! Callers may describe a schema as text instead of building
//! [`FieldDefs`](localrel_core::FieldDefs) by hand:
//!
//! ```text
//! "name STRING, age INT NOT NULL"   ─┐
//! "struct<name:string,age:int>"     ─┼─ parse_ddl → DataTypeDef
//! "bigint"                          ─┘
//! ```

mod parser;

pub use parser::parse_ddl;

/// Errors returned by [`parse_ddl`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DdlError {
    #[error("empty schema string")]
    Empty,

    #[error("failed to parse schema '{input}': {detail}")]
    Syntax { input: String, detail: String },

    /// Parsed, but not a valid schema (e.g. duplicate field names).
    #[error("invalid schema: {0}")]
    Invalid(String),
}
