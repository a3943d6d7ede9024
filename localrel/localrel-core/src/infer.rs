//! Per-row schema inference.
//!
//! Inference looks at one row at a time; reconciling rows is left to
//! [`merge_field_defs`](crate::merge_field_defs).

use crate::{
    error::InferError,
    merge::{merge_field_defs, merge_types},
    row::CanonicalRow,
    schema::{DataTypeDef, FieldDef, FieldDefs, FloatWidth, IntWidth},
    value::Value,
};

/// Infer the type of a single value.
pub fn infer_value_type(value: &Value) -> Result<DataTypeDef, InferError> {
    Ok(match value {
        Value::Null => DataTypeDef::Null,
        Value::Bool(_) => DataTypeDef::Bool,
        Value::Int(v) => DataTypeDef::Int(IntWidth::fitting(*v)),
        Value::Float(_) => DataTypeDef::Float(FloatWidth::Double),
        Value::String(_) => DataTypeDef::String,
        Value::Bytes(_) => DataTypeDef::Bytes,
        Value::Timestamp { tz, .. } => DataTypeDef::Timestamp(tz.clone()),
        Value::List(items) => {
            let mut element = DataTypeDef::Null;
            for item in items {
                element = merge_types(&element, &infer_value_type(item)?);
            }
            let nullable = items.is_empty() || items.iter().any(Value::is_null);
            DataTypeDef::array(element, nullable)
        }
        Value::Map(entries) => {
            let mut sorted: Vec<_> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            DataTypeDef::Struct(infer_named_fields(sorted.into_iter().map(|(k, v)| (&**k, v)))?)
        }
        Value::Record(fields) => {
            DataTypeDef::Struct(infer_named_fields(fields.iter().map(|(k, v)| (&**k, v)))?)
        }
    })
}

fn infer_named_fields<'a>(
    fields: impl Iterator<Item = (&'a str, &'a Value)>,
) -> Result<FieldDefs, InferError> {
    let defs = fields
        .map(|(name, value)| Ok(FieldDef::new(name, infer_value_type(value)?, value.is_null())))
        .collect::<Result<Vec<_>, InferError>>()?;
    FieldDefs::try_new(defs)
}

/// Infer the struct type of one row. Unnamed entries are called `_1`, `_2`, ...
pub fn infer_row_schema(row: &CanonicalRow) -> Result<FieldDefs, InferError> {
    let defs = row
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Ok(FieldDef::new(
                row.field_name(i),
                infer_value_type(&entry.value)?,
                entry.value.is_null(),
            ))
        })
        .collect::<Result<Vec<_>, InferError>>()?;
    FieldDefs::try_new(defs)
}

/// Infer every row and left-fold the results into one schema.
///
/// The result may still contain `Null` or `Undetermined` types; see
/// [`find_undetermined`](crate::find_undetermined).
pub fn infer_schema_from_rows(rows: &[CanonicalRow]) -> Result<FieldDefs, InferError> {
    let (first, rest) = rows.split_first().ok_or(InferError::EmptyDataset)?;
    let mut schema = infer_row_schema(first)?;
    for row in rest {
        schema = merge_field_defs(&schema, &infer_row_schema(row)?);
    }
    Ok(schema)
}
