use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use localrel_core::{DataTypeDef, ElementDef, FieldDef, FieldDefs, FloatWidth, IntWidth};

use crate::error::ArrowConvertError;

/// Name of the child field of every Arrow `List` produced here.
pub const LIST_ELEMENT_NAME: &str = "element";

// ---------------------------------------------------------------------------
// FieldDef schema IR -> Arrow
// ---------------------------------------------------------------------------

/// Converts `localrel-core` schema IR into an Arrow `Schema`, keeping the
/// declared nullability.
///
/// `Null` and `Undetermined` both become `DataType::Null`.
pub fn field_defs_to_arrow_schema(fields: &FieldDefs) -> Schema {
    Schema::new(
        fields
            .iter()
            .map(|f| to_arrow_field(&f.name, &f.element, false))
            .collect::<Vec<_>>(),
    )
}

/// Like [`field_defs_to_arrow_schema`] but with every field and element
/// nullable. Materialized tables use this so that nulls in fields declared
/// non-nullable are still representable.
pub fn field_defs_to_relaxed_arrow_schema(fields: &FieldDefs) -> Schema {
    Schema::new(
        fields
            .iter()
            .map(|f| to_arrow_field(&f.name, &f.element, true))
            .collect::<Vec<_>>(),
    )
}

/// Arrow type for an IR type, keeping declared nullability of nested members.
pub fn data_type_def_to_arrow(data_type: &DataTypeDef) -> DataType {
    to_arrow_type(data_type, false)
}

fn to_arrow_field(name: &str, elem: &ElementDef, relax: bool) -> Field {
    Field::new(
        name,
        to_arrow_type(&elem.data_type, relax),
        relax || elem.nullable,
    )
}

fn to_arrow_type(data_type: &DataTypeDef, relax: bool) -> DataType {
    match data_type {
        DataTypeDef::Null | DataTypeDef::Undetermined => DataType::Null,
        DataTypeDef::Bool => DataType::Boolean,
        DataTypeDef::Int(IntWidth::Byte) => DataType::Int8,
        DataTypeDef::Int(IntWidth::Short) => DataType::Int16,
        DataTypeDef::Int(IntWidth::Int) => DataType::Int32,
        DataTypeDef::Int(IntWidth::Long) => DataType::Int64,
        DataTypeDef::Float(FloatWidth::Single) => DataType::Float32,
        DataTypeDef::Float(FloatWidth::Double) => DataType::Float64,
        DataTypeDef::String => DataType::Utf8,
        DataTypeDef::Bytes => DataType::Binary,
        DataTypeDef::Timestamp(tz) => DataType::Timestamp(TimeUnit::Microsecond, tz.clone()),
        DataTypeDef::Array(elem) => {
            DataType::List(Arc::new(to_arrow_field(LIST_ELEMENT_NAME, elem, relax)))
        }
        DataTypeDef::Struct(fields) => DataType::Struct(
            fields
                .iter()
                .map(|f| to_arrow_field(&f.name, &f.element, relax))
                .collect::<Vec<_>>()
                .into(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Arrow -> FieldDef schema IR
// ---------------------------------------------------------------------------

/// Derives schema IR from an Arrow schema whose columns were already coerced
/// (see [`coerce_column`](crate::coerce_column)).
pub fn arrow_schema_to_field_defs(schema: &Schema) -> Result<FieldDefs, ArrowConvertError> {
    schema
        .fields()
        .iter()
        .map(|f| arrow_field_to_field_def(f))
        .collect::<Result<Vec<_>, _>>()
        .map(FieldDefs::new)
}

fn arrow_field_to_field_def(field: &Field) -> Result<FieldDef, ArrowConvertError> {
    let data_type =
        arrow_to_data_type_def(field.data_type()).ok_or_else(|| ArrowConvertError::UnsupportedType {
            field: field.name().clone(),
            data_type: field.data_type().clone(),
        })?;
    Ok(FieldDef::new(field.name(), data_type, field.is_nullable()))
}

/// IR type for an Arrow type, or `None` if the IR has no counterpart.
///
/// Unsigned, large, and view types have none; run columns through
/// [`coerce_column`](crate::coerce_column) first.
pub fn arrow_to_data_type_def(data_type: &DataType) -> Option<DataTypeDef> {
    Some(match data_type {
        DataType::Null => DataTypeDef::Null,
        DataType::Boolean => DataTypeDef::Bool,
        DataType::Int8 => DataTypeDef::Int(IntWidth::Byte),
        DataType::Int16 => DataTypeDef::Int(IntWidth::Short),
        DataType::Int32 => DataTypeDef::Int(IntWidth::Int),
        DataType::Int64 => DataTypeDef::Int(IntWidth::Long),
        DataType::Float32 => DataTypeDef::Float(FloatWidth::Single),
        DataType::Float64 => DataTypeDef::Float(FloatWidth::Double),
        DataType::Utf8 => DataTypeDef::String,
        DataType::Binary => DataTypeDef::Bytes,
        DataType::Timestamp(_, tz) => DataTypeDef::Timestamp(tz.clone()),
        DataType::List(f) => {
            DataTypeDef::array(arrow_to_data_type_def(f.data_type())?, f.is_nullable())
        }
        DataType::Struct(fields) => DataTypeDef::Struct(
            fields
                .iter()
                .map(|f| {
                    arrow_to_data_type_def(f.data_type())
                        .map(|dt| FieldDef::new(f.name(), dt, f.is_nullable()))
                })
                .collect::<Option<Vec<_>>>()?
                .into(),
        ),
        _ => return None,
    })
}
