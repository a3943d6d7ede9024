use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Float32Builder, Float64Builder, Int8Builder,
        Int16Builder, Int32Builder, Int64Builder, ListBuilder, NullBuilder, StringBuilder,
        StructBuilder, TimestampMicrosecondBuilder,
    },
    datatypes::{DataType, Fields},
};
use localrel_core::{Value, ValueTypeError};

use super::scalar::{ScalarValue, scalar_value_for_datatype};

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .expect(concat!("expected builder type: ", stringify!($T)))
    };
}

fn append_scalar_dyn(builder: &mut Box<dyn ArrayBuilder>, scalar: &ScalarValue<'_>) {
    match scalar {
        ScalarValue::Null => cast_builder!(builder, NullBuilder).append_null(),
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder).append_option(*v),
        ScalarValue::Int8(v) => cast_builder!(builder, Int8Builder).append_option(*v),
        ScalarValue::Int16(v) => cast_builder!(builder, Int16Builder).append_option(*v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder).append_option(*v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder).append_option(*v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder).append_option(*v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder).append_option(*v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder).append_option(*v),
        ScalarValue::Binary(v) => cast_builder!(builder, BinaryBuilder).append_option(*v),
        ScalarValue::TimestampMicrosecond(v) => {
            cast_builder!(builder, TimestampMicrosecondBuilder).append_option(*v)
        }
    }
}

fn append_list_elements(
    child_builder: &mut Box<dyn ArrayBuilder>,
    elem_dt: &DataType,
    value: &Value,
) -> Result<bool, ValueTypeError> {
    match value {
        Value::List(items) => {
            for item in items {
                append_value_to_builder(child_builder, elem_dt, item)?;
            }
            Ok(true)
        }
        Value::Null => Ok(false),
        _ => Err(value.type_mismatch("List")),
    }
}

/// Child value for struct member `index` named `name`: mappings and records
/// are looked up by name, sequences by position.
fn struct_member<'a>(value: &'a Value, name: &str, index: usize) -> Option<&'a Value> {
    match value {
        Value::Map(entries) | Value::Record(entries) => {
            entries.iter().find(|(k, _)| &**k == name).map(|(_, v)| v)
        }
        Value::List(items) => items.get(index),
        _ => None,
    }
}

fn append_struct_members(
    sb: &mut StructBuilder,
    fields: &Fields,
    value: &Value,
) -> Result<bool, ValueTypeError> {
    match value {
        Value::Map(_) | Value::Record(_) | Value::List(_) => {
            if let Value::List(items) = value
                && items.len() > fields.len()
            {
                return Err(ValueTypeError::new(
                    format!("Struct({} fields)", fields.len()),
                    format!("List(length={})", items.len()),
                ));
            }
            for (i, field) in fields.iter().enumerate() {
                let child = struct_member(value, field.name(), i).unwrap_or(&Value::Null);
                append_value_to_struct_field(sb, i, field.data_type(), child)?;
            }
            Ok(true)
        }
        Value::Null => {
            for (i, field) in fields.iter().enumerate() {
                append_value_to_struct_field(sb, i, field.data_type(), &Value::Null)?;
            }
            Ok(false)
        }
        _ => Err(value.type_mismatch("Struct")),
    }
}

pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &Value,
) -> Result<(), ValueTypeError> {
    if let Some(scalar) = scalar_value_for_datatype(dt, value)? {
        append_scalar_dyn(builder, &scalar);
        return Ok(());
    }

    match dt {
        DataType::List(field) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            let valid = append_list_elements(b.values(), field.data_type(), value)?;
            b.append(valid);
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            let valid = append_struct_members(b, fields, value)?;
            b.append(valid);
        }
        other => unreachable!("no builder exists for {other:?}"),
    }
    Ok(())
}

fn append_value_to_struct_field(
    sb: &mut StructBuilder,
    index: usize,
    dt: &DataType,
    value: &Value,
) -> Result<(), ValueTypeError> {
    append_value_to_builder(&mut sb.field_builders_mut()[index], dt, value)
}
