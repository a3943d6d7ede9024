use arrow::datatypes::{DataType, TimeUnit};
use localrel_core::{Value, ValueTypeError};

pub(super) enum ScalarValue<'a> {
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Utf8(Option<&'a str>),
    Binary(Option<&'a [u8]>),
    TimestampMicrosecond(Option<i64>),
}

/// Coerce `value` into the scalar representation of `dt`.
///
/// Returns `Ok(None)` for composite types, which are handled by the caller.
/// Integers are narrowed with a range check and widened into floats.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: &'a Value,
) -> Result<Option<ScalarValue<'a>>, ValueTypeError> {
    Ok(Some(match dt {
        DataType::Null => match value {
            Value::Null => ScalarValue::Null,
            other => return Err(other.type_mismatch("Null")),
        },
        DataType::Boolean => ScalarValue::Boolean(value.try_bool()?),
        DataType::Int8 => ScalarValue::Int8(value.try_int("Int8")?),
        DataType::Int16 => ScalarValue::Int16(value.try_int("Int16")?),
        DataType::Int32 => ScalarValue::Int32(value.try_int("Int32")?),
        DataType::Int64 => ScalarValue::Int64(value.try_i64()?),
        DataType::Float32 => ScalarValue::Float32(value.try_f64()?.map(|v| v as f32)),
        DataType::Float64 => ScalarValue::Float64(value.try_f64()?),
        DataType::Utf8 => ScalarValue::Utf8(value.try_str()?),
        DataType::Binary => ScalarValue::Binary(value.try_bytes()?),
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            ScalarValue::TimestampMicrosecond(value.try_timestamp_micros()?)
        }
        _ => return Ok(None),
    }))
}
