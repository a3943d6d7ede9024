//! Row view over a materialized table.

use std::sync::Arc;

use arrow::{
    array::{Array, AsArray},
    datatypes::{
        DataType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, TimeUnit,
        TimestampMicrosecondType,
    },
    record_batch::RecordBatch,
};
use localrel_core::Value;

use crate::error::ArrowConvertError;

/// Read a table back into one [`Value::Record`] per row, fields in column
/// order. Struct columns become records and list columns become lists.
///
/// Only types produced by this crate are readable; anything else is
/// [`ArrowConvertError::UnsupportedType`].
pub fn record_batch_to_rows(batch: &RecordBatch) -> Result<Vec<Value>, ArrowConvertError> {
    let schema = batch.schema();
    let names: Vec<Arc<str>> = schema
        .fields()
        .iter()
        .map(|f| Arc::from(f.name().as_str()))
        .collect();

    (0..batch.num_rows())
        .map(|row| {
            names
                .iter()
                .zip(batch.columns())
                .map(|(name, column)| Ok((name.clone(), array_value(name, column.as_ref(), row)?)))
                .collect::<Result<Vec<_>, ArrowConvertError>>()
                .map(Value::Record)
        })
        .collect()
}

fn array_value(name: &str, array: &dyn Array, i: usize) -> Result<Value, ArrowConvertError> {
    if array.is_null(i) {
        return Ok(Value::Null);
    }
    Ok(match array.data_type() {
        DataType::Null => Value::Null,
        DataType::Boolean => Value::Bool(array.as_boolean().value(i)),
        DataType::Int8 => Value::Int(array.as_primitive::<Int8Type>().value(i).into()),
        DataType::Int16 => Value::Int(array.as_primitive::<Int16Type>().value(i).into()),
        DataType::Int32 => Value::Int(array.as_primitive::<Int32Type>().value(i).into()),
        DataType::Int64 => Value::Int(array.as_primitive::<Int64Type>().value(i)),
        DataType::Float32 => Value::Float(array.as_primitive::<Float32Type>().value(i).into()),
        DataType::Float64 => Value::Float(array.as_primitive::<Float64Type>().value(i)),
        DataType::Utf8 => Value::string(array.as_string::<i32>().value(i)),
        DataType::Binary => Value::bytes(array.as_binary::<i32>().value(i)),
        DataType::Timestamp(TimeUnit::Microsecond, tz) => Value::Timestamp {
            micros: array.as_primitive::<TimestampMicrosecondType>().value(i),
            tz: tz.clone(),
        },
        DataType::List(_) => {
            let items = array.as_list::<i32>().value(i);
            (0..items.len())
                .map(|j| array_value(name, items.as_ref(), j))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)?
        }
        DataType::Struct(fields) => {
            let st = array.as_struct();
            fields
                .iter()
                .zip(st.columns())
                .map(|(f, child)| {
                    Ok((
                        Arc::from(f.name().as_str()),
                        array_value(name, child.as_ref(), i)?,
                    ))
                })
                .collect::<Result<Vec<_>, ArrowConvertError>>()
                .map(Value::Record)?
        }
        other => {
            return Err(ArrowConvertError::UnsupportedType {
                field: name.to_string(),
                data_type: other.clone(),
            });
        }
    })
}
