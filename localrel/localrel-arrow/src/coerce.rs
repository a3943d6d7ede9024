//! Column coercion for frame and array inputs.
//!
//! Every column handed to a table goes through [`coerce_column`] (no declared
//! type) or [`cast_column`] (declared type) so that the table only carries
//! types the schema IR can describe.

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, TimestampMicrosecondArray},
    compute::kernels::cast::{CastOptions, cast_with_options},
    datatypes::{DataType, Int32Type, Int64Type, TimeUnit},
    error::ArrowError,
};

use crate::{error::ArrowConvertError, timezone::SessionTimezone};

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Coerce a column to its table type when no type was declared.
///
/// | source                          | result                          |
/// |---------------------------------|---------------------------------|
/// | `UInt8` / `UInt16` / `UInt32`   | `Int16` / `Int32` / `Int64`     |
/// | `UInt64`                        | `Int64` (overflow is an error)  |
/// | `Float16`                       | `Float32`                       |
/// | `LargeUtf8`, `Utf8View`         | `Utf8`                          |
/// | `LargeBinary`, `BinaryView`     | `Binary`                        |
/// | `Dictionary(_, v)`              | coerced `v`                     |
/// | `Timestamp`, `Date32`, `Date64` | `Timestamp(µs, session tz)`     |
///
/// Naive timestamps and dates are read as wall-clock times in `session`;
/// timezone-aware timestamps keep their instant. Other types pass through.
pub fn coerce_column(
    name: &str,
    array: &ArrayRef,
    session: &SessionTimezone,
) -> Result<ArrayRef, ArrowConvertError> {
    let target = match array.data_type() {
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => {
            return temporal_to_timestamp(name, array, Some(session.name().clone()), session);
        }
        DataType::UInt8 => DataType::Int16,
        DataType::UInt16 => DataType::Int32,
        DataType::UInt32 | DataType::UInt64 => DataType::Int64,
        DataType::Float16 => DataType::Float32,
        DataType::LargeUtf8 | DataType::Utf8View => DataType::Utf8,
        DataType::LargeBinary | DataType::BinaryView => DataType::Binary,
        DataType::Dictionary(_, value_type) => {
            let decoded = checked_cast(name, array, value_type)?;
            return coerce_column(name, &decoded, session);
        }
        _ => return Ok(array.clone()),
    };
    checked_cast(name, array, &target)
}

/// Cast a column to a declared type.
///
/// Temporal sources headed for a timestamp type follow the same wall-clock
/// rules as [`coerce_column`]; everything else uses the Arrow cast kernel,
/// with lossy conversions reported as errors.
pub fn cast_column(
    name: &str,
    array: &ArrayRef,
    target: &DataType,
    session: &SessionTimezone,
) -> Result<ArrayRef, ArrowConvertError> {
    if array.data_type() == target {
        return Ok(array.clone());
    }
    match (array.data_type(), target) {
        (
            DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64,
            DataType::Timestamp(TimeUnit::Microsecond, tz),
        ) => temporal_to_timestamp(name, array, tz.clone(), session),
        (DataType::Dictionary(_, value_type), _) => {
            let decoded = checked_cast(name, array, value_type)?;
            cast_column(name, &decoded, target, session)
        }
        _ => checked_cast(name, array, target),
    }
}

fn checked_cast(
    name: &str,
    array: &ArrayRef,
    target: &DataType,
) -> Result<ArrayRef, ArrowConvertError> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array, target, &options).map_err(|source| ArrowConvertError::Cast {
        field: name.to_string(),
        from: array.data_type().clone(),
        to: target.clone(),
        source,
    })
}

/// Microsecond timestamps tagged with `target_tz`.
///
/// With a target zone, naive inputs are shifted from session wall-clock time
/// to UTC. Without one, aware inputs are shifted from UTC to session
/// wall-clock time.
fn temporal_to_timestamp(
    name: &str,
    array: &ArrayRef,
    target_tz: Option<Arc<str>>,
    session: &SessionTimezone,
) -> Result<ArrayRef, ArrowConvertError> {
    let overflow = |micros: i64| ArrowConvertError::Cast {
        field: name.to_string(),
        from: array.data_type().clone(),
        to: DataType::Timestamp(TimeUnit::Microsecond, target_tz.clone()),
        source: ArrowError::ComputeError(format!("{micros} overflows a microsecond timestamp")),
    };

    let (raw, naive): (Vec<Option<i64>>, bool) = match array.data_type() {
        DataType::Date32 => {
            let days = checked_cast(name, array, &DataType::Int32)?;
            let micros = days
                .as_primitive::<Int32Type>()
                .iter()
                .map(|d| {
                    d.map(|d| {
                        i64::from(d)
                            .checked_mul(MICROS_PER_DAY)
                            .ok_or_else(|| overflow(i64::from(d)))
                    })
                    .transpose()
                })
                .collect::<Result<_, _>>()?;
            (micros, true)
        }
        DataType::Date64 => {
            let millis = checked_cast(name, array, &DataType::Int64)?;
            (scale(&millis, TimeUnit::Millisecond, overflow)?, true)
        }
        DataType::Timestamp(unit, tz) => {
            let values = checked_cast(name, array, &DataType::Int64)?;
            (scale(&values, *unit, overflow)?, tz.is_none())
        }
        other => {
            return Err(ArrowConvertError::UnsupportedType {
                field: name.to_string(),
                data_type: other.clone(),
            });
        }
    };

    type Shift = fn(&SessionTimezone, i64) -> Option<i64>;
    let shift: Option<Shift> = match (naive, target_tz.is_some()) {
        (true, true) => Some(SessionTimezone::local_micros_to_utc),
        (false, false) => Some(SessionTimezone::utc_micros_to_local),
        _ => None,
    };
    let values = match shift {
        Some(shift) => raw
            .into_iter()
            .map(|v| {
                v.map(|micros| {
                    shift(session, micros).ok_or_else(|| ArrowConvertError::NonexistentLocalTime {
                        field: name.to_string(),
                        tz: session.to_string(),
                    })
                })
                .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => raw,
    };

    Ok(Arc::new(
        TimestampMicrosecondArray::from(values).with_timezone_opt(target_tz),
    ))
}

fn scale(
    values: &ArrayRef,
    unit: TimeUnit,
    overflow: impl Fn(i64) -> ArrowConvertError,
) -> Result<Vec<Option<i64>>, ArrowConvertError> {
    values
        .as_primitive::<Int64Type>()
        .iter()
        .map(|v| {
            v.map(|v| match unit {
                TimeUnit::Second => v.checked_mul(1_000_000).ok_or_else(|| overflow(v)),
                TimeUnit::Millisecond => v.checked_mul(1_000).ok_or_else(|| overflow(v)),
                TimeUnit::Microsecond => Ok(v),
                TimeUnit::Nanosecond => Ok(v.div_euclid(1_000)),
            })
            .transpose()
        })
        .collect()
}
