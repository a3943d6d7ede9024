use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int16Array, Int64Array, UInt8Array};
use localrel_arrow::{
    ArrowConvertError, NumericArray, SessionTimezone, array_to_record_batch,
    default_array_column_names,
};
use localrel_core::{DataTypeDef, FloatWidth};

fn int_values(n: i64) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(0..n))
}

#[test]
fn array_to_record_batch_splits_two_dimensional_arrays_by_column() {
    let array = NumericArray::new(vec![3, 2], int_values(6));
    let (batch, fields) = array_to_record_batch(&array, None, &SessionTimezone::utc()).unwrap();

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(fields.names(), vec!["_1", "_2"]);

    let first = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(&first.values()[..], &[0, 2, 4]);
    let second = batch
        .column(1)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(&second.values()[..], &[1, 3, 5]);
}

#[test]
fn array_to_record_batch_names_single_columns_value() {
    let values: ArrayRef = Arc::new(Float64Array::from(vec![1.0, 2.5]));
    let vector = NumericArray::vector(values.clone());
    let (batch, fields) = array_to_record_batch(&vector, None, &SessionTimezone::utc()).unwrap();
    assert_eq!(fields.names(), vec!["value"]);
    assert_eq!(
        fields[0].data_type(),
        &DataTypeDef::Float(FloatWidth::Double)
    );
    assert_eq!(batch.num_rows(), 2);

    let column = NumericArray::new(vec![2, 1], values);
    assert_eq!(default_array_column_names(&column), vec!["value"]);
}

#[test]
fn array_to_record_batch_uses_supplied_names() {
    let array = NumericArray::new(vec![2, 2], int_values(4));
    let names = vec!["x".to_string(), "y".to_string()];
    let (batch, _) = array_to_record_batch(&array, Some(&names), &SessionTimezone::utc()).unwrap();
    assert_eq!(batch.schema().field(1).name(), "y");
}

#[test]
fn array_to_record_batch_rejects_name_count_mismatch() {
    let array = NumericArray::new(vec![3, 2], int_values(6));
    let names = vec!["only".to_string()];

    let err = array_to_record_batch(&array, Some(&names), &SessionTimezone::utc()).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::LengthMismatch {
            expected: 1,
            actual: 2
        }
    ));
}

#[test]
fn array_to_record_batch_rejects_bad_dimensions_and_shapes() {
    let cube = NumericArray::new(vec![2, 2, 2], int_values(8));
    let err = array_to_record_batch(&cube, None, &SessionTimezone::utc()).unwrap_err();
    assert!(matches!(err, ArrowConvertError::InvalidDimensions { ndim: 3 }));

    let short = NumericArray::new(vec![3, 2], int_values(5));
    let err = array_to_record_batch(&short, None, &SessionTimezone::utc()).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::ShapeMismatch {
            expected: 6,
            actual: 5,
            ..
        }
    ));
}

#[test]
fn array_to_record_batch_widens_unsigned_values() {
    let values: ArrayRef = Arc::new(UInt8Array::from(vec![200, 201, 202, 203]));
    let array = NumericArray::new(vec![2, 2], values);
    let (batch, _) = array_to_record_batch(&array, None, &SessionTimezone::utc()).unwrap();

    let first = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int16Array>()
        .unwrap();
    assert_eq!(first.value(1), 202);
}
