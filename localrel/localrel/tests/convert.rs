use std::sync::Arc;

use arrow::{
    array::{
        Array, ArrayRef, Float64Array, Int8Array, Int16Array, Int32Array, Int64Array,
        StringArray, TimestampMicrosecondArray, TimestampNanosecondArray,
    },
    datatypes::DataType,
    record_batch::RecordBatch,
};
use localrel::{
    ConvertError, Converter, ErrorKind, InputCollection, SchemaDescriptor, SchemaSpec,
    arrow::{ArrowConvertError, NumericArray, record_batch_to_rows},
    core::{
        CanonicalRow, DataTypeDef, FieldDef, FieldDefs, FloatWidth, IntWidth, Value,
        infer_schema_from_rows, normalize,
    },
};

fn people_schema() -> FieldDefs {
    vec![
        FieldDef::new("name", DataTypeDef::String, false),
        FieldDef::new("age", DataTypeDef::Int(IntWidth::Long), false),
        FieldDef::new("score", DataTypeDef::Float(FloatWidth::Double), false),
    ]
    .into()
}

fn tuple(values: Vec<Value>) -> Value {
    Value::List(values)
}

#[test]
fn homogeneous_rows_infer_one_type_per_field() {
    let data = vec![
        tuple(vec![Value::string("a"), Value::Bool(true)]),
        tuple(vec![Value::string("b"), Value::Bool(false)]),
        tuple(vec![Value::string("c"), Value::Bool(true)]),
    ];
    let converted = Converter::new().convert(data, None).unwrap();

    assert_eq!(converted.fields.names(), vec!["_1", "_2"]);
    assert_eq!(converted.fields[0].data_type(), &DataTypeDef::String);
    assert_eq!(converted.fields[1].data_type(), &DataTypeDef::Bool);
    assert!(!converted.fields[0].is_nullable());
    assert_eq!(converted.table.num_rows(), 3);
    assert!(converted.schema.is_none());
}

#[test]
fn nulls_are_absorbed_and_mark_fields_nullable() {
    let data = vec![
        Value::map([("x", Value::Null)]),
        Value::map([("x", Value::Int(5))]),
    ];
    let converted = Converter::new().convert(data, None).unwrap();

    assert_eq!(
        converted.fields[0].data_type(),
        &DataTypeDef::Int(IntWidth::Byte)
    );
    assert!(converted.fields[0].is_nullable());

    let x = converted
        .table
        .column(0)
        .as_any()
        .downcast_ref::<Int8Array>()
        .unwrap();
    assert!(x.is_null(0));
    assert_eq!(x.value(1), 5);
}

#[test]
fn materialized_table_reinfers_to_a_compatible_schema() {
    let data = vec![
        Value::map([
            ("id", Value::Int(1)),
            ("tags", Value::List(vec![Value::string("x")])),
            ("pos", Value::record([("lat", Value::Float(1.0)), ("lon", Value::Float(2.0))])),
        ]),
        Value::map([
            ("id", Value::Int(70_000)),
            ("tags", Value::List(vec![Value::string("y"), Value::Null])),
            ("pos", Value::Null),
        ]),
    ];
    let converted = Converter::new().convert(data, None).unwrap();

    let rows: Vec<CanonicalRow> = record_batch_to_rows(&converted.table)
        .unwrap()
        .into_iter()
        .map(|v| normalize(v, None))
        .collect();
    let reinferred = infer_schema_from_rows(&rows).unwrap();

    assert_eq!(reinferred.names(), converted.fields.names());
    assert_eq!(
        converted.fields[0].data_type(),
        &DataTypeDef::Int(IntWidth::Int)
    );
    assert_eq!(
        reinferred[0].data_type(),
        &DataTypeDef::Int(IntWidth::Int)
    );
    assert_eq!(reinferred[1].data_type(), converted.fields[1].data_type());
    assert_eq!(reinferred[2].data_type(), converted.fields[2].data_type());
}

#[test]
fn declared_struct_with_wrong_column_count_is_a_cardinality_error() {
    let data = vec![tuple(vec![Value::string("a"), Value::Int(1)])];
    let err = Converter::new()
        .convert(data, Some(SchemaSpec::Struct(people_schema())))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cardinality);
    assert!(matches!(
        err,
        ConvertError::LengthMismatch {
            expected: 3,
            actual: 2
        }
    ));
    let message = err.to_string();
    assert!(message.contains('3') && message.contains('2'));
}

#[test]
fn empty_input_needs_an_explicit_schema() {
    let err = Converter::new().convert(Vec::<Value>::new(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    assert_eq!(err.to_string(), "can not infer schema from empty dataset");

    let err = Converter::new()
        .convert(
            Vec::<Value>::new(),
            Some(SchemaSpec::Names(vec!["a".to_string()])),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let converted = Converter::new()
        .convert(Vec::<Value>::new(), Some(SchemaSpec::Struct(people_schema())))
        .unwrap();
    assert_eq!(converted.table.num_rows(), 0);
    assert_eq!(converted.table.num_columns(), 3);
    assert_eq!(converted.fields, people_schema());
    assert_eq!(
        converted.schema,
        Some(SchemaDescriptor::Struct(people_schema()))
    );
}

#[test]
fn empty_input_with_atomic_schema_yields_value_column() {
    let converted = Converter::new()
        .convert(
            Vec::<Value>::new(),
            Some(SchemaSpec::Atomic(DataTypeDef::Int(IntWidth::Int))),
        )
        .unwrap();
    assert_eq!(converted.table.schema().field(0).name(), "value");
    assert_eq!(converted.table.schema().field(0).data_type(), &DataType::Int32);
}

#[test]
fn mapping_keys_are_sorted_per_row() {
    let data = vec![
        Value::map([("b", Value::Int(1)), ("a", Value::Int(2))]),
        Value::map([("a", Value::Int(3)), ("b", Value::Int(4))]),
    ];
    let converted = Converter::new().convert(data, None).unwrap();

    assert_eq!(converted.fields.names(), vec!["a", "b"]);
    assert_eq!(converted.table.num_rows(), 2);
    assert_eq!(converted.table.num_columns(), 2);

    let a = converted
        .table
        .column(0)
        .as_any()
        .downcast_ref::<Int8Array>()
        .unwrap();
    let b = converted
        .table
        .column(1)
        .as_any()
        .downcast_ref::<Int8Array>()
        .unwrap();
    assert_eq!((a.value(0), b.value(0)), (2, 1));
    assert_eq!((a.value(1), b.value(1)), (3, 4));
}

#[test]
fn two_dimensional_arrays_get_positional_column_names() {
    let values: ArrayRef = Arc::new(Int64Array::from_iter_values(0..6));
    let array = NumericArray::new(vec![3, 2], values);

    let converted = Converter::new().convert(array.clone(), None).unwrap();
    assert_eq!(converted.fields.names(), vec!["_1", "_2"]);
    assert_eq!(converted.table.num_rows(), 3);

    let err = Converter::new()
        .convert(array, Some(SchemaSpec::Names(vec!["only".to_string()])))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cardinality);
    assert!(err.to_string().starts_with("Length mismatch"));
}

#[test]
fn array_dimensions_are_validated() {
    let values: ArrayRef = Arc::new(Int64Array::from_iter_values(0..8));
    let err = Converter::new()
        .convert(NumericArray::new(vec![2, 2, 2], values), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    // a zero-dimensional array is not an empty collection
    let scalar: ArrayRef = Arc::new(Int64Array::from(vec![7]));
    let array = NumericArray::new(vec![], scalar);
    let err = Converter::new()
        .convert(array.clone(), Some(SchemaSpec::Ddl("v bigint".to_string())))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    let err = Converter::new().convert(array, None).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Arrow(ArrowConvertError::InvalidDimensions { ndim: 0 })
    ));

    let empty: ArrayRef = Arc::new(Int64Array::from(Vec::<i64>::new()));
    let converted = Converter::new()
        .convert(
            NumericArray::new(vec![0, 2], empty),
            Some(SchemaSpec::Ddl("x bigint, y bigint".to_string())),
        )
        .unwrap();
    assert_eq!(converted.table.num_rows(), 0);
}

#[test]
fn arrays_are_cast_to_a_declared_struct() {
    let values: ArrayRef = Arc::new(Int64Array::from_iter_values(0..4));
    let converted = Converter::new()
        .convert(
            NumericArray::new(vec![2, 2], values),
            Some(SchemaSpec::Ddl("x int, y double".to_string())),
        )
        .unwrap();

    assert_eq!(converted.fields.names(), vec!["x", "y"]);
    let x = converted
        .table
        .column(0)
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    let y = converted
        .table
        .column(1)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!((x.value(1), y.value(1)), (2, 3.0));
}

#[test]
fn all_null_fields_fall_back_to_a_declared_struct() {
    let data = vec![tuple(vec![
        Value::string("Alice"),
        Value::Null,
        Value::Float(80.1),
    ])];

    let err = Converter::new().convert(data.clone(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InferenceConflict);
    assert!(err.to_string().contains("'_2'"));

    let err = Converter::new()
        .convert(
            data.clone(),
            Some(SchemaSpec::Atomic(DataTypeDef::String)),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InferenceConflict);

    let converted = Converter::new()
        .convert(data, Some(SchemaSpec::Struct(people_schema())))
        .unwrap();
    assert_eq!(converted.fields, people_schema());
    let age = converted
        .table
        .column(1)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert!(age.is_null(0));
    let score = converted
        .table
        .column(2)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(score.value(0), 80.1);
}

#[test]
fn type_conflicts_fall_back_to_a_declared_ddl_struct() {
    let data = vec![
        tuple(vec![Value::string("x")]),
        tuple(vec![Value::Bool(true)]),
    ];
    let err = Converter::new().convert(data.clone(), None).unwrap_err();
    assert!(matches!(err, ConvertError::Undetermined { ref field } if field == "_1"));

    // the declared type still has to hold every value
    let err = Converter::new()
        .convert(data, Some(SchemaSpec::Ddl("v string".to_string())))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Coercion);
}

#[test]
fn declared_struct_types_record_columns() {
    let data = vec![tuple(vec![Value::string("Bob"), Value::Int(30), Value::Float(1.5)])];
    let converted = Converter::new()
        .convert(data, Some(SchemaSpec::Struct(people_schema())))
        .unwrap();

    assert_eq!(converted.fields, people_schema());
    assert_eq!(converted.table.schema().field(0).name(), "name");
    assert_eq!(
        converted.table.schema().field(1).data_type(),
        &DataType::Int64
    );
    let age = converted
        .table
        .column(1)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(age.value(0), 30);
}

#[test]
fn declared_struct_reads_mappings_by_field_name() {
    let data = vec![
        Value::map([("b", Value::Int(1)), ("a", Value::string("x"))]),
        Value::map([("a", Value::string("y")), ("b", Value::Int(2))]),
    ];
    let converted = Converter::new()
        .convert(data, Some(SchemaSpec::Ddl("b bigint, a string".to_string())))
        .unwrap();

    assert_eq!(converted.fields.names(), vec!["b", "a"]);
    let b = converted
        .table
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    let a = converted
        .table
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!((b.value(0), a.value(0)), (1, "x"));
    assert_eq!((b.value(1), a.value(1)), (2, "y"));

    let err = Converter::new()
        .convert(
            vec![Value::map([("a", Value::Int(1))])],
            Some(SchemaSpec::Ddl("a bigint, b bigint".to_string())),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::LengthMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn records_must_share_the_first_row_shape() {
    let data = vec![
        Value::map([("a", Value::Int(1)), ("b", Value::Int(2))]),
        tuple(vec![Value::Int(3), Value::Int(4)]),
    ];
    let err = Converter::new().convert(data, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    assert!(matches!(
        err,
        ConvertError::MixedRowShapes {
            row: 1,
            expected: "mapping or record",
            actual: "sequence"
        }
    ));

    let data = vec![tuple(vec![Value::Int(1)]), Value::Int(2)];
    let err = Converter::new().convert(data, None).unwrap_err();
    assert_eq!(err.to_string(), "row 1 is a scalar but the first row is a sequence");

    // mappings and named records are both keyed
    let data = vec![
        Value::map([("a", Value::Int(1))]),
        Value::record([("a", Value::Int(2))]),
    ];
    let converted = Converter::new().convert(data, None).unwrap();
    assert_eq!(converted.table.num_rows(), 2);
}

#[test]
fn names_schema_names_columns_and_checks_count() {
    let data = vec![Value::Int(1), Value::Int(2)];
    let converted = Converter::new()
        .convert(data.clone(), Some(SchemaSpec::Names(vec!["n".to_string()])))
        .unwrap();
    assert_eq!(converted.table.schema().field(0).name(), "n");
    assert!(converted.schema.is_none());

    let err = Converter::new()
        .convert(
            data,
            Some(SchemaSpec::Names(vec!["n".to_string(), "m".to_string()])),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::LengthMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn scalars_become_a_value_column() {
    let data = vec![Value::string("a"), Value::Null, Value::string("c")];
    let converted = Converter::new().convert(data, None).unwrap();

    assert_eq!(converted.fields.names(), vec!["value"]);
    let value = converted
        .table
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(value.is_null(1));
    assert_eq!(value.value(2), "c");
}

#[test]
fn frames_use_the_session_timezone() {
    let frame = RecordBatch::try_from_iter(vec![
        ("id", Arc::new(Int32Array::from(vec![1])) as ArrayRef),
        (
            "at",
            Arc::new(TimestampNanosecondArray::from(vec![0_i64])) as ArrayRef,
        ),
    ])
    .unwrap();
    let converter = Converter::builder()
        .with_session_timezone("+01:00")
        .build()
        .unwrap();

    let converted = converter.convert(frame.clone(), None).unwrap();
    let at = converted
        .table
        .column(1)
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .unwrap();
    assert_eq!(at.value(0), -3_600_000_000);
    assert_eq!(at.timezone(), Some("+01:00"));

    let converted = converter
        .convert(
            frame.clone(),
            Some(SchemaSpec::Ddl("key smallint, ts timestamp".to_string())),
        )
        .unwrap();
    assert_eq!(converted.fields.names(), vec!["key", "ts"]);
    let key = converted
        .table
        .column(0)
        .as_any()
        .downcast_ref::<Int16Array>()
        .unwrap();
    assert_eq!(key.value(0), 1);

    let err = converter
        .convert(frame, Some(SchemaSpec::Atomic(DataTypeDef::String)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn invalid_inputs_are_classified() {
    let err = Converter::builder()
        .with_session_timezone("Nowhere/Special")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let err = Converter::new()
        .convert(
            vec![Value::Int(1)],
            Some(SchemaSpec::Ddl("a int,".to_string())),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let err = Converter::new()
        .convert(
            vec![tuple(vec![Value::Int(1)]), tuple(vec![Value::string("x")])],
            Some(SchemaSpec::Struct(
                vec![FieldDef::new("a", DataTypeDef::Int(IntWidth::Long), true)].into(),
            )),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Coercion);
}

#[test]
fn input_collection_reports_length() {
    let records = InputCollection::from(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(records.len(), 2);

    let values: ArrayRef = Arc::new(Int64Array::from_iter_values(0..6));
    let array = InputCollection::from(NumericArray::new(vec![3, 2], values));
    assert_eq!(array.len(), 3);
    assert!(!array.is_empty());
}
