use localrel_core::{CanonicalRow, SCALAR_COLUMN_NAME, Value, normalize};

fn names(row: &CanonicalRow) -> Vec<Option<&str>> {
    row.entries().iter().map(|e| e.name.as_deref()).collect()
}

#[test]
fn mapping_keys_are_sorted() {
    let row = normalize(Value::map([("b", Value::Int(1)), ("a", Value::Int(2))]), None);
    assert!(row.is_keyed());
    assert_eq!(names(&row), vec![Some("a"), Some("b")]);
    assert_eq!(row.entries()[0].value, Value::Int(2));
}

#[test]
fn named_record_keeps_declared_order() {
    let row = normalize(
        Value::record([("name", Value::string("Alice")), ("age", Value::Int(3))]),
        None,
    );
    assert!(row.is_keyed());
    assert_eq!(names(&row), vec![Some("name"), Some("age")]);
}

#[test]
fn sequence_pairs_with_supplied_names() {
    let cols = vec!["x".to_string(), "y".to_string()];
    let row = normalize(Value::List(vec![Value::Int(1), Value::Int(2)]), Some(&cols));
    assert!(!row.is_keyed());
    assert_eq!(names(&row), vec![Some("x"), Some("y")]);
}

#[test]
fn sequence_without_names_stays_positional() {
    let row = normalize(Value::List(vec![Value::Int(1), Value::Null]), None);
    assert_eq!(names(&row), vec![None, None]);
    assert_eq!(row.field_name(0), "_1");
    assert_eq!(row.field_name(1), "_2");
}

#[test]
fn scalar_is_wrapped_as_value_column() {
    let row = normalize(Value::Int(7), None);
    assert_eq!(row.len(), 1);
    assert_eq!(row.field_name(0), SCALAR_COLUMN_NAME);

    let cols = vec!["n".to_string()];
    let row = normalize(Value::Int(7), Some(&cols));
    assert_eq!(row.field_name(0), "n");
}

#[test]
fn value_for_reads_keyed_rows_by_name_and_positional_rows_by_index() {
    let keyed = normalize(Value::map([("b", Value::Int(1)), ("a", Value::Int(2))]), None);
    assert_eq!(keyed.value_for("b", 0), &Value::Int(1));
    assert_eq!(keyed.value_for("missing", 0), &Value::Null);

    let positional = normalize(Value::List(vec![Value::Int(5)]), None);
    assert_eq!(positional.value_for("anything", 0), &Value::Int(5));
    assert_eq!(positional.value_for("anything", 3), &Value::Null);
}
