//! Associative merge of inferred types.

use crate::schema::{DataTypeDef, ElementDef, FieldDef, FieldDefs};

/// Merge two inferred types into one.
///
/// - `Null` yields to the other side.
/// - integers widen to the larger width; integer with float yields the float.
/// - structs take the union of their fields in first-seen order.
/// - arrays merge their element types.
/// - any other disagreement is `Undetermined`, which then absorbs everything.
pub fn merge_types(a: &DataTypeDef, b: &DataTypeDef) -> DataTypeDef {
    use DataTypeDef::*;

    match (a, b) {
        (Undetermined, _) | (_, Undetermined) => Undetermined,
        (Null, other) | (other, Null) => other.clone(),
        (Int(w1), Int(w2)) => Int(*w1.max(w2)),
        (Float(w1), Float(w2)) => Float(*w1.max(w2)),
        (Int(_), Float(w)) | (Float(w), Int(_)) => Float(*w),
        (Array(e1), Array(e2)) => Array(Box::new(merge_elements(e1, e2))),
        (Struct(f1), Struct(f2)) => Struct(merge_field_defs(f1, f2)),
        (a, b) if a == b => a.clone(),
        _ => Undetermined,
    }
}

fn merge_elements(a: &ElementDef, b: &ElementDef) -> ElementDef {
    ElementDef::new(
        merge_types(&a.data_type, &b.data_type),
        merged_nullability(a, b),
    )
}

fn merged_nullability(a: &ElementDef, b: &ElementDef) -> bool {
    a.nullable
        || b.nullable
        || matches!(a.data_type, DataTypeDef::Null)
        || matches!(b.data_type, DataTypeDef::Null)
}

/// Merge two struct bodies field by field.
///
/// Fields are kept in first-seen order. A field present on only one side
/// becomes nullable.
pub fn merge_field_defs(a: &FieldDefs, b: &FieldDefs) -> FieldDefs {
    let mut merged: Vec<FieldDef> = a
        .iter()
        .map(|left| match b.find(&left.name) {
            Some(right) => FieldDef {
                name: left.name.clone(),
                element: merge_elements(&left.element, &right.element),
            },
            None => FieldDef::new(left.name.clone(), left.data_type().clone(), true),
        })
        .collect();

    merged.extend(
        b.iter()
            .filter(|right| a.find(&right.name).is_none())
            .map(|right| FieldDef::new(right.name.clone(), right.data_type().clone(), true)),
    );

    FieldDefs::new(merged)
}

/// Dotted path of the first field whose type could not be determined: an
/// all-null field, a merge conflict, or a composite containing either.
/// Array elements appear as `<field>.element`.
pub fn find_undetermined(fields: &FieldDefs) -> Option<String> {
    fields
        .iter()
        .find_map(|f| undetermined_path(f.data_type(), f.name.clone()))
}

fn undetermined_path(data_type: &DataTypeDef, path: String) -> Option<String> {
    match data_type {
        DataTypeDef::Null | DataTypeDef::Undetermined => Some(path),
        DataTypeDef::Array(elem) => undetermined_path(&elem.data_type, format!("{path}.element")),
        DataTypeDef::Struct(fields) => fields
            .iter()
            .find_map(|f| undetermined_path(f.data_type(), format!("{path}.{}", f.name))),
        _ => None,
    }
}
