//! Record normalization: every input item becomes a [`CanonicalRow`].

use std::sync::Arc;

use crate::value::Value;

/// Column name given to bare scalars when no names are supplied.
pub const SCALAR_COLUMN_NAME: &str = "value";

static NULL_VALUE: Value = Value::Null;

/// One `(name, value)` pair of a [`CanonicalRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowEntry {
    pub name: Option<Arc<str>>,
    pub value: Value,
}

/// Shape-independent row used for inference and materialization.
///
/// Keyed rows come from mappings and named records and are addressed by field
/// name. Positional rows come from sequences and scalars and are addressed by
/// index; their names, when present, were back-filled from a column-name list.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    entries: Vec<RowEntry>,
    keyed: bool,
}

impl CanonicalRow {
    pub fn keyed(entries: Vec<(Arc<str>, Value)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| RowEntry {
                    name: Some(name),
                    value,
                })
                .collect(),
            keyed: true,
        }
    }

    pub fn positional(values: Vec<Value>, names: Option<&[String]>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| RowEntry {
                name: names.and_then(|n| n.get(i)).map(|n| Arc::from(n.as_str())),
                value,
            })
            .collect();
        Self {
            entries,
            keyed: false,
        }
    }

    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_keyed(&self) -> bool {
        self.keyed
    }

    /// Name of the entry at `index`, synthesizing `_1`, `_2`, ... for unnamed entries.
    pub fn field_name(&self, index: usize) -> String {
        match self.entries.get(index).and_then(|e| e.name.as_deref()) {
            Some(name) => name.to_string(),
            None => format!("_{}", index + 1),
        }
    }

    /// Value addressed by a schema field: by name for keyed rows, by position
    /// otherwise. Absent fields read as `Null`.
    pub fn value_for(&self, name: &str, index: usize) -> &Value {
        let entry = if self.keyed {
            self.entries.iter().find(|e| e.name.as_deref() == Some(name))
        } else {
            self.entries.get(index)
        };
        entry.map_or(&NULL_VALUE, |e| &e.value)
    }
}

/// Classify one input item and reshape it into a [`CanonicalRow`].
///
/// - mappings are keyed with their keys sorted, so rows whose mappings were
///   built in different orders line up on the same fields;
/// - named records keep their declared field order;
/// - sequences stay positional, paired with `names` where given;
/// - anything else is a scalar wrapped as a one-column row named after
///   `names[0]`, or [`SCALAR_COLUMN_NAME`].
pub fn normalize(item: Value, names: Option<&[String]>) -> CanonicalRow {
    match item {
        Value::Map(mut entries) => {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            CanonicalRow::keyed(entries)
        }
        Value::Record(fields) => CanonicalRow::keyed(fields),
        Value::List(values) => CanonicalRow::positional(values, names),
        scalar => {
            let name = names
                .and_then(|n| n.first())
                .map_or(SCALAR_COLUMN_NAME, String::as_str);
            CanonicalRow {
                entries: vec![RowEntry {
                    name: Some(Arc::from(name)),
                    value: scalar,
                }],
                keyed: false,
            }
        }
    }
}

/// Normalize every item of a collection.
pub fn normalize_all(
    items: impl IntoIterator<Item = Value>,
    names: Option<&[String]>,
) -> Vec<CanonicalRow> {
    items.into_iter().map(|item| normalize(item, names)).collect()
}
