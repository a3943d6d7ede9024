use localrel_core::{DataTypeDef, FieldDef, FieldDefs, FloatWidth, IntWidth, SCALAR_COLUMN_NAME};
use localrel_ddl::parse_ddl;
use serde_json::{Value as Json, json};

use crate::error::ConvertError;

/// Schema supplied by the caller of [`Converter::convert`](crate::Converter::convert).
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSpec {
    /// Explicit struct: column names and types.
    Struct(FieldDefs),
    /// A single column of this type.
    Atomic(DataTypeDef),
    /// DDL text, e.g. `"a INT, b STRING"` or `"bigint"`.
    Ddl(String),
    /// Column names only; types are inferred.
    Names(Vec<String>),
}

impl From<FieldDefs> for SchemaSpec {
    fn from(value: FieldDefs) -> Self {
        Self::Struct(value)
    }
}

impl From<Vec<String>> for SchemaSpec {
    fn from(value: Vec<String>) -> Self {
        Self::Names(value)
    }
}

/// Schema attached to a converted relation.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDescriptor {
    Struct(FieldDefs),
    Atomic(DataTypeDef),
    /// The caller's DDL text, unchanged.
    Ddl(String),
}

impl SchemaDescriptor {
    /// Spark JSON for struct and atomic schemas; DDL text as given.
    pub fn to_json(&self) -> String {
        match self {
            Self::Struct(fields) => struct_json(fields).to_string(),
            Self::Atomic(data_type) => data_type_json(data_type).to_string(),
            Self::Ddl(text) => text.clone(),
        }
    }
}

fn data_type_json(data_type: &DataTypeDef) -> Json {
    match data_type {
        DataTypeDef::Null | DataTypeDef::Undetermined => json!("void"),
        DataTypeDef::Bool => json!("boolean"),
        DataTypeDef::Int(IntWidth::Byte) => json!("byte"),
        DataTypeDef::Int(IntWidth::Short) => json!("short"),
        DataTypeDef::Int(IntWidth::Int) => json!("integer"),
        DataTypeDef::Int(IntWidth::Long) => json!("long"),
        DataTypeDef::Float(FloatWidth::Single) => json!("float"),
        DataTypeDef::Float(FloatWidth::Double) => json!("double"),
        DataTypeDef::String => json!("string"),
        DataTypeDef::Bytes => json!("binary"),
        DataTypeDef::Timestamp(Some(_)) => json!("timestamp"),
        DataTypeDef::Timestamp(None) => json!("timestamp_ntz"),
        DataTypeDef::Array(elem) => json!({
            "type": "array",
            "elementType": data_type_json(&elem.data_type),
            "containsNull": elem.nullable,
        }),
        DataTypeDef::Struct(fields) => struct_json(fields),
    }
}

fn struct_json(fields: &FieldDefs) -> Json {
    let fields: Vec<Json> = fields
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "type": data_type_json(f.data_type()),
                "nullable": f.is_nullable(),
                "metadata": {},
            })
        })
        .collect();
    json!({ "type": "struct", "fields": fields })
}

/// Caller schema after DDL parsing.
#[derive(Debug, Default)]
pub(crate) struct ResolvedSchema {
    /// Declared type, from a struct, atomic, or DDL schema.
    pub declared: Option<DataTypeDef>,
    pub names: Option<Vec<String>>,
    pub descriptor: Option<SchemaDescriptor>,
}

impl ResolvedSchema {
    pub fn resolve(spec: Option<SchemaSpec>, session_tz: &str) -> Result<Self, ConvertError> {
        Ok(match spec {
            None => Self::default(),
            Some(SchemaSpec::Struct(fields)) => Self {
                declared: Some(DataTypeDef::Struct(fields.clone())),
                names: None,
                descriptor: Some(SchemaDescriptor::Struct(fields)),
            },
            Some(SchemaSpec::Atomic(data_type)) => Self {
                declared: Some(data_type.clone()),
                names: None,
                descriptor: Some(SchemaDescriptor::Atomic(data_type)),
            },
            Some(SchemaSpec::Ddl(text)) => Self {
                declared: Some(parse_ddl(&text, session_tz)?),
                names: None,
                descriptor: Some(SchemaDescriptor::Ddl(text)),
            },
            Some(SchemaSpec::Names(names)) => Self {
                declared: None,
                names: Some(names),
                descriptor: None,
            },
        })
    }

    pub fn declared_struct(&self) -> Option<&FieldDefs> {
        match &self.declared {
            Some(DataTypeDef::Struct(fields)) => Some(fields),
            _ => None,
        }
    }

    /// Column count the caller committed to, if any.
    pub fn expected_columns(&self) -> Option<usize> {
        match (&self.declared, &self.names) {
            (Some(DataTypeDef::Struct(fields)), _) => Some(fields.len()),
            (Some(_), _) => Some(1),
            (None, Some(names)) => Some(names.len()),
            (None, None) => None,
        }
    }

    /// Final output column names, if the caller fixed them.
    pub fn column_names(&self) -> Option<Vec<String>> {
        match (&self.declared, &self.names) {
            (Some(DataTypeDef::Struct(fields)), _) => {
                Some(fields.iter().map(|f| f.name.clone()).collect())
            }
            (None, Some(names)) if !names.is_empty() => Some(names.clone()),
            _ => None,
        }
    }

    /// Fields of a zero-row table: the declared struct, or a single `value`
    /// column of the declared atomic type.
    pub fn empty_table_fields(&self) -> Option<FieldDefs> {
        match &self.declared {
            Some(DataTypeDef::Struct(fields)) => Some(fields.clone()),
            Some(atomic) => {
                Some(vec![FieldDef::new(SCALAR_COLUMN_NAME, atomic.clone(), true)].into())
            }
            None => None,
        }
    }
}
