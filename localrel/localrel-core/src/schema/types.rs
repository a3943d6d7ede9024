use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result},
    ops::Deref,
    sync::Arc,
};

use crate::error::InferError;

/// Signed integer widths, ordered narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntWidth {
    Byte,
    Short,
    Int,
    Long,
}

impl IntWidth {
    /// Narrowest width that holds `v`.
    pub fn fitting(v: i64) -> Self {
        if i8::try_from(v).is_ok() {
            IntWidth::Byte
        } else if i16::try_from(v).is_ok() {
            IntWidth::Short
        } else if i32::try_from(v).is_ok() {
            IntWidth::Int
        } else {
            IntWidth::Long
        }
    }
}

/// Floating point widths, ordered narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloatWidth {
    Single,
    Double,
}

/// Arrow-independent data type definition for schema intermediate representation.
///
/// `Undetermined` is never produced by inference of a single value; it is the
/// result of merging two types that cannot be reconciled.
#[derive(Debug, Clone, PartialEq)]
pub enum DataTypeDef {
    Null,
    Bool,
    Int(IntWidth),
    Float(FloatWidth),
    String,
    Bytes,
    Timestamp(Option<Arc<str>>),
    Array(Box<ElementDef>),
    Struct(FieldDefs),
    Undetermined,
}

impl DataTypeDef {
    pub fn array(element: DataTypeDef, nullable: bool) -> Self {
        DataTypeDef::Array(Box::new(ElementDef::new(element, nullable)))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, DataTypeDef::Struct(_) | DataTypeDef::Array(_))
    }

    /// `true` when this type, or any type nested in it, is `Null` or `Undetermined`.
    pub fn is_undetermined(&self) -> bool {
        match self {
            DataTypeDef::Null | DataTypeDef::Undetermined => true,
            DataTypeDef::Array(elem) => elem.data_type.is_undetermined(),
            DataTypeDef::Struct(fields) => fields.iter().any(|f| f.element.data_type.is_undetermined()),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DataTypeDef::Null => "void",
            DataTypeDef::Bool => "boolean",
            DataTypeDef::Int(IntWidth::Byte) => "tinyint",
            DataTypeDef::Int(IntWidth::Short) => "smallint",
            DataTypeDef::Int(IntWidth::Int) => "int",
            DataTypeDef::Int(IntWidth::Long) => "bigint",
            DataTypeDef::Float(FloatWidth::Single) => "float",
            DataTypeDef::Float(FloatWidth::Double) => "double",
            DataTypeDef::String => "string",
            DataTypeDef::Bytes => "binary",
            DataTypeDef::Timestamp(Some(_)) => "timestamp",
            DataTypeDef::Timestamp(None) => "timestamp_ntz",
            DataTypeDef::Array(_) => "array",
            DataTypeDef::Struct(_) => "struct",
            DataTypeDef::Undetermined => "undetermined",
        }
    }

    /// Compact type string, e.g. `struct<a:bigint,b:array<string>>`.
    pub fn simple_string(&self) -> String {
        match self {
            DataTypeDef::Array(elem) => format!("array<{}>", elem.data_type.simple_string()),
            DataTypeDef::Struct(fields) => {
                let members: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{}:{}", f.name, f.element.data_type.simple_string()))
                    .collect();
                format!("struct<{}>", members.join(","))
            }
            other => other.type_name().to_string(),
        }
    }
}

impl Display for DataTypeDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.simple_string())
    }
}

/// Typed collection of [`FieldDef`] used for schema bodies and struct members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDefs(pub Vec<FieldDef>);

impl FieldDefs {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self(fields)
    }

    /// Like [`new`](Self::new), rejecting duplicate field names.
    pub fn try_new(fields: Vec<FieldDef>) -> std::result::Result<Self, InferError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(InferError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self(fields))
    }

    pub fn as_slice(&self) -> &[FieldDef] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.0.iter()
    }

    pub fn find(&self, name: &str) -> Option<&FieldDef> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.name.as_str()).collect()
    }

    /// Same types, new names. `names` must have one entry per field.
    pub fn renamed<S: AsRef<str>>(&self, names: &[S]) -> Self {
        Self(
            self.0
                .iter()
                .zip(names)
                .map(|(f, name)| FieldDef {
                    name: name.as_ref().to_string(),
                    element: f.element.clone(),
                })
                .collect(),
        )
    }
}

impl From<Vec<FieldDef>> for FieldDefs {
    fn from(value: Vec<FieldDef>) -> Self {
        Self(value)
    }
}

impl From<FieldDefs> for Vec<FieldDef> {
    fn from(value: FieldDefs) -> Self {
        value.0
    }
}

impl AsRef<[FieldDef]> for FieldDefs {
    fn as_ref(&self) -> &[FieldDef] {
        self.as_slice()
    }
}

impl Deref for FieldDefs {
    type Target = [FieldDef];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Display for FieldDefs {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_field_defs(self.as_slice())?;
        f.write_str(&text)
    }
}

/// Arrow-independent nested element definition used in composite types.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    pub data_type: DataTypeDef,
    pub nullable: bool,
}

impl ElementDef {
    pub fn new(data_type: DataTypeDef, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }
}

/// Arrow-independent field definition for schema intermediate representation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub element: ElementDef,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, data_type: DataTypeDef, nullable: bool) -> Self {
        Self {
            name: name.into(),
            element: ElementDef::new(data_type, nullable),
        }
    }

    pub fn data_type(&self) -> &DataTypeDef {
        &self.element.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.element.nullable
    }
}
