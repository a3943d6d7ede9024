//! Input collections and the sources that turn them into rows or columns.

use arrow::record_batch::RecordBatch;
use localrel_arrow::{NumericArray, SessionTimezone, array_to_record_batch, frame_to_record_batch};
use localrel_core::{
    CanonicalRow, DataTypeDef, FieldDefs, Value, find_undetermined, infer_schema_from_rows,
    normalize_all,
};

use crate::{error::ConvertError, schema::ResolvedSchema};

/// Data handed to [`Converter::convert`](crate::Converter::convert).
#[derive(Debug, Clone)]
pub enum InputCollection {
    /// Mappings, named records, sequences, or bare scalars.
    Records(Vec<Value>),
    /// A tabular frame with typed columns.
    Frame(RecordBatch),
    /// A 1-D or 2-D homogeneous array.
    Array(NumericArray),
}

impl InputCollection {
    /// Number of top-level items: records, frame rows, or the array's first
    /// dimension.
    pub fn len(&self) -> usize {
        match self {
            Self::Records(items) => items.len(),
            Self::Frame(frame) => frame.num_rows(),
            Self::Array(array) => array.shape.first().copied().unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Records(_) => "records",
            Self::Frame(_) => "frame",
            Self::Array(_) => "array",
        }
    }
}

impl From<Vec<Value>> for InputCollection {
    fn from(value: Vec<Value>) -> Self {
        Self::Records(value)
    }
}

impl From<RecordBatch> for InputCollection {
    fn from(value: RecordBatch) -> Self {
        Self::Frame(value)
    }
}

impl From<NumericArray> for InputCollection {
    fn from(value: NumericArray) -> Self {
        Self::Array(value)
    }
}

/// What a [`RowSource`] hands to the materializer.
#[derive(Debug)]
pub enum Produced {
    /// Canonical rows and the schema to materialize them with.
    Rows {
        rows: Vec<CanonicalRow>,
        fields: FieldDefs,
    },
    /// A finished table and its schema.
    Columns { batch: RecordBatch, fields: FieldDefs },
}

/// Settings shared by every source during one conversion.
pub struct SourceContext<'a> {
    pub(crate) schema: &'a ResolvedSchema,
    pub session: &'a SessionTimezone,
}

impl SourceContext<'_> {
    /// Column names supplied as a name-only schema.
    pub fn names(&self) -> Option<&[String]> {
        self.schema.names.as_deref()
    }

    /// Declared struct schema, if any.
    pub fn declared_struct(&self) -> Option<&FieldDefs> {
        self.schema.declared_struct()
    }

    pub fn declared(&self) -> Option<&DataTypeDef> {
        self.schema.declared.as_ref()
    }
}

/// One input shape's path into the materializer.
pub trait RowSource {
    fn produce(self, ctx: &SourceContext<'_>) -> Result<Produced, ConvertError>;
}

/// Generic records: normalize, infer, merge.
///
/// Every item must have the shape of the first one: a mapping or named record,
/// a sequence, or a scalar. A declared struct schema types the columns; keyed
/// rows are then read by the declared field names.
pub struct RecordSource {
    items: Vec<Value>,
}

impl RecordSource {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl RowSource for RecordSource {
    fn produce(self, ctx: &SourceContext<'_>) -> Result<Produced, ConvertError> {
        check_item_shapes(&self.items)?;
        let rows = normalize_all(self.items, ctx.names());
        let inferred = infer_schema_from_rows(&rows)?;
        log::debug!(
            "inferred schema: {}",
            DataTypeDef::Struct(inferred.clone()).simple_string()
        );

        if let Some(path) = find_undetermined(&inferred) {
            log::warn!("failed to infer the schema from data");
            return match ctx.declared_struct() {
                Some(declared) => Ok(Produced::Rows {
                    rows,
                    fields: declared.clone(),
                }),
                None => Err(ConvertError::Undetermined { field: path }),
            };
        }

        let fields = match ctx.declared_struct() {
            Some(declared) if declared.len() != inferred.len() => {
                return Err(ConvertError::LengthMismatch {
                    expected: declared.len(),
                    actual: inferred.len(),
                });
            }
            Some(declared) => declared.clone(),
            None => inferred,
        };
        Ok(Produced::Rows { rows, fields })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemShape {
    Keyed,
    Sequence,
    Scalar,
}

impl ItemShape {
    fn of(item: &Value) -> Self {
        match item {
            Value::Map(_) | Value::Record(_) => Self::Keyed,
            Value::List(_) => Self::Sequence,
            _ => Self::Scalar,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Keyed => "mapping or record",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
        }
    }
}

fn check_item_shapes(items: &[Value]) -> Result<(), ConvertError> {
    let Some(first) = items.first().map(ItemShape::of) else {
        return Ok(());
    };
    match items
        .iter()
        .enumerate()
        .find(|(_, item)| ItemShape::of(item) != first)
    {
        Some((row, item)) => Err(ConvertError::MixedRowShapes {
            row,
            expected: first.describe(),
            actual: ItemShape::of(item).describe(),
        }),
        None => Ok(()),
    }
}

/// Tabular frames: per-column coercion, no inference.
pub struct FrameSource {
    frame: RecordBatch,
}

impl FrameSource {
    pub fn new(frame: RecordBatch) -> Self {
        Self { frame }
    }
}

impl RowSource for FrameSource {
    fn produce(self, ctx: &SourceContext<'_>) -> Result<Produced, ConvertError> {
        if let Some(atomic) = ctx.declared().filter(|dt| !matches!(dt, DataTypeDef::Struct(_))) {
            return Err(ConvertError::AtomicSchemaWithFrame(atomic.simple_string()));
        }
        let (batch, fields) =
            frame_to_record_batch(&self.frame, ctx.declared_struct(), ctx.session)?;
        Ok(Produced::Columns { batch, fields })
    }
}

/// Homogeneous arrays: split into columns, then cast to a declared struct.
pub struct ArraySource {
    array: NumericArray,
}

impl ArraySource {
    pub fn new(array: NumericArray) -> Self {
        Self { array }
    }
}

impl RowSource for ArraySource {
    fn produce(self, ctx: &SourceContext<'_>) -> Result<Produced, ConvertError> {
        let (batch, fields) = array_to_record_batch(&self.array, ctx.names(), ctx.session)?;
        let (batch, fields) = match ctx.declared_struct() {
            Some(declared) => frame_to_record_batch(&batch, Some(declared), ctx.session)?,
            None => (batch, fields),
        };
        Ok(Produced::Columns { batch, fields })
    }
}
