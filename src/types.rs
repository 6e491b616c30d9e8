use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldLayout {
    pub structure: String,
    pub field: String,
    pub type_name: String,
    pub offset: u64,
    pub width: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructLayout {
    pub name: String,
    pub size: u64,
    pub alignment: u64,
    pub fields: Vec<FieldLayout>,
    pub metrics: LayoutMetrics,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LayoutMetrics {
    pub total_size: u64,
    /// Bytes covered by at least one probed field.
    pub covered_bytes: u64,
    pub coverage_percentage: f64,
    /// Byte ranges no probed field covers. These are other members or padding;
    /// a partial probe list cannot tell the two apart.
    pub gaps: Vec<Gap>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Gap {
    pub offset: u64,
    pub size: u64,
    pub after_field: Option<String>,
}

impl FieldLayout {
    pub fn new(
        structure: impl Into<String>,
        field: impl Into<String>,
        type_name: impl Into<String>,
        offset: u64,
        width: u64,
    ) -> Self {
        Self {
            structure: structure.into(),
            field: field.into(),
            type_name: type_name.into(),
            offset,
            width,
        }
    }

    pub fn end_offset(&self) -> Option<u64> {
        self.offset.checked_add(self.width)
    }

    /// `Structure::field`, the key probe lines are matched on.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.structure, self.field)
    }
}

/// Formats as a probe line: `[Structure::field @ offset-width]`.
impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}::{} @ {}-{}]", self.structure, self.field, self.offset, self.width)
    }
}

impl StructLayout {
    pub fn new(name: impl Into<String>, size: u64, alignment: u64) -> Self {
        Self {
            name: name.into(),
            size,
            alignment,
            fields: Vec::new(),
            metrics: LayoutMetrics::default(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldLayout>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.field == name)
    }
}
