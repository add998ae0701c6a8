//! Property Metadata - Per-property descriptors consumed by schema derivation
//!
//! Each model reports one descriptor per declared property. Nullability is a
//! flag and `value_kind` is always the inner (non-optional) kind, so schema
//! inference never has to unwrap an optional type at runtime.

use crate::schema::{DataType, FieldConstraint};

/// The value kind of a stored property, used to infer a storage data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int32,
    Int64,
    Float64,
    String,
    Bytes,
    Uuid,
    Date,
    DateTime,
    Json,
}

/// Metadata for one declared model property
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Column name
    pub name: &'static str,
    /// Whether the property is persisted; relationship and computed
    /// properties are not
    pub stored: bool,
    /// Whether the declared type is optional
    pub nullable: bool,
    /// The inner value kind (already unwrapped for nullable properties)
    pub value_kind: ValueKind,
    /// Explicitly declared storage data type, overriding inference
    pub data_type: Option<DataType>,
    /// Explicitly declared field constraints
    pub constraints: Vec<FieldConstraint>,
}

impl PropertyDescriptor {
    /// A stored column property
    pub fn column(name: &'static str, value_kind: ValueKind) -> Self {
        Self {
            name,
            stored: true,
            nullable: false,
            value_kind,
            data_type: None,
            constraints: Vec::new(),
        }
    }

    /// A relationship property; never persisted as a column
    pub fn relationship(name: &'static str) -> Self {
        Self {
            name,
            stored: false,
            nullable: false,
            value_kind: ValueKind::Json,
            data_type: None,
            constraints: Vec::new(),
        }
    }

    /// Mark the property's declared type as optional
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Override the inferred storage data type
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Add an explicit field constraint
    pub fn with_constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}
