//! Schema Definitions - The declarative payload submitted to the database
//!
//! A schema definition accumulates field definitions and table constraints
//! locally; nothing reaches the database until a builder's terminal verb
//! submits the whole payload once.

use serde::{Deserialize, Serialize};

use crate::model::ValueKind;

/// Lifecycle action for a schema definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaAction {
    Create,
    Update,
    Delete,
}

/// Storage data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int,
    BigInt,
    Double,
    Text,
    Bytes,
    Uuid,
    Date,
    Datetime,
    Json,
}

impl DataType {
    /// The best storage type for a property's value kind, used when no
    /// explicit data type is declared
    pub fn best_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool => DataType::Bool,
            ValueKind::Int32 => DataType::Int,
            ValueKind::Int64 => DataType::BigInt,
            ValueKind::Float64 => DataType::Double,
            ValueKind::String => DataType::Text,
            ValueKind::Bytes => DataType::Bytes,
            ValueKind::Uuid => DataType::Uuid,
            ValueKind::Date => DataType::Date,
            ValueKind::DateTime => DataType::Datetime,
            ValueKind::Json => DataType::Json,
        }
    }
}

/// Per-field constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldConstraint {
    /// The field is the table's row identity
    Identifier,
    /// The field may not be null
    Required,
}

/// A single field definition within a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<FieldConstraint>,
}

impl FieldDefinition {
    /// Create a field definition with no constraints
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint
    pub fn with_constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Table-level constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaConstraint {
    /// Uniqueness over one or more columns
    Unique { fields: Vec<String> },
    /// Foreign-key reference to another table's column
    ForeignKey {
        field: String,
        references_table: String,
        references_field: String,
    },
}

/// The full schema payload for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub table: String,
    pub action: SchemaAction,
    pub create_fields: Vec<FieldDefinition>,
    pub delete_fields: Vec<String>,
    pub constraints: Vec<SchemaConstraint>,
}

impl SchemaDefinition {
    /// Create an empty definition for a table
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            action: SchemaAction::Create,
            create_fields: Vec::new(),
            delete_fields: Vec::new(),
            constraints: Vec::new(),
        }
    }
}
