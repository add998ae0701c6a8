//! Schema Module - Schema derivation from model metadata

pub mod builder;
pub mod definition;

// Re-export main types
pub use builder::SchemaBuilder;
pub use definition::{
    DataType, FieldConstraint, FieldDefinition, SchemaAction, SchemaConstraint, SchemaDefinition,
};
