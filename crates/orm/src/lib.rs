//! # ferro-orm: Relationship loading and schema derivation core
//!
//! The two load-bearing pieces of the ferro database layer: one-to-many
//! relationship resolution without N+1 query storms (register a request,
//! batch-fetch once, resolve per row), and schema derivation from typed
//! model property metadata with explicit override hooks.
//!
//! Query execution, SQL generation, drivers, and connection management live
//! behind the narrow [`Database`] boundary and are provided elsewhere.

pub mod database;
pub mod error;
pub mod model;
pub mod query;
pub mod relationships;
pub mod schema;

// Re-export core traits and types (explicit lists where module names
// would otherwise conflict)
pub use database::*;
pub use error::*;
pub use model::*;
pub use query::{OrderDirection, QueryBuilder, QueryDescription, QueryOperator, WhereCondition};
pub use relationships::*;
pub use schema::{
    DataType, FieldConstraint, FieldDefinition, SchemaAction, SchemaBuilder, SchemaConstraint,
    SchemaDefinition,
};
