//! Error types for the ORM core
//!
//! Provides error handling for relationship loading, row decoding,
//! schema derivation, and query building.

use std::fmt;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// ORM error type alias
pub type OrmError = ModelError;

/// ORM result type alias
pub type OrmResult<T> = ModelResult<T>;

/// Error types for ORM operations
#[derive(Debug, Clone)]
pub enum ModelError {
    /// Database query or schema execution error
    Database(String),
    /// Model not found in database
    NotFound(String),
    /// Primary key is missing or invalid
    MissingPrimaryKey,
    /// A relationship's value was read without a prior eager load; carries
    /// the child entity name
    MissingEagerLoad(String),
    /// Relationship configuration or loading failed
    Relationship(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Row is missing an expected column
    ColumnNotFound(String),
    /// Schema error
    Schema(String),
    /// Query building error
    Query(String),
    /// Configuration error
    Configuration(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Database(msg) => write!(f, "Database error: {}", msg),
            ModelError::NotFound(table) => write!(f, "Record not found in table '{}'", table),
            ModelError::MissingPrimaryKey => write!(f, "Primary key is missing or invalid"),
            ModelError::MissingEagerLoad(entity) => {
                write!(f, "Missing eager load for entity '{}'", entity)
            }
            ModelError::Relationship(msg) => write!(f, "Relationship error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ModelError::ColumnNotFound(column) => write!(f, "Column '{}' not found", column),
            ModelError::Schema(msg) => write!(f, "Schema error: {}", msg),
            ModelError::Query(msg) => write!(f, "Query error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

// Convert from anyhow errors
impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::Database(err.to_string())
    }
}

/// Error types for relationship operations
#[derive(Debug, Clone)]
pub enum RelationshipError {
    /// The requested eager-load strategy is not supported
    UnsupportedEagerLoadMethod(String),
}

impl fmt::Display for RelationshipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipError::UnsupportedEagerLoadMethod(method) => {
                write!(f, "Unsupported eager load method: {}", method)
            }
        }
    }
}

impl std::error::Error for RelationshipError {}

impl From<RelationshipError> for ModelError {
    fn from(err: RelationshipError) -> Self {
        ModelError::Relationship(err.to_string())
    }
}
