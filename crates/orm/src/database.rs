//! Database Boundary - Abstract execution interface for the ORM core
//!
//! Defines the narrow contract this crate needs from a backing store: a
//! filtered fetch returning abstract rows, and schema-definition execution.
//! SQL generation, drivers, pooling, and transactions live behind
//! implementations of these traits.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{ModelError, ModelResult};
use crate::query::QueryDescription;
use crate::schema::SchemaDefinition;

/// Abstract database execution interface
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a filtered fetch and return the matching rows
    async fn fetch(&self, query: &QueryDescription) -> ModelResult<Vec<Box<dyn DatabaseRow>>>;

    /// Submit a schema definition (create/update/delete)
    async fn execute_schema(&self, schema: &SchemaDefinition) -> ModelResult<()>;
}

/// Row decode error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum RowError {
    #[error("column '{0}' not found in row")]
    ColumnNotFound(String),

    #[error("failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl From<RowError> for ModelError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::ColumnNotFound(column) => ModelError::ColumnNotFound(column),
            RowError::Decode { column, message } => ModelError::Serialization(format!(
                "failed to decode column '{}': {}",
                column, message
            )),
        }
    }
}

/// Abstract database row trait
pub trait DatabaseRow: Send + Sync {
    /// Get a column value by name
    fn get_by_name(&self, name: &str) -> Result<DatabaseValue, RowError>;

    /// Get column names
    fn column_names(&self) -> Vec<String>;
}

/// Extension trait for DatabaseRow to support typed column access
pub trait DatabaseRowExt {
    /// Get a typed value from a column
    fn get<T>(&self, column: &str) -> ModelResult<T>
    where
        T: DeserializeOwned;

    /// Try to get an optional typed value from a column; an absent or NULL
    /// column yields `None`
    fn try_get<T>(&self, column: &str) -> ModelResult<Option<T>>
    where
        T: DeserializeOwned;
}

impl<R: DatabaseRow + ?Sized> DatabaseRowExt for R {
    fn get<T>(&self, column: &str) -> ModelResult<T>
    where
        T: DeserializeOwned,
    {
        let db_value = self.get_by_name(column)?;

        serde_json::from_value(db_value.to_json()).map_err(|e| {
            ModelError::Serialization(format!("failed to decode column '{}': {}", column, e))
        })
    }

    fn try_get<T>(&self, column: &str) -> ModelResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_by_name(column) {
            Ok(db_value) => {
                if db_value.is_null() {
                    Ok(None)
                } else {
                    let parsed: T = serde_json::from_value(db_value.to_json()).map_err(|e| {
                        ModelError::Serialization(format!(
                            "failed to decode column '{}': {}",
                            column, e
                        ))
                    })?;
                    Ok(Some(parsed))
                }
            }
            Err(RowError::ColumnNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Database value enumeration for type-safe row contents and bindings
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    DateTime(chrono::DateTime<chrono::Utc>),
    Json(JsonValue),
    Array(Vec<DatabaseValue>),
}

impl DatabaseValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            DatabaseValue::Null => JsonValue::Null,
            DatabaseValue::Bool(b) => JsonValue::Bool(*b),
            DatabaseValue::Int32(i) => JsonValue::from(*i),
            DatabaseValue::Int64(i) => JsonValue::from(*i),
            DatabaseValue::Float64(f) => {
                JsonValue::from(serde_json::Number::from_f64(*f).unwrap_or_else(|| 0.into()))
            }
            DatabaseValue::String(s) => JsonValue::String(s.clone()),
            DatabaseValue::Bytes(b) => {
                JsonValue::Array(b.iter().map(|byte| JsonValue::from(*byte)).collect())
            }
            DatabaseValue::Uuid(u) => JsonValue::String(u.to_string()),
            DatabaseValue::DateTime(dt) => JsonValue::String(dt.to_rfc3339()),
            DatabaseValue::Json(v) => v.clone(),
            DatabaseValue::Array(values) => {
                JsonValue::Array(values.iter().map(|v| v.to_json()).collect())
            }
        }
    }
}

impl From<bool> for DatabaseValue {
    fn from(value: bool) -> Self {
        DatabaseValue::Bool(value)
    }
}

impl From<i32> for DatabaseValue {
    fn from(value: i32) -> Self {
        DatabaseValue::Int32(value)
    }
}

impl From<i64> for DatabaseValue {
    fn from(value: i64) -> Self {
        DatabaseValue::Int64(value)
    }
}

impl From<f64> for DatabaseValue {
    fn from(value: f64) -> Self {
        DatabaseValue::Float64(value)
    }
}

impl From<&str> for DatabaseValue {
    fn from(value: &str) -> Self {
        DatabaseValue::String(value.to_string())
    }
}

impl From<String> for DatabaseValue {
    fn from(value: String) -> Self {
        DatabaseValue::String(value)
    }
}

impl From<uuid::Uuid> for DatabaseValue {
    fn from(value: uuid::Uuid) -> Self {
        DatabaseValue::Uuid(value)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for DatabaseValue {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        DatabaseValue::DateTime(value)
    }
}

/// Simple column-map row, used by in-memory backends and test doubles
#[derive(Debug, Clone, Default)]
pub struct MapRow {
    values: HashMap<String, DatabaseValue>,
}

impl MapRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, consuming and returning the row for chaining
    pub fn with(mut self, name: &str, value: impl Into<DatabaseValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }
}

impl DatabaseRow for MapRow {
    fn get_by_name(&self, name: &str) -> Result<DatabaseValue, RowError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| RowError::ColumnNotFound(name.to_string()))
    }

    fn column_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_row_typed_access() {
        let row = MapRow::new()
            .with("id", 42i64)
            .with("name", "alice")
            .with("bio", DatabaseValue::Null);

        let id: i64 = row.get("id").unwrap();
        assert_eq!(id, 42);

        let name: String = row.get("name").unwrap();
        assert_eq!(name, "alice");

        let bio: Option<String> = row.try_get("bio").unwrap();
        assert_eq!(bio, None);
    }

    #[test]
    fn test_try_get_missing_column_is_none() {
        let row = MapRow::new().with("id", 1i64);
        let missing: Option<String> = row.try_get("nope").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_get_missing_column_fails() {
        let row = MapRow::new();
        let err = row.get::<i64>("id").unwrap_err();
        assert!(matches!(err, ModelError::ColumnNotFound(_)));
    }

    #[test]
    fn test_get_mistyped_column_fails() {
        let row = MapRow::new().with("id", "not a number");
        let err = row.get::<i64>("id").unwrap_err();
        assert!(matches!(err, ModelError::Serialization(_)));
    }

    #[test]
    fn test_database_value_to_json() {
        assert_eq!(DatabaseValue::Int64(7).to_json(), serde_json::json!(7));
        assert_eq!(
            DatabaseValue::String("x".into()).to_json(),
            serde_json::json!("x")
        );
        assert!(DatabaseValue::Null.is_null());

        let uuid = uuid::Uuid::new_v4();
        assert_eq!(
            DatabaseValue::Uuid(uuid).to_json(),
            serde_json::json!(uuid.to_string())
        );
    }
}
