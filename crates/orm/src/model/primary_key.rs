//! Primary Key System - Value contract for model identifiers
//!
//! Primary keys travel through three boundaries: row decoding, filter
//! binding, and batch deduplication. The contract below captures all three.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Types usable as a model's primary key.
///
/// `to_value` must agree with how the backing store surfaces the column in
/// [`DatabaseValue::to_json`](crate::database::DatabaseValue::to_json):
/// integer keys bind as JSON numbers, string and UUID keys as JSON strings.
pub trait PrimaryKeyValue:
    Clone + Eq + Hash + Debug + Display + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Convert the key into a filter binding value
    fn to_value(&self) -> JsonValue;
}

impl PrimaryKeyValue for i32 {
    fn to_value(&self) -> JsonValue {
        JsonValue::from(*self)
    }
}

impl PrimaryKeyValue for i64 {
    fn to_value(&self) -> JsonValue {
        JsonValue::from(*self)
    }
}

impl PrimaryKeyValue for String {
    fn to_value(&self) -> JsonValue {
        JsonValue::String(self.clone())
    }
}

impl PrimaryKeyValue for Uuid {
    fn to_value(&self) -> JsonValue {
        JsonValue::String(self.to_string())
    }
}
