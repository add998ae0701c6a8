//! Core Model Trait - Base definition for database entities
//!
//! Defines the fundamental Model trait with table metadata, primary key
//! handling, property metadata for schema derivation, and the row decode
//! contract.

use std::fmt::Debug;

use crate::database::DatabaseRow;
use crate::error::ModelResult;
use crate::model::primary_key::PrimaryKeyValue;
use crate::model::properties::PropertyDescriptor;
use crate::query::QueryBuilder;
use crate::relationships::EagerLoadContext;

/// Core trait for database models
pub trait Model: Send + Sync + Debug + Sized + 'static {
    /// The type used for this model's primary key
    type PrimaryKey: PrimaryKeyValue;

    /// Table name for this model
    fn table_name() -> &'static str;

    /// Primary key field name
    fn primary_key_name() -> &'static str {
        "id"
    }

    /// Get the primary key value for this model instance
    fn primary_key(&self) -> Option<Self::PrimaryKey>;

    /// Property metadata for every declared property, in declaration order.
    /// Consumed by schema derivation; models without stored properties may
    /// leave this empty.
    fn properties() -> Vec<PropertyDescriptor> {
        Vec::new()
    }

    /// Create a model instance from a database row
    fn from_row(row: &dyn DatabaseRow) -> ModelResult<Self>;

    /// Bind relationship properties to this instance's row output.
    ///
    /// Called once per materialized row, strictly after every registered
    /// eager-load request has completed its batch fetch. Models with
    /// relationship fields forward to each field's `bind_row`.
    fn bind_relationships(
        &mut self,
        _row: &dyn DatabaseRow,
        _eager: &EagerLoadContext<Self>,
    ) -> ModelResult<()> {
        Ok(())
    }

    /// Start a query against this model's table
    fn query() -> QueryBuilder<Self> {
        QueryBuilder::new().from(Self::table_name())
    }
}
