//! Schema Builder - Derives schema definitions from model property metadata
//!
//! Provides a fluent interface for building a table's schema definition and
//! submitting it through the database boundary. All builder calls accumulate
//! locally; only the terminal create/update/delete verbs submit, and each
//! invocation submits again.

use std::marker::PhantomData;

use tracing::debug;

use crate::database::Database;
use crate::error::ModelResult;
use crate::model::Model;

use super::definition::{
    DataType, FieldConstraint, FieldDefinition, SchemaAction, SchemaConstraint, SchemaDefinition,
};

/// Schema builder for one model's table
pub struct SchemaBuilder<'a, M: Model> {
    database: &'a dyn Database,
    schema: SchemaDefinition,
    _model: PhantomData<M>,
}

impl<'a, M: Model> SchemaBuilder<'a, M> {
    /// Create a new schema builder for the model's table
    pub fn new(database: &'a dyn Database) -> Self {
        Self {
            database,
            schema: SchemaDefinition::new(M::table_name()),
            _model: PhantomData,
        }
    }

    /// Derive field definitions from the model's declared properties.
    ///
    /// The identifier property keeps its raw kind and gains an identifier
    /// constraint. A nullable property uses its inner kind and no implicit
    /// constraint. Any other property with no explicit constraints becomes
    /// required. Non-stored properties are skipped. Repeated calls replace
    /// the derived field list.
    pub fn auto(&mut self) -> &mut Self {
        self.schema.create_fields = M::properties()
            .into_iter()
            .filter(|property| property.stored)
            .map(|property| {
                let mut constraints = property.constraints.clone();
                if property.name == M::primary_key_name() {
                    constraints.push(FieldConstraint::Identifier);
                } else if !property.nullable && constraints.is_empty() {
                    constraints.push(FieldConstraint::Required);
                }
                let data_type = property
                    .data_type
                    .unwrap_or_else(|| DataType::best_for(property.value_kind));
                FieldDefinition {
                    name: property.name.to_string(),
                    data_type,
                    constraints,
                }
            })
            .collect();
        self
    }

    /// Append an explicit field definition
    pub fn field(&mut self, definition: FieldDefinition) -> &mut Self {
        self.schema.create_fields.push(definition);
        self
    }

    /// Append a uniqueness constraint over the given columns
    pub fn unique(&mut self, fields: &[&str]) -> &mut Self {
        self.schema.constraints.push(SchemaConstraint::Unique {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    /// Append a foreign-key constraint
    pub fn foreign_key(
        &mut self,
        field: &str,
        references_table: &str,
        references_field: &str,
    ) -> &mut Self {
        self.schema.constraints.push(SchemaConstraint::ForeignKey {
            field: field.to_string(),
            references_table: references_table.to_string(),
            references_field: references_field.to_string(),
        });
        self
    }

    /// Append a field name to drop (for update actions)
    pub fn delete_field(&mut self, name: &str) -> &mut Self {
        self.schema.delete_fields.push(name.to_string());
        self
    }

    /// The in-progress schema definition
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Submit the definition as a create action
    pub async fn create(&mut self) -> ModelResult<()> {
        self.execute(SchemaAction::Create).await
    }

    /// Submit the definition as an update action
    pub async fn update(&mut self) -> ModelResult<()> {
        self.execute(SchemaAction::Update).await
    }

    /// Submit the definition as a delete action
    pub async fn delete(&mut self) -> ModelResult<()> {
        self.execute(SchemaAction::Delete).await
    }

    async fn execute(&mut self, action: SchemaAction) -> ModelResult<()> {
        self.schema.action = action;
        debug!(
            table = self.schema.table.as_str(),
            ?action,
            fields = self.schema.create_fields.len(),
            "submitting schema definition"
        );
        self.database.execute_schema(&self.schema).await
    }
}
