//! HasMany Relationship - Parent-side handle for a one-to-many child collection
//!
//! The handle is declared once per model type and carries per-row state: the
//! owning parent's identifier (bound when the row is materialized) and the
//! eager-loaded child collection (resolved only when an eager load was
//! registered for this relationship). "Never loaded" and "loaded with zero
//! children" stay distinguishable.

use crate::database::{DatabaseRow, DatabaseRowExt};
use crate::error::{ModelError, ModelResult, RelationshipError};
use crate::model::{Field, Model, PrimaryKeyValue};
use crate::query::QueryBuilder;

use super::belongs_to::BelongsTo;
use super::eager_loading::{EagerLoadContext, EagerLoadKey, EagerLoadMethod, SubqueryEagerLoad};

/// HasMany relationship - parent model has many related child models
#[derive(Debug)]
pub struct HasMany<Parent, Child>
where
    Parent: Model,
    Child: Model,
{
    relation: &'static str,
    foreign_key: Field<Parent::PrimaryKey>,
    parent_key: Option<Parent::PrimaryKey>,
    loaded: Option<Vec<Child>>,
}

impl<Parent, Child> HasMany<Parent, Child>
where
    Parent: Model,
    Child: Model,
{
    /// Create a HasMany relationship from the inverse property on the child
    /// type.
    ///
    /// The accessor runs against the child's reference instance and yields
    /// its parent-pointing property, whose foreign-key field this handle
    /// adopts. A mismatched accessor shape fails to compile.
    pub fn via<F>(relation: &'static str, inverse: F) -> Self
    where
        Child: Default,
        F: FnOnce(&Child) -> &BelongsTo<Child, Parent>,
    {
        let reference = Child::default();
        let foreign_key = *inverse(&reference).foreign_key();
        Self {
            relation,
            foreign_key,
            parent_key: None,
            loaded: None,
        }
    }

    /// The declaring relationship name
    pub fn relation(&self) -> &'static str {
        self.relation
    }

    /// The child-side foreign-key field this relationship filters by
    pub fn foreign_key(&self) -> &Field<Parent::PrimaryKey> {
        &self.foreign_key
    }

    /// The owning parent's identifier, if the row has been bound
    pub fn parent_key(&self) -> Option<&Parent::PrimaryKey> {
        self.parent_key.as_ref()
    }

    /// The storage key this relationship registers and resolves under
    pub fn key(&self) -> EagerLoadKey {
        EagerLoadKey {
            relation: self.relation,
            entity: Child::table_name(),
        }
    }

    /// Build a query for this parent's children.
    ///
    /// # Panics
    ///
    /// Panics if the owning row has not been bound yet; querying a detached
    /// relationship handle is programmer misuse, not a recoverable state.
    pub fn query(&self) -> QueryBuilder<Child> {
        let parent_key = self.parent_key.as_ref().unwrap_or_else(|| {
            panic!(
                "cannot query unbound children relationship '{}'",
                self.relation
            )
        });
        QueryBuilder::new()
            .from(Child::table_name())
            .where_eq(self.foreign_key.name(), parent_key.to_value())
    }

    /// The eager-loaded child collection.
    ///
    /// Returns a missing-eager-load error naming the child entity when no
    /// eager load was registered and resolved for this relationship; a
    /// parent with zero children yields an empty slice, not an error.
    pub fn eager_loaded(&self) -> ModelResult<&[Child]> {
        match &self.loaded {
            Some(children) => Ok(children.as_slice()),
            None => Err(ModelError::MissingEagerLoad(Child::table_name().to_string())),
        }
    }
}

impl<Parent, Child> HasMany<Parent, Child>
where
    Parent: Model,
    Child: Model + Clone,
{
    /// Register an eager load for this relationship during query
    /// construction.
    ///
    /// The subquery method installs a fresh request into the query's
    /// context. The join method is not supported and fails here, at
    /// registration time, rather than degrading to per-row queries.
    pub fn register_eager_load(
        &self,
        method: EagerLoadMethod,
        eager: &mut EagerLoadContext<Parent>,
    ) -> ModelResult<()> {
        match method {
            EagerLoadMethod::Subquery => {
                eager.insert(
                    self.key(),
                    Box::new(SubqueryEagerLoad::<Parent, Child>::new(self.foreign_key)),
                );
                Ok(())
            }
            EagerLoadMethod::Join => {
                Err(RelationshipError::UnsupportedEagerLoadMethod(method.to_string()).into())
            }
        }
    }

    /// Bind this handle to its owning parent row: decode the parent's
    /// identifier, then resolve any pending eager load for this
    /// relationship.
    pub fn bind_row(
        &mut self,
        row: &dyn DatabaseRow,
        eager: &EagerLoadContext<Parent>,
    ) -> ModelResult<()> {
        let id: Parent::PrimaryKey = row.get(Parent::primary_key_name())?;
        self.parent_key = Some(id);
        self.resolve_eager_load(eager);
        Ok(())
    }

    /// Resolve this row's children from the context's completed batch
    /// result, if a request was registered for this relationship.
    ///
    /// # Panics
    ///
    /// Panics if the owning row has not been bound yet.
    pub fn resolve_eager_load(&mut self, eager: &EagerLoadContext<Parent>) {
        let parent_key = self.parent_key.as_ref().unwrap_or_else(|| {
            panic!(
                "cannot resolve eager load for unbound children relationship '{}'",
                self.relation
            )
        });
        if let Some(request) = eager.get(&self.key()) {
            if let Some(subquery) = request
                .as_any()
                .downcast_ref::<SubqueryEagerLoad<Parent, Child>>()
            {
                self.loaded = Some(subquery.get(parent_key));
            }
        }
    }
}

// Manual impl so Parent never picks up a Clone bound
impl<Parent, Child> Clone for HasMany<Parent, Child>
where
    Parent: Model,
    Child: Model + Clone,
{
    fn clone(&self) -> Self {
        Self {
            relation: self.relation,
            foreign_key: self.foreign_key,
            parent_key: self.parent_key.clone(),
            loaded: self.loaded.clone(),
        }
    }
}
