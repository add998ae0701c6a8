//! Eager Loading System - Batched relationship loading without N+1 queries
//!
//! A query that wants relationships resolved registers one request per
//! relationship into a per-query [`EagerLoadContext`] before execution.
//! After all parent rows are materialized, each request runs its batch fetch
//! exactly once; every parent row then resolves its own children by filtering
//! the shared batch result. The context is created fresh per query and never
//! shared across queries.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::database::{Database, DatabaseRowExt};
use crate::error::{ModelError, ModelResult};
use crate::model::{Field, Model, PrimaryKeyValue};
use crate::query::QueryBuilder;

/// Strategies for eagerly loading a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EagerLoadMethod {
    /// One `foreign_key IN (parent ids)` fetch against the child table
    Subquery,
    /// Fetch parent and child rows in one joined query (not supported)
    Join,
}

impl fmt::Display for EagerLoadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EagerLoadMethod::Subquery => write!(f, "subquery"),
            EagerLoadMethod::Join => write!(f, "join"),
        }
    }
}

/// Key identifying one registered eager load: the declaring relationship
/// plus the child entity it targets.
///
/// Keying on both keeps sibling relationships that target the same child
/// entity independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EagerLoadKey {
    pub relation: &'static str,
    pub entity: &'static str,
}

/// A registered eager-load request: batch-fetches once, then answers point
/// lookups by parent identifier
#[async_trait]
pub trait EagerLoadRequest<P: Model>: Send + Sync {
    /// Run the single batch fetch for the given parent result set
    async fn run(&mut self, parents: &[P], database: &dyn Database) -> ModelResult<()>;

    /// Downcast support for per-row resolution
    fn as_any(&self) -> &dyn Any;
}

/// Per-query scratch storage mapping relationships to their eager-load
/// requests.
///
/// Shared by every relationship property across every parent row of one
/// query; must not be reused across queries.
pub struct EagerLoadContext<P: Model> {
    requests: HashMap<EagerLoadKey, Box<dyn EagerLoadRequest<P>>>,
}

impl<P: Model> EagerLoadContext<P> {
    /// Create an empty context for one query
    pub fn new() -> Self {
        Self {
            requests: HashMap::new(),
        }
    }

    /// Install a request under the given key.
    ///
    /// Re-registering the same relationship replaces the previous request;
    /// the replacement is harmless before the batch phase but worth noting.
    pub fn insert(&mut self, key: EagerLoadKey, request: Box<dyn EagerLoadRequest<P>>) {
        if self.requests.insert(key, request).is_some() {
            warn!(
                relation = key.relation,
                entity = key.entity,
                "replacing previously registered eager load request"
            );
        }
    }

    /// Look up the request registered for a relationship
    pub fn get(&self, key: &EagerLoadKey) -> Option<&dyn EagerLoadRequest<P>> {
        self.requests.get(key).map(|request| request.as_ref())
    }

    /// Number of registered requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether any requests are registered
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Run every registered request's batch fetch, once each
    pub async fn run_all(&mut self, parents: &[P], database: &dyn Database) -> ModelResult<()> {
        for request in self.requests.values_mut() {
            request.run(parents, database).await?;
        }
        Ok(())
    }
}

impl<P: Model> Default for EagerLoadContext<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Subquery eager-load request for a one-to-many relationship.
///
/// `run` issues one `foreign_key IN (deduplicated parent ids)` fetch and
/// stores each child alongside its decoded foreign-key value, so per-row
/// lookups are a filter over already-decoded pairs.
pub struct SubqueryEagerLoad<P, C>
where
    P: Model,
    C: Model,
{
    foreign_key: Field<P::PrimaryKey>,
    storage: Vec<(P::PrimaryKey, C)>,
}

impl<P, C> SubqueryEagerLoad<P, C>
where
    P: Model,
    C: Model,
{
    /// Create an empty request filtering children by the given foreign key
    pub fn new(foreign_key: Field<P::PrimaryKey>) -> Self {
        Self {
            foreign_key,
            storage: Vec::new(),
        }
    }

    /// Children whose stored foreign key matches the given parent identifier
    pub fn get(&self, id: &P::PrimaryKey) -> Vec<C>
    where
        C: Clone,
    {
        self.storage
            .iter()
            .filter(|(key, _)| key == id)
            .map(|(_, child)| child.clone())
            .collect()
    }
}

#[async_trait]
impl<P, C> EagerLoadRequest<P> for SubqueryEagerLoad<P, C>
where
    P: Model,
    C: Model + Clone,
{
    async fn run(&mut self, parents: &[P], database: &dyn Database) -> ModelResult<()> {
        let mut ids = Vec::with_capacity(parents.len());
        for parent in parents {
            ids.push(parent.primary_key().ok_or(ModelError::MissingPrimaryKey)?);
        }

        // Order is irrelevant: the ids only form a filter set.
        let unique: HashSet<P::PrimaryKey> = ids.into_iter().collect();
        let values: Vec<JsonValue> = unique.iter().map(|id| id.to_value()).collect();

        debug!(
            entity = C::table_name(),
            parents = values.len(),
            "batch loading children"
        );

        let query = QueryBuilder::<C>::new()
            .from(C::table_name())
            .where_in(self.foreign_key.name(), values);
        let rows = database.fetch(&query.description()).await?;

        // Built fully before assignment: a failed fetch or decode leaves the
        // request empty, so per-row resolution fails closed.
        let mut storage = Vec::with_capacity(rows.len());
        for row in rows {
            let key: P::PrimaryKey = row.as_ref().get(self.foreign_key.name())?;
            let child = C::from_row(row.as_ref())?;
            storage.push((key, child));
        }
        self.storage = storage;

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
