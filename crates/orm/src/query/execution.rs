//! Query Builder execution for Model types
//!
//! `all_with` is the executor surface for eager loading: it enforces the
//! register -> batch-fetch -> per-row-resolve phase ordering. Every batch
//! fetch runs exactly once, strictly after all parent rows are known and
//! strictly before any row binds its relationships.

use crate::database::Database;
use crate::error::{ModelError, ModelResult};
use crate::model::Model;
use crate::relationships::EagerLoadContext;

use super::builder::QueryBuilder;

impl<M: Model> QueryBuilder<M> {
    /// Execute the query and return models.
    ///
    /// Relationship properties still get their parent key bound, but nothing
    /// is eager-loaded; reading a relationship's children afterwards yields
    /// a missing-eager-load error.
    pub async fn all(self, database: &dyn Database) -> ModelResult<Vec<M>> {
        let mut eager = EagerLoadContext::new();
        self.all_with(database, &mut eager).await
    }

    /// Execute the query, run every registered eager-load request once, and
    /// resolve each returned model's relationships against the batch results.
    pub async fn all_with(
        self,
        database: &dyn Database,
        eager: &mut EagerLoadContext<M>,
    ) -> ModelResult<Vec<M>> {
        let description = self.description();
        let rows = database.fetch(&description).await?;

        let mut models = Vec::with_capacity(rows.len());
        for row in &rows {
            models.push(M::from_row(row.as_ref())?);
        }

        eager.run_all(&models, database).await?;

        for (model, row) in models.iter_mut().zip(rows.iter()) {
            model.bind_relationships(row.as_ref(), eager)?;
        }

        Ok(models)
    }

    /// Execute the query and return the first model
    pub async fn first(self, database: &dyn Database) -> ModelResult<Option<M>> {
        let results = self.limit(1).all(database).await?;
        Ok(results.into_iter().next())
    }

    /// Execute the query and return the first model or error
    pub async fn first_or_fail(self, database: &dyn Database) -> ModelResult<M> {
        self.first(database)
            .await?
            .ok_or_else(|| ModelError::NotFound(M::table_name().to_string()))
    }
}
