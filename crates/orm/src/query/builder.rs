//! Query Builder - Core builder implementation

use std::marker::PhantomData;

use super::types::*;

/// Query builder for constructing filtered fetches against one table
#[derive(Debug)]
pub struct QueryBuilder<M = ()> {
    pub(crate) table: Option<String>,
    pub(crate) where_conditions: Vec<WhereCondition>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit_count: Option<i64>,
    _phantom: PhantomData<M>,
}

impl<M> Clone for QueryBuilder<M> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            where_conditions: self.where_conditions.clone(),
            order_by: self.order_by.clone(),
            limit_count: self.limit_count,
            _phantom: PhantomData,
        }
    }
}

impl<M> Default for QueryBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> QueryBuilder<M> {
    /// Create a new query builder
    pub fn new() -> Self {
        Self {
            table: None,
            where_conditions: Vec::new(),
            order_by: Vec::new(),
            limit_count: None,
            _phantom: PhantomData,
        }
    }

    /// Set the table to query
    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Add an ORDER BY clause
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), OrderDirection::Asc));
        self
    }

    /// Add a descending ORDER BY clause
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by
            .push((column.to_string(), OrderDirection::Desc));
        self
    }

    /// Limit the number of returned rows
    pub fn limit(mut self, count: i64) -> Self {
        self.limit_count = Some(count);
        self
    }

    /// Build the type-erased payload handed to the database boundary
    pub fn description(&self) -> QueryDescription {
        QueryDescription {
            table: self.table.clone().unwrap_or_default(),
            conditions: self.where_conditions.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_carries_builder_state() {
        let query: QueryBuilder = QueryBuilder::new()
            .from("users")
            .where_eq("name", "alice")
            .order_by("name")
            .order_by_desc("id")
            .limit(10);

        let description = query.description();
        assert_eq!(description.table, "users");
        assert_eq!(description.conditions.len(), 1);
        assert_eq!(
            description.order_by,
            vec![
                ("name".to_string(), OrderDirection::Asc),
                ("id".to_string(), OrderDirection::Desc),
            ]
        );
        assert_eq!(description.limit, Some(10));
    }
}
