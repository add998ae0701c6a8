//! Shared test support: an in-memory database double and two related models.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ferro_orm::{
    BelongsTo, Database, DatabaseRow, DatabaseRowExt, HasMany, MapRow, Model, ModelError,
    ModelResult, PropertyDescriptor, QueryDescription, QueryOperator, SchemaDefinition, ValueKind,
    WhereCondition,
};

/// In-memory database double. Records every query and schema definition it
/// receives and evaluates Equal/In/IsNull filters by JSON comparison.
pub struct MockDatabase {
    tables: Mutex<HashMap<String, Vec<MapRow>>>,
    pub fetches: Mutex<Vec<QueryDescription>>,
    pub schemas: Mutex<Vec<SchemaDefinition>>,
    failing: AtomicBool,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            fetches: Mutex::new(Vec::new()),
            schemas: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, table: &str, row: MapRow) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    /// Make every subsequent fetch and schema execution fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetch_count(&self, table: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|query| query.table == table)
            .count()
    }

    pub fn fetches_for(&self, table: &str) -> Vec<QueryDescription> {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|query| query.table == table)
            .cloned()
            .collect()
    }
}

fn matches(row: &MapRow, condition: &WhereCondition) -> bool {
    let value = row
        .get_by_name(&condition.column)
        .ok()
        .map(|value| value.to_json());
    match condition.operator {
        QueryOperator::Equal => value.as_ref() == condition.value.as_ref(),
        QueryOperator::In => value.map_or(false, |v| condition.values.contains(&v)),
        QueryOperator::IsNull => value.map_or(true, |v| v.is_null()),
        ref op => panic!("operator {} not supported by MockDatabase", op),
    }
}

#[async_trait]
impl Database for MockDatabase {
    async fn fetch(&self, query: &QueryDescription) -> ModelResult<Vec<Box<dyn DatabaseRow>>> {
        self.fetches.lock().unwrap().push(query.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(ModelError::Database("mock fetch failure".to_string()));
        }

        let tables = self.tables.lock().unwrap();
        let rows = tables.get(&query.table).cloned().unwrap_or_default();
        let mut matching: Vec<Box<dyn DatabaseRow>> = rows
            .into_iter()
            .filter(|row| query.conditions.iter().all(|c| matches(row, c)))
            .map(|row| Box::new(row) as Box<dyn DatabaseRow>)
            .collect();
        if let Some(limit) = query.limit {
            matching.truncate(limit as usize);
        }
        Ok(matching)
    }

    async fn execute_schema(&self, schema: &SchemaDefinition) -> ModelResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ModelError::Database("mock schema failure".to_string()));
        }
        self.schemas.lock().unwrap().push(schema.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub posts: HasMany<User, Post>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            bio: None,
            posts: HasMany::via("posts", |post: &Post| &post.author),
        }
    }
}

impl Model for User {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "users"
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn properties() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::column("id", ValueKind::Int64),
            PropertyDescriptor::column("name", ValueKind::String),
            PropertyDescriptor::column("email", ValueKind::String),
            PropertyDescriptor::column("bio", ValueKind::String).nullable(),
            PropertyDescriptor::relationship("posts"),
        ]
    }

    fn from_row(row: &dyn DatabaseRow) -> ModelResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            bio: row.try_get("bio")?,
            posts: HasMany::via("posts", |post: &Post| &post.author),
        })
    }

    fn bind_relationships(
        &mut self,
        row: &dyn DatabaseRow,
        eager: &ferro_orm::EagerLoadContext<Self>,
    ) -> ModelResult<()> {
        self.posts.bind_row(row, eager)
    }
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Option<i64>,
    pub title: String,
    pub author: BelongsTo<Post, User>,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            author: BelongsTo::new("user_id"),
        }
    }
}

impl Model for Post {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "posts"
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn properties() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::column("id", ValueKind::Int64),
            PropertyDescriptor::column("title", ValueKind::String),
            PropertyDescriptor::column("user_id", ValueKind::Int64),
            PropertyDescriptor::relationship("author"),
        ]
    }

    fn from_row(row: &dyn DatabaseRow) -> ModelResult<Self> {
        let mut author = BelongsTo::new("user_id");
        author.bind_row(row)?;
        Ok(Self {
            id: row.try_get("id")?,
            title: row.get("title")?,
            author,
        })
    }
}

pub fn user_row(id: i64) -> MapRow {
    MapRow::new()
        .with("id", id)
        .with("name", format!("user-{}", id))
        .with("email", format!("user-{}@example.com", id))
}

pub fn post_row(id: i64, user_id: i64, title: &str) -> MapRow {
    MapRow::new()
        .with("id", id)
        .with("title", title)
        .with("user_id", user_id)
}

/// A detached User instance with a bound-looking id, for driving eager-load
/// requests directly
pub fn user(id: i64) -> User {
    User {
        id: Some(id),
        ..User::default()
    }
}
