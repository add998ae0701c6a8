//! BelongsTo Relationship - Child-side reference to a parent model
//!
//! The minimal parent-pointing property: it names the foreign-key column on
//! the child table and decodes that column's value when the child row is
//! materialized. The inverse `HasMany` reads the foreign-key field from here
//! at construction time.

use std::marker::PhantomData;

use crate::database::{DatabaseRow, DatabaseRowExt};
use crate::error::ModelResult;
use crate::model::{Field, Model};

/// BelongsTo relationship - child model references a parent model
#[derive(Debug)]
pub struct BelongsTo<Child, Parent>
where
    Child: Model,
    Parent: Model,
{
    foreign_key: Field<Parent::PrimaryKey>,
    value: Option<Parent::PrimaryKey>,
    _child: PhantomData<fn() -> Child>,
}

impl<Child, Parent> BelongsTo<Child, Parent>
where
    Child: Model,
    Parent: Model,
{
    /// Create a new BelongsTo relationship naming the child-side
    /// foreign-key column
    pub fn new(foreign_key: &'static str) -> Self {
        Self {
            foreign_key: Field::new(foreign_key),
            value: None,
            _child: PhantomData,
        }
    }

    /// The child-side foreign-key field referencing the parent's identifier
    pub fn foreign_key(&self) -> &Field<Parent::PrimaryKey> {
        &self.foreign_key
    }

    /// The decoded foreign-key value, if the owning row has been bound
    pub fn key(&self) -> Option<&Parent::PrimaryKey> {
        self.value.as_ref()
    }

    /// Decode this relationship's stored foreign-key value from the owning
    /// child row
    pub fn bind_row(&mut self, row: &dyn DatabaseRow) -> ModelResult<()> {
        self.value = Some(row.get(self.foreign_key.name())?);
        Ok(())
    }
}

// Manual impl so Parent/Child never pick up a Clone bound
impl<Child, Parent> Clone for BelongsTo<Child, Parent>
where
    Child: Model,
    Parent: Model,
{
    fn clone(&self) -> Self {
        Self {
            foreign_key: self.foreign_key,
            value: self.value.clone(),
            _child: PhantomData,
        }
    }
}
