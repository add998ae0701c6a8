//! Relationships Module - One-to-many relationships with batched eager loading

pub mod belongs_to;
pub mod eager_loading;
pub mod has_many;

// Re-export main types
pub use belongs_to::BelongsTo;
pub use eager_loading::{
    EagerLoadContext, EagerLoadKey, EagerLoadMethod, EagerLoadRequest, SubqueryEagerLoad,
};
pub use has_many::HasMany;
