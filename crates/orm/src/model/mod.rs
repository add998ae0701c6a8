//! Model System - Trait and metadata types for database entities
//!
//! This module provides the model layer in focused pieces:
//!
//! - `core_trait`: Core Model trait definition
//! - `primary_key`: Primary key value contract and implementations
//! - `field`: Typed column descriptors
//! - `properties`: Property metadata consumed by schema derivation

pub mod core_trait;
pub mod field;
pub mod primary_key;
pub mod properties;

// Re-export main types and traits for convenience
pub use core_trait::Model;
pub use field::Field;
pub use primary_key::PrimaryKeyValue;
pub use properties::{PropertyDescriptor, ValueKind};
