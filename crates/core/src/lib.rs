//! `stockroom-core` — catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and its
//! front ends: the error model, identifiers and value objects. No file or
//! terminal IO happens here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{CatalogError, CatalogResult, SnapshotError};
pub use id::ItemId;
pub use value_object::UnitPrice;
