//! Inventory catalog: sellable items and the keyed collection that owns them.
//!
//! This crate holds the catalog rules (identifier uniqueness, non-negative
//! stock, expiry pruning) and the snapshot format used to persist a catalog
//! to a flat JSON file. It never talks to a terminal.

pub mod catalog;
pub mod item;
pub mod record;
pub mod snapshot;

pub use catalog::Catalog;
pub use item::{
    Clothing, EXPIRY_DATE_FORMAT, Electronics, Grocery, Item, ItemCore, ItemKind,
    parse_expiry_date,
};
pub use record::ItemRecord;
pub use snapshot::LoadMode;
