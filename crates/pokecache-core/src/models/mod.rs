//! Data models for catalog entities.
//!
//! - `Item`, `CatalogPage`: listing entries from the bundled catalog
//! - `DetailRecord`: per-item data fetched on demand

pub mod detail;
pub mod item;

pub use detail::{DetailRecord, NamedResource, TypeSlot};
pub use item::{item_id_from_url, CatalogPage, Item, ItemKey};
